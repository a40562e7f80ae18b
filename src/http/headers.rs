//! Insertion-ordered HTTP header map keyed by [`Scalar`].
//!
//! Names are compared by their canonical bytes, so lookups are case-sensitive
//! and accept text, bytes or integers interchangeably. The only rewriting ever
//! applied is the `_` → `-` convention of [`HeaderMap::field`].

use std::fmt;
use std::ops::{Add, AddAssign};

use bytes::{BufMut, Bytes, BytesMut};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::trace;

use super::scalar::{Scalar, json_kind};
use crate::error::{Error, Result};

/// An insertion-ordered map of header names to header values.
///
/// Inserting an existing name overwrites its value in place; new names are
/// appended at the end.
///
/// # Examples
///
/// ```
/// use httpsuite::HeaderMap;
///
/// let mut headers = HeaderMap::from([("Host", "example.com")]);
/// headers.set_field("Cache_Control", "no-cache");
///
/// assert_eq!(headers.get("Cache-Control").unwrap(), "no-cache");
/// assert_eq!(headers.field("Host").unwrap(), b"example.com");
/// assert!(headers.field("Accept").is_none());
/// assert_eq!(headers.to_bytes(), &b"Host: example.com\r\nCache-Control: no-cache\r\n"[..]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    inner: Vec<(Scalar, Scalar)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header map with pre-allocated capacity for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Sets `name` to `value`, overwriting in place when the name already exists.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<Scalar>, value: impl Into<Scalar>) -> Option<Scalar> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.inner[idx].1, value)),
            None => {
                self.inner.push((name, value));
                None
            }
        }
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: impl Into<Scalar>) -> Option<&Scalar> {
        let name = name.into();
        self.position(&name).map(|idx| &self.inner[idx].1)
    }

    pub fn get_mut(&mut self, name: impl Into<Scalar>) -> Option<&mut Scalar> {
        let name = name.into();
        self.position(&name).map(|idx| &mut self.inner[idx].1)
    }

    pub fn contains(&self, name: impl Into<Scalar>) -> bool {
        let name = name.into();
        self.position(&name).is_some()
    }

    /// Removes `name`, returning its value. Remaining entries keep their order.
    pub fn remove(&mut self, name: impl Into<Scalar>) -> Option<Scalar> {
        let name = name.into();
        self.position(&name).map(|idx| self.inner.remove(idx).1)
    }

    /// Reads a header through its identifier form: `Cache_Control` reads `Cache-Control`.
    pub fn field(&self, name: &str) -> Option<&Scalar> {
        self.get(field_name(name))
    }

    /// Writes a header through its identifier form: `User_Agent` writes `User-Agent`.
    pub fn set_field(&mut self, name: &str, value: impl Into<Scalar>) -> Option<Scalar> {
        self.insert(field_name(name), value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over all `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Scalar, &Scalar)> {
        self.inner.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Scalar> {
        self.inner.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.inner.iter().map(|(_, v)| v)
    }

    /// Returns a new map holding `self`'s pairs overwritten and extended by `other`'s.
    #[must_use]
    pub fn merge(&self, other: &HeaderMap) -> HeaderMap {
        let mut merged = self.clone();
        merged.merge_in_place(other.clone());
        merged
    }

    /// Applies `other`'s pairs onto `self`: shared names take `other`'s value
    /// without moving, new names are appended.
    pub fn merge_in_place(&mut self, other: impl Into<HeaderMap>) -> &mut Self {
        let other = other.into();
        trace!(left = self.len(), right = other.len(), "merging header maps");
        for (name, value) in other.inner {
            self.insert(name, value);
        }
        self
    }

    /// Like [`merge`](Self::merge), but takes a dynamic value that must be a JSON object.
    pub fn merge_value(&self, other: &Value) -> Result<HeaderMap> {
        let other = HeaderMap::try_from(other)?;
        Ok(self.merge(&other))
    }

    /// Like [`merge_in_place`](Self::merge_in_place), but takes a dynamic value
    /// that must be a JSON object. `self` is left untouched on error.
    pub fn merge_value_in_place(&mut self, other: &Value) -> Result<&mut Self> {
        let other = HeaderMap::try_from(other)?;
        Ok(self.merge_in_place(other))
    }

    /// Wire form: `Name: Value\r\n` for every pair, in insertion order.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.inner.len() * 32);
        self.write_wire(&mut buf);
        buf.freeze()
    }

    /// Display form: `Name: Value` lines joined by CRLF, without a trailing CRLF.
    pub fn to_text(&self) -> String {
        self.inner
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\r\n")
    }

    pub(crate) fn write_wire(&self, buf: &mut BytesMut) {
        for (name, value) in &self.inner {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }
    }

    fn position(&self, name: &Scalar) -> Option<usize> {
        self.inner.iter().position(|(k, _)| k == name)
    }
}

fn field_name(name: &str) -> String {
    name.replace('_', "-")
}

impl PartialEq for HeaderMap {
    /// Mapping equality: same names bound to the same values, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for HeaderMap {}

impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ── Construction ─────────────────────────────────────────────────────────────

impl<K: Into<Scalar>, V: Into<Scalar>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Scalar>, V: Into<Scalar>> Extend<(K, V)> for HeaderMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K: Into<Scalar>, V: Into<Scalar>, const N: usize> From<[(K, V); N]> for HeaderMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<Scalar>, V: Into<Scalar>> From<Vec<(K, V)>> for HeaderMap {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<&HeaderMap> for HeaderMap {
    fn from(map: &HeaderMap) -> Self {
        map.clone()
    }
}

impl TryFrom<&Value> for HeaderMap {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(Error::Type {
                expected: "object",
                found: json_kind(value),
            });
        };

        let mut map = HeaderMap::with_capacity(object.len());
        for (name, value) in object {
            map.insert(name.as_str(), Scalar::try_from(value)?);
        }
        Ok(map)
    }
}

impl TryFrom<Value> for HeaderMap {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::try_from(&value)
    }
}

// ── Merge operators ──────────────────────────────────────────────────────────

impl<T: Into<HeaderMap>> Add<T> for &HeaderMap {
    type Output = HeaderMap;

    fn add(self, rhs: T) -> HeaderMap {
        let mut merged = self.clone();
        merged.merge_in_place(rhs);
        merged
    }
}

impl<T: Into<HeaderMap>> Add<T> for HeaderMap {
    type Output = HeaderMap;

    fn add(mut self, rhs: T) -> HeaderMap {
        self.merge_in_place(rhs);
        self
    }
}

impl<T: Into<HeaderMap>> AddAssign<T> for HeaderMap {
    fn add_assign(&mut self, rhs: T) {
        self.merge_in_place(rhs);
    }
}

// ── Serde ────────────────────────────────────────────────────────────────────

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in &self.inner {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct HeaderMapVisitor;

impl<'de> Visitor<'de> for HeaderMapVisitor {
    type Value = HeaderMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of header names to header values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<HeaderMap, A::Error> {
        let mut map = HeaderMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<Scalar, Scalar>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_map(HeaderMapVisitor)
    }
}
