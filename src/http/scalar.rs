//! A byte-backed value that erases the difference between text, bytes and integers.
//!
//! Every input is canonicalized eagerly into one byte buffer, so `200`, `"200"`
//! and `b"200"` all become the same [`Scalar`] and compare equal.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, AddAssign};

use bytes::{Bytes, BytesMut};
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use super::{Method, StatusCode};
use crate::error::{Error, Result};

const ADMITTED_KINDS: &str = "text, bytes, integer or null";

/// Canonical byte representation of a text, bytes, integer or absent value.
///
/// # Examples
///
/// ```
/// use httpsuite::Scalar;
///
/// let status = Scalar::from(200u16);
/// assert_eq!(status, "200");
/// assert_eq!(status, b"200");
/// assert_eq!(status, Scalar::from("200"));
/// assert_ne!(status, "200 ");
///
/// let mut body = Scalar::from("<html>");
/// body.concat_in_place(100u16).concat_in_place("</html>");
/// assert_eq!(body, "<html>100</html>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scalar {
    buf: BytesMut,
}

impl Scalar {
    /// The absent value: an empty byte sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the canonical bytes decoded as text.
    ///
    /// Only ASCII content has a defined text form; anything else is decoded lossily.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    /// Returns a cheaply cloneable copy of the canonical bytes.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns a new scalar holding `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: impl Into<Scalar>) -> Scalar {
        let mut out = self.clone();
        out.concat_in_place(other);
        out
    }

    /// Appends `other` to this scalar and returns `self` for chaining.
    pub fn concat_in_place(&mut self, other: impl Into<Scalar>) -> &mut Self {
        self.buf.extend_from_slice(&other.into().buf);
        self
    }

    fn from_slice(bytes: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(bytes),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl AsRef<[u8]> for Scalar {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

// ── Construction ─────────────────────────────────────────────────────────────

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::from_slice(value.as_bytes())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self {
            buf: BytesMut::from(value.into_bytes().as_slice()),
        }
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Self::from_slice(value)
    }
}

impl<const N: usize> From<&[u8; N]> for Scalar {
    fn from(value: &[u8; N]) -> Self {
        Self::from_slice(value)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Self::from_slice(&value)
    }
}

impl From<Bytes> for Scalar {
    fn from(value: Bytes) -> Self {
        Self::from_slice(&value)
    }
}

impl From<BytesMut> for Scalar {
    fn from(buf: BytesMut) -> Self {
        Self { buf }
    }
}

impl From<&Scalar> for Scalar {
    fn from(value: &Scalar) -> Self {
        value.clone()
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<StatusCode> for Scalar {
    fn from(code: StatusCode) -> Self {
        Self::from(code.as_u16())
    }
}

impl From<Method> for Scalar {
    fn from(method: Method) -> Self {
        Self::from(method.as_str())
    }
}

macro_rules! impl_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Scalar {
                fn from(value: $int) -> Self {
                    Self::from(value.to_string())
                }
            }

            impl PartialEq<$int> for Scalar {
                fn eq(&self, other: &$int) -> bool {
                    self.buf == other.to_string().as_bytes()
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Names the JSON kind of `value` for error reporting.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for Scalar {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::String(s) => Ok(Self::from(s.as_str())),
            Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => Ok(Self::from(u)),
                (None, Some(i)) => Ok(Self::from(i)),
                (None, None) => Err(Error::Type {
                    expected: ADMITTED_KINDS,
                    found: "float",
                }),
            },
            other => Err(Error::Type {
                expected: ADMITTED_KINDS,
                found: json_kind(other),
            }),
        }
    }
}

impl TryFrom<Value> for Scalar {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::try_from(&value)
    }
}

// ── Cross-kind equality ──────────────────────────────────────────────────────

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.buf == other.as_bytes()
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.buf == other.as_bytes()
    }
}

impl PartialEq<String> for Scalar {
    fn eq(&self, other: &String) -> bool {
        self.buf == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Scalar {
    fn eq(&self, other: &[u8]) -> bool {
        self.buf == other
    }
}

impl PartialEq<&[u8]> for Scalar {
    fn eq(&self, other: &&[u8]) -> bool {
        self.buf == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Scalar {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.buf == other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Scalar {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.buf == other[..]
    }
}

impl PartialEq<Vec<u8>> for Scalar {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.buf == other[..]
    }
}

impl PartialEq<Scalar> for str {
    fn eq(&self, other: &Scalar) -> bool {
        other == self
    }
}

impl PartialEq<Scalar> for &str {
    fn eq(&self, other: &Scalar) -> bool {
        other == self
    }
}

// ── Concatenation ────────────────────────────────────────────────────────────

impl<T: Into<Scalar>> Add<T> for Scalar {
    type Output = Scalar;

    fn add(mut self, rhs: T) -> Scalar {
        self.concat_in_place(rhs);
        self
    }
}

impl<T: Into<Scalar>> Add<T> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: T) -> Scalar {
        self.concat(rhs)
    }
}

impl<T: Into<Scalar>> AddAssign<T> for Scalar {
    fn add_assign(&mut self, rhs: T) {
        self.concat_in_place(rhs);
    }
}

// ── Serde ────────────────────────────────────────────────────────────────────

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match std::str::from_utf8(&self.buf) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(&self.buf),
        }
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ADMITTED_KINDS)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::from(v))
    }

    /// Byte strings that are not UTF-8 serialize as a sequence of `u8`.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Scalar, A::Error> {
        let mut buf = BytesMut::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            buf.extend_from_slice(&[byte]);
        }
        Ok(Scalar::from(buf))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Scalar, E> {
        Ok(Scalar::empty())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Scalar, E> {
        Ok(Scalar::empty())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Scalar, D::Error> {
        d.deserialize_any(ScalarVisitor)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use serde_json::json;

    use super::*;

    fn hash_of(s: &Scalar) -> u64 {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    }

    #[test]
    fn canonicalizes_every_kind() {
        assert_eq!(Scalar::from("str").as_bytes(), b"str");
        assert_eq!(Scalar::from(b"bytes").as_bytes(), b"bytes");
        assert_eq!(Scalar::from(200u16).as_bytes(), b"200");
        assert_eq!(Scalar::from(-7i64).as_bytes(), b"-7");
        assert!(Scalar::from(None::<&str>).is_empty());
        assert_eq!(Scalar::from(Some("x")), "x");
    }

    #[test]
    fn nested_scalar_is_identity() {
        let inner = Scalar::from(b"abc");
        let outer = Scalar::from(&inner);
        assert_eq!(outer, inner);
        assert_eq!(outer.as_text(), "abc");
    }

    #[test]
    fn cross_kind_equality() {
        let a = Scalar::from(200u16);
        let b = Scalar::from("200");
        let c = Scalar::from(b"200");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, 200u32);
        assert_eq!(a, "200");
        assert_eq!(a, b"200");
        assert_ne!(a, Scalar::from(300u16));
        assert_ne!(a, "200 ");
    }

    #[test]
    fn concat_returns_new_value() {
        let base = Scalar::from("<html>");
        let joined = base.concat("</html>");
        assert_eq!(base, "<html>");
        assert_eq!(joined, "<html></html>");

        let chained = Scalar::from("<html>") + 100u8 + "</html>";
        assert_eq!(chained, "<html>100</html>");
        assert_eq!(&base + b"</html>", "<html></html>");
    }

    #[test]
    fn concat_in_place_mutates() {
        let mut item = Scalar::from("<html>");
        item += Scalar::from("</html>");
        item += "</html>";
        item += b"</html>";
        item += 100u8;
        assert_eq!(item, "<html></html></html></html>100");
    }

    #[test]
    fn hash_follows_bytes() {
        assert_eq!(hash_of(&Scalar::from("<html>")), hash_of(&Scalar::from(b"<html>")));
        assert_ne!(hash_of(&Scalar::from("<html>")), hash_of(&Scalar::from("</html>")));
    }

    #[test]
    fn json_values_admitted_and_rejected() {
        assert_eq!(Scalar::try_from(json!("s")).unwrap(), "s");
        assert_eq!(Scalar::try_from(json!(200)).unwrap(), "200");
        assert_eq!(Scalar::try_from(json!(-3)).unwrap(), "-3");
        assert!(Scalar::try_from(json!(null)).unwrap().is_empty());

        for bad in [json!(["List"]), json!({"Dictionary": ""}), json!(true), json!(1.5)] {
            assert!(matches!(Scalar::try_from(&bad), Err(Error::Type { .. })));
        }
    }

    #[test]
    fn serde_round_trip() {
        let s: Scalar = serde_json::from_str("404").unwrap();
        assert_eq!(s, "404");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"404\"");

        let binary = Scalar::from(vec![0xffu8, 0x00]);
        let json = serde_json::to_string(&binary).unwrap();
        assert_eq!(json, "[255,0]");
        assert_eq!(serde_json::from_str::<Scalar>(&json).unwrap(), binary);

        assert!(serde_json::from_str::<Scalar>("[256]").is_err());
        assert!(serde_json::from_str::<Scalar>(r#"["a"]"#).is_err());
        assert!(serde_json::from_str::<Scalar>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn display_is_text() {
        assert_eq!(Scalar::from(b"OK").to_string(), "OK");
    }
}
