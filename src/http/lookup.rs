//! Frozen reference containers: a bidirectional table and a name set.
//!
//! Both hold [`Scalar`]s, so lookups accept text, bytes or integers
//! interchangeably (`200`, `"200"` and `b"200"` find the same entry).

use std::fmt;

use super::scalar::Scalar;

/// A frozen two-way association: each side looks up the other.
///
/// # Examples
///
/// ```
/// use httpsuite::http::rfc::RESPONSE_STATUS;
///
/// assert_eq!(RESPONSE_STATUS.get(404u16).unwrap(), "Not Found");
/// assert_eq!(*RESPONSE_STATUS.get("Not Found").unwrap(), 404u16);
/// assert_eq!(RESPONSE_STATUS.field("No_Content").unwrap(), "204");
/// assert_eq!(RESPONSE_STATUS.field("_200").unwrap(), "OK");
/// ```
#[derive(Debug, Clone)]
pub struct TwoWayLookup {
    pairs: Vec<(Scalar, Scalar)>,
}

impl TwoWayLookup {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Scalar>,
        V: Into<Scalar>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the partner of `key`, whichever side it is on.
    pub fn get(&self, key: impl Into<Scalar>) -> Option<&Scalar> {
        let key = key.into();
        self.pairs
            .iter()
            .find_map(|(left, right)| (*left == key).then_some(right))
            .or_else(|| {
                self.pairs
                    .iter()
                    .find_map(|(left, right)| (*right == key).then_some(left))
            })
    }

    pub fn contains(&self, key: impl Into<Scalar>) -> bool {
        self.get(key).is_some()
    }

    /// Identifier-style lookup: `_` reads as a space (`No_Content`), and a name
    /// that only works with the underscores dropped is tried next (`_200`).
    pub fn field(&self, name: &str) -> Option<&Scalar> {
        self.get(name.replace('_', " "))
            .or_else(|| self.get(name.replace('_', "")))
    }

    /// Iterates over the stored pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Scalar, &Scalar)> {
        self.pairs.iter().map(|(l, r)| (l, r))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for TwoWayLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (left, right)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{left:?}: {right:?}", left = left.as_text(), right = right.as_text())?;
        }
        f.write_str("}")
    }
}

/// A frozen set of names.
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    names: Vec<Scalar>,
}

impl NameSet {
    pub fn contains(&self, name: impl Into<Scalar>) -> bool {
        let name = name.into();
        self.names.contains(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scalar> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<T: Into<Scalar>> FromIterator<T> for NameSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut names: Vec<Scalar> = Vec::new();
        for name in iter {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self { names }
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", name.as_text())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TwoWayLookup {
        TwoWayLookup::new([(200u16, "OK"), (204, "No Content")])
    }

    #[test]
    fn looks_up_both_directions() {
        let t = table();
        assert_eq!(t.get(200u16).unwrap(), "OK");
        assert_eq!(t.get("200").unwrap(), "OK");
        assert_eq!(*t.get(b"OK").unwrap(), 200u16);
        assert!(t.get(404u16).is_none());
    }

    #[test]
    fn membership_accepts_any_kind() {
        let t = table();
        assert!(t.contains(204u16));
        assert!(t.contains("204"));
        assert!(t.contains(b"No Content"));
        assert!(!t.contains("Gone"));
    }

    #[test]
    fn field_lookup() {
        let t = table();
        assert_eq!(*t.field("No_Content").unwrap(), 204u16);
        assert_eq!(t.field("_200").unwrap(), "OK");
        assert!(t.field("Not_Found").is_none());
    }

    #[test]
    fn name_set_deduplicates() {
        let set: NameSet = ["GET", "POST", "GET"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("GET"));
        assert!(set.contains(b"POST"));
        assert!(!set.contains("PATCH"));
    }

    #[test]
    fn display_forms() {
        assert_eq!(table().to_string(), r#"{"200": "OK", "204": "No Content"}"#);
        let set: NameSet = ["HTTP/1.1"].into_iter().collect();
        assert_eq!(set.to_string(), r#"{"HTTP/1.1"}"#);
    }
}
