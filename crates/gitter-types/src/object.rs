use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Number of bytes in a digest.
pub const OBJECT_ID_LEN: usize = 20;

/// Number of hex characters shown by [`ObjectId::short_hex`].
pub const SHORT_HEX_LEN: usize = 7;

/// Content-addressed identifier for any stored object.
///
/// An `ObjectId` is the SHA-1 digest of an object's bytes. Identical content
/// always produces the same `ObjectId`. On disk and in every serialized
/// document it appears as 40 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Create an `ObjectId` from a pre-computed digest.
    pub const fn from_digest(digest: [u8; OBJECT_ID_LEN]) -> Self {
        Self(digest)
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex representation (first 7 characters).
    pub fn short_hex(&self) -> String {
        let mut full = self.to_hex();
        full.truncate(SHORT_HEX_LEN);
        full
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != OBJECT_ID_LEN {
            return Err(TypeError::InvalidLength {
                expected: OBJECT_ID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; OBJECT_ID_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<ObjectId>` fields that persist "no object" as an
/// empty string, e.g. the parent of a root commit.
///
/// ```ignore
/// #[serde(with = "gitter_types::object::empty_as_none")]
/// parent: Option<ObjectId>,
/// ```
pub mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ObjectId;

    pub fn serialize<S: Serializer>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.serialize_str(&id.to_hex()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ObjectId>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        ObjectId::from_hex(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    const HELLO: &str = "0a4d55a8d778e5022fab701977c5d840bbc486d0";

    #[test]
    fn hex_roundtrip() {
        let id = ObjectId::from_hex(HELLO).unwrap();
        assert_eq!(id.to_hex(), HELLO);
        assert_eq!(id, HELLO.parse().unwrap());
    }

    #[test]
    fn short_hex_is_7_chars() {
        let id = ObjectId::from_hex(HELLO).unwrap();
        assert_eq!(id.short_hex(), "0a4d55a");
    }

    #[test]
    fn display_is_full_hex() {
        let id = ObjectId::from_digest([0xab; OBJECT_ID_LEN]);
        let display = format!("{id}");
        assert_eq!(display.len(), 40);
        assert_eq!(display, id.to_hex());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = ObjectId::from_hex("abc123").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 20,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(
            ObjectId::from_hex("not hex at all"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = ObjectId::from_hex(HELLO).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{HELLO}\""));
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Link {
        #[serde(with = "empty_as_none")]
        parent: Option<ObjectId>,
    }

    #[test]
    fn empty_string_is_none() {
        let link: Link = serde_json::from_str(r#"{"parent":""}"#).unwrap();
        assert_eq!(link.parent, None);
        assert_eq!(serde_json::to_string(&link).unwrap(), r#"{"parent":""}"#);
    }

    #[test]
    fn present_parent_roundtrips() {
        let link = Link {
            parent: Some(ObjectId::from_hex(HELLO).unwrap()),
        };
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(serde_json::from_str::<Link>(&json).unwrap(), link);
    }
}
