//! The commit record.
//!
//! A commit is named by the digest of its JSON form with the `hash` field
//! empty. The name is then written into `hash` before the record is stored,
//! so re-hashing the stored bytes does not reproduce the name; use
//! [`Commit::verify`] instead.

use chrono::{DateTime, FixedOffset};
use gitter_crypto::ContentHasher;
use gitter_types::object::empty_as_none;
use gitter_types::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// `strftime` pattern used when showing commit dates, e.g.
/// `Mon Jan 2 15:04:05 2006 -0700`.
pub const LOG_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// A commit record. Field order is the on-disk field order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Name of this commit; `None` until [`Commit::seal`] fills it.
    #[serde(with = "empty_as_none")]
    pub hash: Option<ObjectId>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub message: String,
    /// Previous commit; `None` for the root commit.
    #[serde(with = "empty_as_none")]
    pub parent: Option<ObjectId>,
    /// Tree snapshot recorded by this commit.
    pub tree_hash: ObjectId,
}

impl Commit {
    /// Build an unsealed commit.
    pub fn new(
        author: impl Into<String>,
        date: DateTime<FixedOffset>,
        message: impl Into<String>,
        parent: Option<ObjectId>,
        tree_hash: ObjectId,
    ) -> Self {
        Self {
            hash: None,
            author: author.into(),
            date,
            message: message.into(),
            parent,
            tree_hash,
        }
    }

    /// The form that is hashed: this record with `hash` empty.
    pub fn canonical_bytes(&self) -> LedgerResult<Vec<u8>> {
        let canonical = Self {
            hash: None,
            ..self.clone()
        };
        serde_json::to_vec(&canonical).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Digest of the canonical form.
    pub fn compute_id(&self) -> LedgerResult<ObjectId> {
        Ok(ContentHasher::hash(&self.canonical_bytes()?))
    }

    /// Name the commit by filling in `hash`.
    pub fn seal(mut self) -> LedgerResult<Self> {
        self.hash = Some(self.compute_id()?);
        Ok(self)
    }

    /// The commit's name. Fails if the commit is unsealed.
    pub fn id(&self) -> LedgerResult<ObjectId> {
        self.hash.ok_or(LedgerError::Unsealed)
    }

    /// Abbreviated name, as shown after a commit.
    pub fn short_id(&self) -> LedgerResult<String> {
        Ok(self.id()?.short_hex())
    }

    /// Returns `true` if `hash` is present and matches the canonical digest.
    pub fn verify(&self) -> LedgerResult<bool> {
        match self.hash {
            Some(hash) => Ok(hash == self.compute_id()?),
            None => Ok(false),
        }
    }

    /// The date rendered with [`LOG_DATE_FORMAT`].
    pub fn display_date(&self) -> String {
        self.date.format(LOG_DATE_FORMAT).to_string()
    }

    /// Serialize the stored form (with `hash` filled).
    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Decode a stored commit named `id`.
    pub fn from_bytes(id: &ObjectId, data: &[u8]) -> LedgerResult<Self> {
        serde_json::from_slice(data).map_err(|e| LedgerError::CorruptCommit {
            id: *id,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .unwrap()
    }

    fn tree() -> ObjectId {
        ContentHasher::hash(b"[]")
    }

    fn root() -> Commit {
        Commit::new("user", date(), "first", None, tree())
    }

    #[test]
    fn field_order_and_empty_parent() {
        let json = String::from_utf8(root().canonical_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            format!(
                r#"{{"hash":"","author":"user","date":"2006-01-02T15:04:05-07:00","message":"first","parent":"","tree_hash":"{}"}}"#,
                tree()
            )
        );
    }

    #[test]
    fn seal_fills_hash_from_canonical_form() {
        let unsealed = root();
        let expected = ContentHasher::hash(&unsealed.canonical_bytes().unwrap());
        let sealed = unsealed.seal().unwrap();

        assert_eq!(sealed.id().unwrap(), expected);
        assert_eq!(sealed.short_id().unwrap().len(), 7);
        // The stored form includes the hash, so its digest is different.
        assert_ne!(ContentHasher::hash(&sealed.to_bytes().unwrap()), expected);
        assert!(sealed.verify().unwrap());
    }

    #[test]
    fn tampering_breaks_verification() {
        let mut sealed = root().seal().unwrap();
        sealed.message = "rewritten".into();
        assert!(!sealed.verify().unwrap());
    }

    #[test]
    fn unsealed_commit_has_no_id() {
        let commit = root();
        assert!(matches!(commit.id(), Err(LedgerError::Unsealed)));
        assert!(!commit.verify().unwrap());
    }

    #[test]
    fn parent_roundtrips() {
        let parent = root().seal().unwrap();
        let child = Commit::new("user", date(), "second", parent.hash, tree())
            .seal()
            .unwrap();
        assert_eq!(child.parent, parent.hash);

        let id = child.id().unwrap();
        let decoded = Commit::from_bytes(&id, &child.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, child);
        assert_eq!(decoded.parent, parent.hash);
    }

    #[test]
    fn display_date_uses_log_format() {
        assert_eq!(root().display_date(), "Mon Jan 2 15:04:05 2006 -0700");
    }

    #[test]
    fn garbage_is_corrupt() {
        let id = ContentHasher::hash(b"x");
        assert!(matches!(
            Commit::from_bytes(&id, b"not a commit"),
            Err(LedgerError::CorruptCommit { .. })
        ));
    }
}
