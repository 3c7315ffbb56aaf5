//! Index entry type.

use gitter_store::TreeEntry;
use gitter_types::ObjectId;
use serde::{Deserialize, Serialize};

/// An entry in the staging index, representing a tracked file.
///
/// On disk the staged flag is stored under the key `modified`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Repository-relative path, `/`-separated.
    pub file_path: String,
    /// ID of the blob holding the content last added for this path.
    pub hash: ObjectId,
    /// Whether the content is queued for the next commit.
    #[serde(rename = "modified")]
    pub staged: bool,
}

impl IndexEntry {
    /// Create an entry that is queued for the next commit.
    pub fn staged(file_path: impl Into<String>, hash: ObjectId) -> Self {
        Self {
            file_path: file_path.into(),
            hash,
            staged: true,
        }
    }

    /// Snapshot this entry for a tree.
    pub fn to_tree_entry(&self) -> TreeEntry {
        TreeEntry {
            file_path: self.file_path.clone(),
            hash: self.hash,
            modified: self.staged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "0a4d55a8d778e5022fab701977c5d840bbc486d0";

    #[test]
    fn staged_flag_serializes_as_modified() {
        let entry = IndexEntry::staged("test.txt", ObjectId::from_hex(HELLO).unwrap());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"file_path":"test.txt","hash":"{HELLO}","modified":true}}"#)
        );
        let back: IndexEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn tree_entry_has_same_wire_form() {
        let entry = IndexEntry::staged("dir/b.txt", ObjectId::from_hex(HELLO).unwrap());
        assert_eq!(
            serde_json::to_string(&entry.to_tree_entry()).unwrap(),
            serde_json::to_string(&entry).unwrap()
        );
    }
}
