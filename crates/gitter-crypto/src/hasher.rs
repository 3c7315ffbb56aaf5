use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use gitter_types::object::OBJECT_ID_LEN;
use gitter_types::ObjectId;
use sha1::{Digest, Sha1};

/// SHA-1 content hasher.
///
/// The digest covers the raw bytes only. Blobs, trees and commits are all
/// addressed the same way; the store never tags objects by kind.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(data);
        finish(hasher)
    }

    /// Hash everything a reader yields, without buffering it whole.
    pub fn hash_reader<R: Read>(mut reader: R) -> Result<ObjectId, HasherError> {
        let mut hasher = Sha1::new();
        io::copy(&mut reader, &mut hasher)?;
        Ok(finish(hasher))
    }

    /// Hash the current contents of a file.
    pub fn hash_file(path: &Path) -> Result<ObjectId, HasherError> {
        let file = File::open(path)?;
        Self::hash_reader(file)
    }
}

fn finish(hasher: Sha1) -> ObjectId {
    let mut digest = [0u8; OBJECT_ID_LEN];
    digest.copy_from_slice(&hasher.finalize());
    ObjectId::from_digest(digest)
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_vector() {
        assert_eq!(
            ContentHasher::hash(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn hello_world_vector() {
        assert_eq!(
            ContentHasher::hash(b"Hello World").to_hex(),
            "0a4d55a8d778e5022fab701977c5d840bbc486d0"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::hash(data), ContentHasher::hash(data));
    }

    #[test]
    fn reader_matches_slice() {
        let data = b"line one\nline two\n".repeat(1000);
        let from_reader = ContentHasher::hash_reader(&data[..]).unwrap();
        assert_eq!(from_reader, ContentHasher::hash(&data));
    }

    #[test]
    fn file_matches_slice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, b"Hello World").unwrap();
        assert_eq!(
            ContentHasher::hash_file(&path).unwrap(),
            ContentHasher::hash(b"Hello World")
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentHasher::hash_file(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, HasherError::Io(_)));
    }
}
