//! Content-addressed object storage for Gitter.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory, without headers or compression. Every piece of
//! data -- file contents, tree snapshots, commit records -- is stored as an
//! immutable object named by the SHA-1 digest of its bytes.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw content (file contents)
//! - [`Tree`] -- flat snapshot of staged `(path, hash)` entries
//!
//! Commit records live in `gitter-ledger` and are stored through
//! [`ObjectStore::insert`], since their name is computed before the record
//! is finalized.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- one file per object under `objects/<hex>`
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written.
//! 2. Writes are idempotent: storing the same bytes twice is a no-op.
//! 3. Objects are written to a temporary file and renamed into place.
//! 4. The store never interprets object contents.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Tree, TreeEntry};
pub use traits::ObjectStore;
