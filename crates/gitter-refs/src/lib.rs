//! HEAD, branch ref and commit log storage for Gitter.
//!
//! A repository has exactly one branch, `main`. HEAD is a symbolic ref
//! naming that branch; the branch ref file holds the hash of the newest
//! commit. The log is an append-only audit trail of committed hashes.
//!
//! # Modules
//!
//! - [`error`]: Error types for ref operations
//! - [`types`]: [`Head`] and the well-known ref names
//! - [`traits`]: The [`RefStore`] trait defining the storage interface
//! - [`fs`]: [`FsRefStore`], backed by the metadata directory
//! - [`memory`]: In-memory [`InMemoryRefStore`] for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use fs::FsRefStore;
pub use memory::InMemoryRefStore;
pub use traits::RefStore;
pub use types::{validate_ref_name, Head, HEAD_FILE, LOG_FILE, MAIN_BRANCH, MAIN_BRANCH_REF};
