//! High-level SDK for Gitter.
//!
//! [`Repository`] is the entry point: locate one with
//! [`Repository::discover`] or create one with [`Repository::init`], then
//! call `add`, `commit`, `status`, `diff` and `log` on it. Every operation
//! works relative to the repository value it is called on; nothing reads the
//! process working directory behind the caller's back.

pub mod commit;
pub mod config;
pub mod error;
pub mod repository;
pub mod workdir;

pub use commit::{AddReport, CommitResult};
pub use config::{Config, DiffConfig, UserConfig, CONFIG_FILE};
pub use error::{SdkError, SdkResult};
pub use repository::{Repository, GITTER_DIR};

// Re-export key types
pub use gitter_diff::FileDiff;
pub use gitter_index::WorkdirStatus;
pub use gitter_ledger::{Commit, ValidationReport, Violation, ViolationKind};
pub use gitter_types::ObjectId;
