//! Staging index for Gitter.
//!
//! The index records every tracked path together with the hash of the
//! content last added for it, and whether that content is queued for the
//! next commit. It is persisted as a JSON array in `.gitter/index`.
//!
//! # Key Types
//!
//! - [`Index`] -- The ordered staging area
//! - [`IndexEntry`] -- A tracked path, its blob hash and its staged flag
//! - [`WorkdirStatus`] -- Staged / not staged / untracked classification

pub mod entry;
pub mod error;
pub mod index;
pub mod status;

pub use entry::IndexEntry;
pub use error::{IndexError, IndexResult};
pub use index::{Index, INDEX_FILE};
pub use status::WorkdirStatus;
