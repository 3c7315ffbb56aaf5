//! Diff engine for Gitter.
//!
//! Compares two versions of a file line by line and renders the result in
//! unified format.
//!
//! # Key Types
//!
//! - [`BlobDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level blob diff
//! - [`FileDiff`] -- A blob diff labelled with its path, rendered via `Display`

pub mod blob_diff;
pub mod unified;

pub use blob_diff::{diff_blobs, BlobDiff, DiffHunk, DiffLine, DEFAULT_CONTEXT};
pub use unified::{format_range, FileDiff};
