//! Content digest for Gitter.
//!
//! Objects are named by the SHA-1 digest of their raw bytes, with no header
//! or domain prefix.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
