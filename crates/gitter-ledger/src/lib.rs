//! Commit history for Gitter.
//!
//! This crate provides:
//! - The [`Commit`] record and its hash-then-fill naming scheme
//! - [`CommitGraph`], which writes commits, moves HEAD and walks history
//! - [`HistoryValidator`], which re-checks commit names, parent links, trees
//!   and the audit log

pub mod commit;
pub mod error;
pub mod graph;
pub mod validation;

pub use commit::{Commit, LOG_DATE_FORMAT};
pub use error::{LedgerError, LedgerResult};
pub use graph::{CommitGraph, History};
pub use validation::{HistoryValidator, ValidationReport, Violation, ViolationKind};
