use gitter_ledger::{Commit, LedgerResult};

use crate::error::SdkError;

/// Result of a commit operation.
#[derive(Clone, Debug)]
pub struct CommitResult {
    pub commit: Commit,
    /// Branch HEAD was on, `None` if HEAD is detached.
    pub branch: Option<String>,
}

impl CommitResult {
    /// One-line confirmation, e.g. `[main 1a2b3c4] initial import`.
    pub fn summary_line(&self) -> LedgerResult<String> {
        let branch = self.branch.as_deref().unwrap_or("detached HEAD");
        Ok(format!(
            "[{branch} {}] {}",
            self.commit.short_id()?,
            self.commit.message
        ))
    }
}

/// Outcome of an `add` call. Every path an argument resolved to lands in
/// exactly one list.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Repository-relative paths that were staged.
    pub staged: Vec<String>,
    /// Paths that do not exist or are not regular files.
    pub skipped: Vec<String>,
    /// Paths that could not be staged, with the reason.
    pub failed: Vec<(String, SdkError)>,
}

impl AddReport {
    /// Returns `true` if no path failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
