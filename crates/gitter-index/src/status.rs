/// Result of reconciling the working tree with the index.
///
/// Every path lands in at most one bucket. Staged paths follow index order;
/// the other buckets follow working-tree traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Paths queued for the next commit.
    pub staged: Vec<String>,
    /// Tracked, unstaged paths whose working content differs from the index.
    pub not_staged: Vec<String>,
    /// Working-tree paths with no index entry.
    pub untracked: Vec<String>,
}

impl WorkdirStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing staged, modified or untracked.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.not_staged.is_empty() && self.untracked.is_empty()
    }
}
