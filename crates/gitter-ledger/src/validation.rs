use gitter_types::ObjectId;

use crate::error::{LedgerError, LedgerResult};
use crate::graph::CommitGraph;

/// Result of checking a repository's history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Commits reachable from HEAD that could be read.
    pub commit_count: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The commit the violation was found at.
    pub commit: ObjectId,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// The stored `hash` field is not the digest of the canonical form.
    HashMismatch,
    /// The object is stored under a name other than its `hash` field.
    NameMismatch,
    /// The commit's tree object is missing.
    MissingTree,
    /// A commit named by HEAD or a parent link is missing or unreadable.
    BrokenLink,
    /// The parent chain revisits a commit.
    Cycle,
    /// The audit log does not list the history oldest first.
    LogMismatch,
}

/// Re-checks everything reachable from HEAD.
pub struct HistoryValidator;

impl HistoryValidator {
    pub fn validate(graph: &CommitGraph) -> LedgerResult<ValidationReport> {
        let mut report = ValidationReport::default();
        let mut walked = Vec::new();
        let mut expected = graph.head()?;

        for step in graph.history()? {
            let commit = match step {
                Ok(commit) => commit,
                Err(LedgerError::Cycle(id)) => {
                    report.violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::Cycle,
                        description: "parent chain revisits this commit".into(),
                    });
                    break;
                }
                Err(LedgerError::CommitNotFound(id)) => {
                    report.violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::BrokenLink,
                        description: "commit object is missing".into(),
                    });
                    break;
                }
                Err(LedgerError::CorruptCommit { id, reason }) => {
                    report.violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::BrokenLink,
                        description: format!("commit object is unreadable: {reason}"),
                    });
                    break;
                }
                Err(e) => return Err(e),
            };

            let name = match expected {
                Some(name) => name,
                None => break,
            };
            report.commit_count += 1;
            walked.push(name);

            if commit.hash != Some(name) {
                report.violations.push(Violation {
                    commit: name,
                    kind: ViolationKind::NameMismatch,
                    description: format!(
                        "stored under {name} but records {}",
                        commit.hash.map(|h| h.to_hex()).unwrap_or_default()
                    ),
                });
            } else if !commit.verify()? {
                report.violations.push(Violation {
                    commit: name,
                    kind: ViolationKind::HashMismatch,
                    description: "hash does not match commit contents".into(),
                });
            }

            if !graph.has_object(&commit.tree_hash)? {
                report.violations.push(Violation {
                    commit: name,
                    kind: ViolationKind::MissingTree,
                    description: format!("tree {} is missing", commit.tree_hash),
                });
            }

            expected = commit.parent;
        }

        walked.reverse();
        let log = graph.log_entries()?;
        if report.is_valid() && log != walked {
            let at = log
                .iter()
                .zip(&walked)
                .find(|(logged, walked)| logged != walked)
                .map(|(logged, _)| *logged)
                .or_else(|| walked.get(log.len()).copied())
                .or_else(|| log.get(walked.len()).copied());
            if let Some(commit) = at {
                report.violations.push(Violation {
                    commit,
                    kind: ViolationKind::LogMismatch,
                    description: format!(
                        "log lists {} commits, history has {}",
                        log.len(),
                        walked.len()
                    ),
                });
            }
        }

        Ok(report)
    }
}
