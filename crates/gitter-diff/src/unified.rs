//! Unified diff rendering.

use std::fmt;

use crate::blob_diff::{BlobDiff, DiffLine};

/// A blob diff for one repository path.
///
/// `Display` renders it in unified format:
///
/// ```text
/// --- a/notes.txt
/// +++ b/notes.txt
/// @@ -1,2 +1,3 @@
///  first
///  second
/// +third
/// ```
///
/// Identical content renders as nothing; binary content as a single
/// `Binary files ... differ` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub diff: BlobDiff,
}

impl FileDiff {
    pub fn new(path: impl Into<String>, diff: BlobDiff) -> Self {
        Self {
            path: path.into(),
            diff,
        }
    }

    /// Returns `true` if rendering would produce no output.
    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diff.binary {
            return writeln!(f, "Binary files a/{0} and b/{0} differ", self.path);
        }
        if self.diff.hunks.is_empty() {
            return Ok(());
        }

        writeln!(f, "--- a/{}", self.path)?;
        writeln!(f, "+++ b/{}", self.path)?;
        for hunk in &self.diff.hunks {
            writeln!(
                f,
                "@@ -{} +{} @@",
                format_range(hunk.old_start, hunk.old_count),
                format_range(hunk.new_start, hunk.new_count)
            )?;
            for line in &hunk.lines {
                match line {
                    DiffLine::Context(text) => writeln!(f, " {text}")?,
                    DiffLine::Added(text) => writeln!(f, "+{text}")?,
                    DiffLine::Removed(text) => writeln!(f, "-{text}")?,
                    DiffLine::MissingNewline => writeln!(f, "\\ No newline at end of file")?,
                }
            }
        }
        Ok(())
    }
}

/// Format one side of a hunk header.
///
/// `start` is 1-based. A single line omits the count; an empty side names
/// the line before it, so inserting into an empty file reads `-0,0`.
pub fn format_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start.saturating_sub(1)),
        1 => start.to_string(),
        _ => format!("{start},{count}"),
    }
}
