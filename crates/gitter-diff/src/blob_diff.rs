//! Blob-level diff: line-by-line comparison of file contents.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce structured
//! hunks with context lines.

use std::borrow::Cow;

use similar::{ChangeTag, TextDiff};

/// Context lines shown around each change unless configured otherwise.
pub const DEFAULT_CONTEXT: usize = 2;

/// The result of diffing two blobs (file contents).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobDiff {
    /// The diff hunks. Empty for identical or binary content.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the old content.
    pub old_lines: usize,
    /// Total number of lines in the new content.
    pub new_lines: usize,
    /// Set when either side is not UTF-8 and the contents differ.
    pub binary: bool,
}

impl BlobDiff {
    /// Returns `true` if the two blobs are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty() && !self.binary
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line number in the old content where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old content in this hunk.
    pub old_count: usize,
    /// Line number in the new content where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new content in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk, without its line terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both old and new (context).
    Context(String),
    /// A line added in the new content.
    Added(String),
    /// A line removed from the old content.
    Removed(String),
    /// The preceding line is the last one and has no line terminator.
    MissingNewline,
}

/// Compute a line-by-line diff between two byte slices, keeping `context`
/// unchanged lines around each change.
///
/// A last line without a trailing newline is compared as if it had one, so
/// appending to such a file reads as a pure insertion. When the two sides
/// differ only in that final newline, the last line is reported as replaced
/// and the side lacking the newline is marked with
/// [`DiffLine::MissingNewline`]. Content that is not valid UTF-8 yields a
/// hunk-less diff flagged `binary`.
pub fn diff_blobs(old: &[u8], new: &[u8], context: usize) -> BlobDiff {
    let (old_str, new_str) = match (std::str::from_utf8(old), std::str::from_utf8(new)) {
        (Ok(o), Ok(n)) => (terminated(o), terminated(n)),
        _ => {
            return BlobDiff {
                hunks: Vec::new(),
                old_lines: 0,
                new_lines: 0,
                binary: old != new,
            }
        }
    };

    let old_lines = old_str.lines().count();
    let new_lines = new_str.lines().count();

    if old_str == new_str {
        let hunks = if old == new {
            Vec::new()
        } else {
            vec![final_newline_hunk(
                &old_str,
                old.ends_with(b"\n"),
                new.ends_with(b"\n"),
                context,
            )]
        };
        return BlobDiff {
            hunks,
            old_lines,
            new_lines,
            binary: false,
        };
    }

    let text_diff = TextDiff::from_lines(old_str.as_ref(), new_str.as_ref());
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(context) {
        let (first, last) = match (group.first(), group.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    BlobDiff {
        hunks,
        old_lines,
        new_lines,
        binary: false,
    }
}

/// Hunk for two texts whose lines are equal but whose final newline differs.
/// `text` is the normalized content shared by both sides.
fn final_newline_hunk(
    text: &str,
    old_terminated: bool,
    new_terminated: bool,
    context: usize,
) -> DiffHunk {
    let all: Vec<&str> = text.lines().collect();
    let (last, rest) = match all.split_last() {
        Some((last, rest)) => (*last, rest),
        None => ("", &[][..]),
    };
    let shown = context.min(rest.len());
    let start = rest.len() - shown + 1;

    let mut lines: Vec<DiffLine> = rest[rest.len() - shown..]
        .iter()
        .map(|l| DiffLine::Context((*l).to_string()))
        .collect();
    lines.push(DiffLine::Removed(last.to_string()));
    if !old_terminated {
        lines.push(DiffLine::MissingNewline);
    }
    lines.push(DiffLine::Added(last.to_string()));
    if !new_terminated {
        lines.push(DiffLine::MissingNewline);
    }

    DiffHunk {
        old_start: start,
        old_count: shown + 1,
        new_start: start,
        new_count: shown + 1,
        lines,
    }
}

fn terminated(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_blobs_no_diff() {
        let content = b"hello\nworld\n";
        let diff = diff_blobs(content, content, DEFAULT_CONTEXT);
        assert!(diff.is_empty());
        assert_eq!(diff.additions(), 0);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn added_final_newline_is_a_change() {
        let diff = diff_blobs(b"a\nb", b"a\nb\n", DEFAULT_CONTEXT);
        assert!(!diff.is_empty());
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (1, 2));
        assert_eq!((hunk.new_start, hunk.new_count), (1, 2));
        assert_eq!(
            hunk.lines,
            vec![
                DiffLine::Context("a".into()),
                DiffLine::Removed("b".into()),
                DiffLine::MissingNewline,
                DiffLine::Added("b".into()),
            ]
        );
    }

    #[test]
    fn removed_final_newline_marks_new_side() {
        let diff = diff_blobs(b"only\n", b"only", 0);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
        assert_eq!(
            diff.hunks[0].lines,
            vec![
                DiffLine::Removed("only".into()),
                DiffLine::Added("only".into()),
                DiffLine::MissingNewline,
            ]
        );
        assert_eq!((diff.hunks[0].old_start, diff.hunks[0].old_count), (1, 1));
    }

    #[test]
    fn append_without_trailing_newline_is_pure_insertion() {
        let diff = diff_blobs(b"Hello World", b"Hello World\nNew line", DEFAULT_CONTEXT);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 0);
        assert_eq!(
            diff.hunks[0].lines,
            vec![
                DiffLine::Context("Hello World".into()),
                DiffLine::Added("New line".into()),
            ]
        );
    }

    #[test]
    fn single_line_deletion() {
        let diff = diff_blobs(b"line1\nline2\nline3\n", b"line1\nline3\n", DEFAULT_CONTEXT);
        assert_eq!(diff.deletions(), 1);
        assert_eq!(diff.additions(), 0);
    }

    #[test]
    fn modification_shows_remove_and_add() {
        let diff = diff_blobs(b"hello world\n", b"hello universe\n", DEFAULT_CONTEXT);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn empty_to_content() {
        let diff = diff_blobs(b"", b"new content\n", DEFAULT_CONTEXT);
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (1, 0));
        assert_eq!((hunk.new_start, hunk.new_count), (1, 1));
    }

    #[test]
    fn content_to_empty() {
        let diff = diff_blobs(b"old content\n", b"", DEFAULT_CONTEXT);
        assert_eq!(diff.deletions(), 1);
        assert_eq!(diff.new_lines, 0);
    }

    #[test]
    fn binary_content_detection() {
        let diff = diff_blobs(&[0u8, 1, 0xFF, 0xFE], &[4u8, 0xFF, 0xFD], DEFAULT_CONTEXT);
        assert!(diff.binary);
        assert!(!diff.is_empty());
        assert!(diff.hunks.is_empty());
    }

    #[test]
    fn identical_binary_is_empty() {
        let bytes = [0u8, 0xFF, 0xFE];
        assert!(diff_blobs(&bytes, &bytes, DEFAULT_CONTEXT).is_empty());
    }

    #[test]
    fn hunk_covers_context_window() {
        let old = b"a\nb\nc\nd\ne\nf\ng\n";
        let new = b"a\nb\nc\nX\ne\nf\ng\n";
        let diff = diff_blobs(old, new, 2);

        assert_eq!(diff.hunks.len(), 1);
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (2, 5));
        assert_eq!((hunk.new_start, hunk.new_count), (2, 5));
        assert_eq!(hunk.lines.first(), Some(&DiffLine::Context("b".into())));
        assert_eq!(hunk.lines.last(), Some(&DiffLine::Context("f".into())));
    }

    #[test]
    fn distant_changes_split_into_hunks() {
        let old = b"1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";
        let new = b"X\n2\n3\n4\n5\n6\n7\n8\n9\nY\n";
        assert_eq!(diff_blobs(old, new, 2).hunks.len(), 2);
        assert_eq!(diff_blobs(old, new, 5).hunks.len(), 1);
    }

    #[test]
    fn zero_context_has_only_changes() {
        let diff = diff_blobs(b"a\nb\nc\n", b"a\nX\nc\n", 0);
        assert!(diff.hunks[0]
            .lines
            .iter()
            .all(|l| !matches!(l, DiffLine::Context(_))));
    }
}
