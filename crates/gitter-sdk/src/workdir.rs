//! Working-tree traversal and path handling.
//!
//! Repository-relative paths are always `/`-separated strings. Absolute paths
//! handed to these helpers are expected to share the canonical prefix of the
//! working root, which is how [`Repository`](crate::Repository) builds them.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{SdkError, SdkResult};
use crate::repository::GITTER_DIR;

/// One path an `add` argument resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// How the path is reported back to the user.
    pub label: String,
    /// Absolute path.
    pub path: PathBuf,
}

/// Returns `true` if the argument should be expanded as a glob.
pub fn is_glob(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Resolve one `add` argument against `cwd`.
///
/// Globs are expanded (non-recursively unless the pattern says `**`); a
/// pattern that matches nothing yields no candidates. Anything else is taken
/// literally, whether or not it exists.
pub fn expand(cwd: &Path, arg: &str) -> SdkResult<Vec<Candidate>> {
    if !is_glob(arg) {
        return Ok(vec![Candidate {
            label: arg.to_string(),
            path: normalize(&cwd.join(arg)),
        }]);
    }

    let pattern = if Path::new(arg).is_absolute() {
        arg.to_string()
    } else {
        let base = cwd
            .to_str()
            .ok_or_else(|| SdkError::InvalidPath(cwd.display().to_string()))?;
        format!("{}/{arg}", Pattern::escape(base))
    };

    let matches =
        glob::glob(&pattern).map_err(|e| SdkError::InvalidPath(format!("{arg}: {e}")))?;

    let mut candidates = Vec::new();
    for entry in matches {
        match entry {
            Ok(path) => {
                let label = path
                    .strip_prefix(cwd)
                    .map(to_slash)
                    .unwrap_or_else(|_| path.display().to_string());
                candidates.push(Candidate {
                    label,
                    path: normalize(&path),
                });
            }
            Err(e) => warn!(pattern = arg, error = %e, "skipping unreadable glob match"),
        }
    }
    Ok(candidates)
}

/// Every regular file under `dir`, skipping metadata directories, sorted by
/// file name within each directory.
pub fn walk_files(dir: &Path) -> SdkResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != GITTER_DIR)
    {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => SdkError::Io(io),
            None => SdkError::InvalidPath(format!("filesystem loop under {}", dir.display())),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// The repository-relative form of an absolute path.
///
/// Fails for paths outside `workdir`, for the working root itself, and for
/// anything inside the metadata directory.
pub fn relative_path(workdir: &Path, path: &Path) -> SdkResult<String> {
    let normalized = normalize(path);
    let rel = normalized
        .strip_prefix(workdir)
        .map_err(|_| SdkError::InvalidPath(format!("{} is outside the repository", path.display())))?;

    match rel.components().next() {
        None => Err(SdkError::InvalidPath(format!(
            "{} is the repository root",
            path.display()
        ))),
        Some(Component::Normal(first)) if first == GITTER_DIR => Err(SdkError::InvalidPath(
            format!("{} is inside the metadata directory", path.display()),
        )),
        Some(_) => Ok(to_slash(rel)),
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
