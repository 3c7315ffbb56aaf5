use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use gitter_crypto::ContentHasher;
use gitter_diff::{diff_blobs, FileDiff};
use gitter_index::{Index, WorkdirStatus, INDEX_FILE};
use gitter_ledger::{Commit, CommitGraph, HistoryValidator, ValidationReport};
use gitter_refs::{FsRefStore, RefStore};
use gitter_store::{FsObjectStore, ObjectStore, Tree};
use tracing::{debug, info, warn};

use crate::commit::{AddReport, CommitResult};
use crate::config::{Config, CONFIG_FILE};
use crate::error::{SdkError, SdkResult};
use crate::workdir::{self, Candidate};

/// Name of the metadata directory at the working root.
pub const GITTER_DIR: &str = ".gitter";

const OBJECTS_DIR: &str = "objects";

/// A located repository.
///
/// Holds the working root, the metadata directory, the directory relative
/// path arguments are resolved against, the loaded configuration and the
/// storage backends.
#[derive(Clone)]
pub struct Repository {
    workdir: PathBuf,
    git_dir: PathBuf,
    cwd: PathBuf,
    config: Config,
    store: Arc<dyn ObjectStore>,
    refs: Arc<dyn RefStore>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("workdir", &self.workdir)
            .field("cwd", &self.cwd)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Create a new repository in `dir`, creating `dir` if needed.
    ///
    /// Fails with [`SdkError::AlreadyInitialized`] if `dir` already holds a
    /// metadata directory.
    pub fn init(dir: impl AsRef<Path>) -> SdkResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let workdir = fs::canonicalize(dir)?;
        let git_dir = workdir.join(GITTER_DIR);
        if git_dir.exists() {
            return Err(SdkError::AlreadyInitialized(workdir));
        }

        fs::create_dir(&git_dir)?;
        let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::create(git_dir.join(OBJECTS_DIR))?);
        FsRefStore::init(&git_dir)?;
        Index::new(store).save(&git_dir.join(INDEX_FILE))?;

        info!(path = %workdir.display(), "initialized repository");
        Self::open(workdir.clone(), workdir)
    }

    /// Find the repository containing `start` by searching it and each of its
    /// ancestors for a metadata directory. `start` becomes the directory that
    /// relative path arguments are resolved against.
    pub fn discover(start: impl AsRef<Path>) -> SdkResult<Self> {
        let start = start.as_ref();
        let cwd = fs::canonicalize(start).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SdkError::NotARepository(start.to_path_buf()),
            _ => SdkError::Io(e),
        })?;

        let workdir = cwd
            .ancestors()
            .find(|dir| dir.join(GITTER_DIR).is_dir())
            .map(Path::to_path_buf)
            .ok_or_else(|| SdkError::NotARepository(cwd.clone()))?;

        debug!(workdir = %workdir.display(), cwd = %cwd.display(), "discovered repository");
        Self::open(workdir, cwd)
    }

    fn open(workdir: PathBuf, cwd: PathBuf) -> SdkResult<Self> {
        let git_dir = workdir.join(GITTER_DIR);
        let config = Config::load(&git_dir.join(CONFIG_FILE))?;
        let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::open(git_dir.join(OBJECTS_DIR)));
        let refs: Arc<dyn RefStore> = Arc::new(FsRefStore::open(&git_dir));
        Ok(Self {
            workdir,
            git_dir,
            cwd,
            config,
            store,
            refs,
        })
    }

    /// Resolve relative path arguments against `cwd` instead.
    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> SdkResult<Self> {
        self.cwd = fs::canonicalize(cwd)?;
        Ok(self)
    }

    // ---- Accessors ----

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
    pub fn refs(&self) -> &Arc<dyn RefStore> {
        &self.refs
    }

    pub fn graph(&self) -> CommitGraph {
        CommitGraph::new(Arc::clone(&self.store), Arc::clone(&self.refs))
    }

    fn index_path(&self) -> PathBuf {
        self.git_dir.join(INDEX_FILE)
    }

    /// Load the index from disk.
    pub fn index(&self) -> SdkResult<Index> {
        Ok(Index::load(&self.index_path(), Arc::clone(&self.store))?)
    }

    // ---- Staging ----

    /// Stage files. Each argument is a path or a glob relative to the
    /// invocation directory.
    ///
    /// Missing paths and directories are skipped. A file that cannot be
    /// staged is recorded in [`AddReport::failed`] and the rest still go
    /// through; the index is saved either way.
    pub fn add<S: AsRef<str>>(&self, args: &[S]) -> SdkResult<AddReport> {
        let mut index = self.index()?;
        let mut report = AddReport::default();

        for arg in args {
            let arg = arg.as_ref();
            match workdir::expand(&self.cwd, arg) {
                Ok(candidates) => {
                    for candidate in candidates {
                        self.stage_candidate(&mut index, candidate, &mut report);
                    }
                }
                Err(e) => report.failed.push((arg.to_string(), e)),
            }
        }

        index.save(&self.index_path())?;
        debug!(
            staged = report.staged.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "add finished"
        );
        Ok(report)
    }

    fn stage_candidate(&self, index: &mut Index, candidate: Candidate, report: &mut AddReport) {
        let Candidate { label, path } = candidate;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                debug!(path = %label, "skipping non-file");
                report.skipped.push(label);
                return;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %label, "skipping missing file");
                report.skipped.push(label);
                return;
            }
            Err(e) => {
                report.failed.push((label, e.into()));
                return;
            }
        }

        let staged = workdir::relative_path(&self.workdir, &path).and_then(|rel| {
            let content = fs::read(&path)?;
            index.stage_file(&rel, &content)?;
            Ok(rel)
        });
        match staged {
            Ok(rel) => report.staged.push(rel),
            Err(e) => report.failed.push((label, e)),
        }
    }

    // ---- Committing ----

    /// Record everything staged as a new commit, timestamped now.
    ///
    /// With `all`, every tracked file still present in the working tree is
    /// staged again first; untracked files are left alone.
    pub fn commit(&self, message: &str, all: bool) -> SdkResult<CommitResult> {
        self.commit_at(message, all, Local::now().into())
    }

    /// [`commit`](Self::commit) with an explicit timestamp.
    pub fn commit_at(
        &self,
        message: &str,
        all: bool,
        date: DateTime<FixedOffset>,
    ) -> SdkResult<CommitResult> {
        let mut index = self.index()?;

        if all {
            for file in workdir::walk_files(&self.workdir)? {
                let rel = workdir::relative_path(&self.workdir, &file)?;
                if index.contains(&rel) {
                    index.stage_file(&rel, &fs::read(&file)?)?;
                }
            }
        }

        if !index.has_staged() {
            return Err(SdkError::NothingToCommit);
        }

        let tree_hash = index.write_tree()?;
        let branch = self.refs.head()?.branch_name().map(str::to_owned);
        let commit = self
            .graph()
            .create_commit(&self.config.user.name, date, message, tree_hash)?;

        index.unstage_all();
        index.save(&self.index_path())?;

        Ok(CommitResult { commit, branch })
    }

    // ---- Inspection ----

    /// Every working-tree file with the digest of its current content, in
    /// traversal order.
    fn working_hashes(&self) -> SdkResult<Vec<(String, gitter_types::ObjectId)>> {
        workdir::walk_files(&self.workdir)?
            .into_iter()
            .map(|file| {
                let rel = workdir::relative_path(&self.workdir, &file)?;
                Ok((rel, ContentHasher::hash_file(&file)?))
            })
            .collect()
    }

    /// Classify working-tree files against the index.
    pub fn status(&self) -> SdkResult<WorkdirStatus> {
        let index = self.index()?;
        Ok(index.status(&self.working_hashes()?))
    }

    /// Diff working-tree files against the HEAD commit.
    ///
    /// `path` may name a file or a directory relative to the invocation
    /// directory; `None` covers the whole working tree. A path that does not
    /// exist produces no diffs. Files whose content matches HEAD are omitted,
    /// and a file that cannot be diffed is logged and skipped.
    pub fn diff(&self, path: Option<&str>) -> SdkResult<Vec<FileDiff>> {
        let graph = self.graph();
        let head = graph.head_commit()?.ok_or(SdkError::NoCommitsYet)?;
        let tree = graph.read_tree(&head).unwrap_or_else(|e| {
            warn!(tree = %head.tree_hash, error = %e, "unreadable tree, diffing against empty");
            Tree::empty()
        });

        let candidates = match path {
            None => workdir::walk_files(&self.workdir)?,
            Some(p) => {
                let target = workdir::normalize(&self.cwd.join(p));
                if !target.starts_with(&self.workdir) {
                    return Err(SdkError::InvalidPath(format!(
                        "{p} is outside the repository"
                    )));
                }
                match fs::metadata(&target) {
                    Ok(meta) if meta.is_dir() => workdir::walk_files(&target)?,
                    Ok(_) => vec![target],
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let mut diffs = Vec::new();
        for file in candidates {
            match self.diff_file(&tree, &file) {
                Ok(Some(diff)) => diffs.push(diff),
                Ok(None) => {}
                Err(e) => warn!(path = %file.display(), error = %e, "skipping path in diff"),
            }
        }
        Ok(diffs)
    }

    /// Diff one working-tree file against its entry in `tree`. `None` when
    /// the file vanished or is unchanged.
    fn diff_file(&self, tree: &Tree, file: &Path) -> SdkResult<Option<FileDiff>> {
        let rel = workdir::relative_path(&self.workdir, file)?;
        let after = match fs::read(file) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let before = match tree.get(&rel) {
            Some(entry) => self.store.get(&entry.hash)?,
            None => Vec::new(),
        };

        let diff = FileDiff::new(rel, diff_blobs(&before, &after, self.config.diff.context));
        Ok((!diff.is_empty()).then_some(diff))
    }

    /// Commits from HEAD back to the root, newest first. Empty before the
    /// first commit.
    pub fn log(&self) -> SdkResult<Vec<Commit>> {
        let graph = self.graph();
        let history = graph.history()?;
        Ok(history.collect::<Result<Vec<_>, _>>()?)
    }

    /// Re-check commit names, parent links, trees and the audit log.
    pub fn verify(&self) -> SdkResult<ValidationReport> {
        Ok(HistoryValidator::validate(&self.graph())?)
    }
}
