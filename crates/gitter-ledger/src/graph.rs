//! Writing commits and walking the parent chain.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use gitter_refs::RefStore;
use gitter_store::{ObjectStore, Tree};
use gitter_types::ObjectId;
use tracing::info;

use crate::commit::Commit;
use crate::error::{LedgerError, LedgerResult};

/// The linear commit history of one repository.
///
/// Commits live in the object store; HEAD and the audit log live in the ref
/// store.
#[derive(Clone)]
pub struct CommitGraph {
    store: Arc<dyn ObjectStore>,
    refs: Arc<dyn RefStore>,
}

impl std::fmt::Debug for CommitGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitGraph").finish_non_exhaustive()
    }
}

impl CommitGraph {
    pub fn new(store: Arc<dyn ObjectStore>, refs: Arc<dyn RefStore>) -> Self {
        Self { store, refs }
    }

    /// The commit HEAD resolves to, if any.
    pub fn head(&self) -> LedgerResult<Option<ObjectId>> {
        Ok(self.refs.resolve_head()?)
    }

    /// Record `tree_hash` as a new commit on top of HEAD.
    ///
    /// The commit object is stored before HEAD moves; the log entry is
    /// written last.
    pub fn create_commit(
        &self,
        author: &str,
        date: DateTime<FixedOffset>,
        message: &str,
        tree_hash: ObjectId,
    ) -> LedgerResult<Commit> {
        let parent = self.head()?;
        let commit = Commit::new(author, date, message, parent, tree_hash).seal()?;
        let id = commit.id()?;

        self.store.insert(&id, &commit.to_bytes()?)?;
        self.refs.advance_head(&id)?;
        self.refs.append_log(&id)?;

        info!(
            id = %id.short_hex(),
            parent = ?parent.map(|p| p.short_hex()),
            "created commit"
        );
        Ok(commit)
    }

    /// Load a commit by name.
    pub fn read_commit(&self, id: &ObjectId) -> LedgerResult<Commit> {
        let data = self
            .store
            .read(id)?
            .ok_or(LedgerError::CommitNotFound(*id))?;
        Commit::from_bytes(id, &data)
    }

    /// Load the commit HEAD resolves to, if any.
    pub fn head_commit(&self) -> LedgerResult<Option<Commit>> {
        self.head()?.map(|id| self.read_commit(&id)).transpose()
    }

    /// Load a commit's tree. A tree object that cannot be found reads as
    /// empty.
    pub fn read_tree(&self, commit: &Commit) -> LedgerResult<Tree> {
        match self.store.read(&commit.tree_hash)? {
            Some(data) => Ok(Tree::from_bytes(&commit.tree_hash, &data)?),
            None => Ok(Tree::empty()),
        }
    }

    /// Commits from HEAD back to the root, newest first.
    pub fn history(&self) -> LedgerResult<History<'_>> {
        Ok(self.history_from(self.head()?))
    }

    /// Commits from `start` back to the root, newest first.
    pub fn history_from(&self, start: Option<ObjectId>) -> History<'_> {
        History {
            graph: self,
            next: start,
            seen: HashSet::new(),
        }
    }

    /// Returns `true` if an object with this name is stored.
    pub fn has_object(&self, id: &ObjectId) -> LedgerResult<bool> {
        Ok(self.store.exists(id)?)
    }

    /// Hashes recorded in the audit log, oldest first.
    pub fn log_entries(&self) -> LedgerResult<Vec<ObjectId>> {
        Ok(self.refs.read_log()?)
    }
}

/// Iterator over a parent chain. Stops after the first error.
pub struct History<'a> {
    graph: &'a CommitGraph,
    next: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = LedgerResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.seen.insert(id) {
            return Some(Err(LedgerError::Cycle(id)));
        }
        match self.graph.read_commit(&id) {
            Ok(commit) => {
                self.next = commit.parent;
                Some(Ok(commit))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gitter_crypto::ContentHasher;
    use gitter_refs::InMemoryRefStore;
    use gitter_store::{InMemoryObjectStore, TreeEntry};

    fn date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap()
    }

    fn make_graph() -> (Arc<dyn ObjectStore>, Arc<dyn RefStore>, CommitGraph) {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemoryObjectStore::new());
        let refs: Arc<dyn RefStore> = Arc::new(InMemoryRefStore::new());
        let graph = CommitGraph::new(Arc::clone(&store), Arc::clone(&refs));
        (store, refs, graph)
    }

    fn store_tree(store: &dyn ObjectStore, path: &str, content: &[u8]) -> ObjectId {
        let blob = store.write(content).unwrap();
        Tree::new(vec![TreeEntry::new(path, blob)]).store(store).unwrap()
    }

    #[test]
    fn empty_history() {
        let (_store, _refs, graph) = make_graph();
        assert_eq!(graph.head().unwrap(), None);
        assert!(graph.head_commit().unwrap().is_none());
        assert_eq!(graph.history().unwrap().count(), 0);
    }

    #[test]
    fn first_commit_is_root_and_moves_head() {
        let (store, refs, graph) = make_graph();
        let tree = store_tree(store.as_ref(), "a.txt", b"a");
        let commit = graph.create_commit("user", date(), "first", tree).unwrap();

        let id = commit.id().unwrap();
        assert_eq!(commit.parent, None);
        assert_eq!(graph.head().unwrap(), Some(id));
        assert_eq!(refs.read_log().unwrap(), vec![id]);
        assert_eq!(graph.read_commit(&id).unwrap(), commit);
        assert!(store.exists(&id).unwrap());
    }

    #[test]
    fn history_follows_parents_newest_first() {
        let (store, _refs, graph) = make_graph();
        let t1 = store_tree(store.as_ref(), "a.txt", b"1");
        let t2 = store_tree(store.as_ref(), "a.txt", b"2");
        let t3 = store_tree(store.as_ref(), "a.txt", b"3");
        let c1 = graph.create_commit("user", date(), "one", t1).unwrap();
        let c2 = graph.create_commit("user", date(), "two", t2).unwrap();
        let c3 = graph.create_commit("user", date(), "three", t3).unwrap();

        assert_eq!(c2.parent, c1.hash);
        assert_eq!(c3.parent, c2.hash);

        let messages: Vec<String> = graph
            .history()
            .unwrap()
            .map(|c| c.unwrap().message)
            .collect();
        assert_eq!(messages, vec!["three", "two", "one"]);
        assert_eq!(
            graph.log_entries().unwrap(),
            vec![c1.id().unwrap(), c2.id().unwrap(), c3.id().unwrap()]
        );
    }

    #[test]
    fn read_tree_of_commit() {
        let (store, _refs, graph) = make_graph();
        let tree = store_tree(store.as_ref(), "a.txt", b"a");
        let commit = graph.create_commit("user", date(), "m", tree).unwrap();

        let loaded = graph.read_tree(&commit).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries[0].hash, ContentHasher::hash(b"a"));
    }

    #[test]
    fn missing_tree_reads_as_empty() {
        let (_store, _refs, graph) = make_graph();
        let ghost = ContentHasher::hash(b"never stored");
        let commit = graph.create_commit("user", date(), "m", ghost).unwrap();
        assert!(graph.read_tree(&commit).unwrap().is_empty());
    }

    #[test]
    fn missing_commit_stops_history() {
        let (_store, _refs, graph) = make_graph();
        let ghost = ContentHasher::hash(b"ghost");
        let mut history = graph.history_from(Some(ghost));
        assert!(matches!(
            history.next(),
            Some(Err(LedgerError::CommitNotFound(id))) if id == ghost
        ));
        assert!(history.next().is_none());
    }

    #[test]
    fn self_parent_is_reported_as_cycle() {
        let (store, _refs, graph) = make_graph();
        let id = ContentHasher::hash(b"loop");
        let mut commit = Commit::new("user", date(), "loop", Some(id), id);
        commit.hash = Some(id);
        store.insert(&id, &commit.to_bytes().unwrap()).unwrap();

        let results: Vec<_> = graph.history_from(Some(id)).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(LedgerError::Cycle(_))));
    }
}
