//! Changeset records and the provider seam.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::revision::{BranchHead, OwnerHandle};

/// One entry in a changeset: a commit's identity and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Opaque commit identifier, e.g. a content hash.
    pub commit_id: String,
    /// Author identity as recorded by the version-control system.
    pub author_email: String,
    /// Author timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    pub fn new(
        commit_id: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            commit_id: commit_id.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }
}

/// An ordered sequence of commits, most-recent-first.
///
/// The first element is the branch tip. Constructed fresh per decision and
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    commits: Vec<Commit>,
}

impl ChangeSet {
    /// Wrap an already-ordered (most-recent-first) commit sequence.
    pub fn new(commits: Vec<Commit>) -> Self {
        Self { commits }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The branch tip, if the changeset is non-empty.
    pub fn head(&self) -> Option<&Commit> {
        self.commits.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// External collaborator that lists the commits in a revision range.
///
/// Implementations query the backing version-control system for the range
/// `(baseline, current]`, most-recent commit first. A `None` baseline means
/// "first build on this branch": the full history reachable from `current`.
///
/// Synchronous by design; the host invokes one evaluation per trigger
/// check and any timeout is the provider's own concern.
pub trait ChangesetProvider {
    fn list_commits(
        &self,
        owner: &OwnerHandle,
        head: &BranchHead,
        current: &str,
        baseline: Option<&str>,
    ) -> Result<ChangeSet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, author: &str) -> Commit {
        Commit::new(id, author, Utc::now())
    }

    #[test]
    fn head_is_first_commit() {
        let cs = ChangeSet::new(vec![commit("c2", "a@x.com"), commit("c1", "b@x.com")]);
        assert_eq!(cs.head().unwrap().commit_id, "c2");
        assert_eq!(cs.len(), 2);
    }

    #[test]
    fn empty_changeset_has_no_head() {
        let cs = ChangeSet::empty();
        assert!(cs.head().is_none());
        assert!(cs.is_empty());
    }

    #[test]
    fn iteration_preserves_order() {
        let cs = ChangeSet::new(vec![commit("c3", "a@x.com"), commit("c2", "b@x.com")]);
        let ids: Vec<&str> = cs.iter().map(|c| c.commit_id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c2"]);
    }
}
