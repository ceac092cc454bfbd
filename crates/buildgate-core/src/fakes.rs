//! In-memory fakes for the changeset provider (testing only)
//!
//! Provides `StaticChangesetProvider` and `FailingChangesetProvider` that
//! satisfy the [`ChangesetProvider`] contract without any version-control
//! backend.

use std::sync::Mutex;

use crate::changeset::{ChangeSet, ChangesetProvider, Commit};
use crate::error::{GateError, Result};
use crate::revision::{BranchHead, OwnerHandle};

/// Provider that returns a canned changeset regardless of the range and
/// records the last query it received.
#[derive(Debug, Default)]
pub struct StaticChangesetProvider {
    commits: Vec<Commit>,
    last_query: Mutex<Option<(String, Option<String>)>>,
}

impl StaticChangesetProvider {
    pub fn new(commits: Vec<Commit>) -> Self {
        Self {
            commits,
            last_query: Mutex::new(None),
        }
    }

    /// The `(current, baseline)` pair of the most recent query, if any.
    pub fn last_query(&self) -> Option<(String, Option<String>)> {
        self.last_query.lock().unwrap().clone()
    }
}

impl ChangesetProvider for StaticChangesetProvider {
    fn list_commits(
        &self,
        _owner: &OwnerHandle,
        _head: &BranchHead,
        current: &str,
        baseline: Option<&str>,
    ) -> Result<ChangeSet> {
        *self.last_query.lock().unwrap() =
            Some((current.to_string(), baseline.map(str::to_string)));
        Ok(ChangeSet::new(self.commits.clone()))
    }
}

/// Which error a [`FailingChangesetProvider`] raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Client construction fails, e.g. an unsupported backend.
    ClientUnavailable,
    /// The range query itself blows up.
    Provider,
}

/// Provider that fails every query with a configurable error.
#[derive(Debug)]
pub struct FailingChangesetProvider {
    mode: FailureMode,
}

impl FailingChangesetProvider {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }
}

impl ChangesetProvider for FailingChangesetProvider {
    fn list_commits(
        &self,
        _owner: &OwnerHandle,
        _head: &BranchHead,
        _current: &str,
        _baseline: Option<&str>,
    ) -> Result<ChangeSet> {
        match self.mode {
            FailureMode::ClientUnavailable => Err(GateError::ClientUnavailable(
                "unsupported backend for source".to_string(),
            )),
            FailureMode::Provider => {
                Err(GateError::Provider("changeset query failed".to_string()))
            }
        }
    }
}
