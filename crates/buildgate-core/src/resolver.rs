//! Changeset resolution between the last-built and current revisions.

use crate::changeset::{ChangeSet, ChangesetProvider};
use crate::error::{GateError, Result};
use crate::revision::{BranchHead, RevisionRef, SourceContext};

/// Turns `(head, current, last_built)` into the changeset to classify.
///
/// Owner availability is checked up front, revision handles are normalized
/// to native identifiers, and the provider is queried for the range
/// `(last_built, current]`.
pub struct ChangesetResolver<'a> {
    provider: &'a dyn ChangesetProvider,
}

impl<'a> ChangesetResolver<'a> {
    pub fn new(provider: &'a dyn ChangesetProvider) -> Self {
        Self { provider }
    }

    /// Resolve the changeset since the last build.
    ///
    /// `last_seen` is accepted for host interface compatibility only and
    /// takes no part in the range query. A `None` `last_built` means first
    /// build on this branch; the provider then returns the full history
    /// reachable from `current`.
    pub fn resolve(
        &self,
        ctx: &SourceContext,
        head: &BranchHead,
        current: &RevisionRef,
        last_built: Option<&RevisionRef>,
        last_seen: Option<&RevisionRef>,
    ) -> Result<ChangeSet> {
        let _ = last_seen;

        let owner = ctx.owner.as_ref().ok_or(GateError::OwnerUnavailable)?;

        let current_id = current.to_native_id()?;
        let baseline = last_built.map(RevisionRef::to_native_id).transpose()?;

        tracing::debug!(
            source_id = %ctx.source_id,
            branch = %head.name,
            current = %current_id,
            baseline = baseline.as_deref().unwrap_or("<none>"),
            "resolving changeset",
        );

        self.provider
            .list_commits(owner, head, &current_id, baseline.as_deref())
    }
}
