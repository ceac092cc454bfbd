//! Strategy entry point: the host-framework boundary.
//!
//! [`IgnoreCommitterStrategy::decide`] is the single outward surface. It
//! resolves the changeset, runs the verdict engine, and maps every
//! internal error to `build_required = true` with an error trace line:
//! the fail-open contract prefers an unnecessary build over a missed one.

use crate::changeset::ChangesetProvider;
use crate::engine;
use crate::error::Result;
use crate::obs;
use crate::policy::Policy;
use crate::revision::{BranchHead, RevisionRef, SourceContext};
use crate::trace::{Trace, Verdict};

/// Build-trigger strategy driven by an author ignore-list.
#[derive(Debug, Clone)]
pub struct IgnoreCommitterStrategy {
    policy: Policy,
}

impl IgnoreCommitterStrategy {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decide whether an automatic build is required.
    ///
    /// Never fails and never panics: any resolution or query error is
    /// recorded on the trace and converted to a positive verdict.
    pub fn decide(
        &self,
        provider: &dyn ChangesetProvider,
        ctx: &SourceContext,
        head: &BranchHead,
        current: &RevisionRef,
        last_built: Option<&RevisionRef>,
        last_seen: Option<&RevisionRef>,
    ) -> Verdict {
        obs::emit_decision_started(&head.name, &ctx.source_id);
        let mut trace = Trace::new();

        let build_required =
            match self.try_decide(provider, ctx, head, current, last_built, last_seen, &mut trace)
            {
                Ok(build_required) => build_required,
                Err(err) => {
                    trace.error(format!("{err}, build required"));
                    obs::emit_decision_failed(&head.name, &err);
                    true
                }
            };

        obs::emit_decision_made(&head.name, build_required);
        Verdict {
            build_required,
            trace,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_decide(
        &self,
        provider: &dyn ChangesetProvider,
        ctx: &SourceContext,
        head: &BranchHead,
        current: &RevisionRef,
        last_built: Option<&RevisionRef>,
        last_seen: Option<&RevisionRef>,
        trace: &mut Trace,
    ) -> Result<bool> {
        let resolver = crate::resolver::ChangesetResolver::new(provider);
        let changeset = resolver.resolve(ctx, head, current, last_built, last_seen)?;
        obs::emit_changeset_resolved(&head.name, changeset.len());

        Ok(engine::evaluate(&changeset, &self.policy, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changeset::Commit;
    use crate::fakes::{FailingChangesetProvider, FailureMode, StaticChangesetProvider};
    use crate::revision::OwnerHandle;
    use crate::trace::Severity;
    use chrono::Utc;

    fn ctx() -> SourceContext {
        SourceContext::new("origin", Some(OwnerHandle::new("pipeline")))
    }

    fn current() -> RevisionRef {
        RevisionRef::native("a".repeat(40))
    }

    #[test]
    fn decides_from_resolved_changeset() {
        let provider = StaticChangesetProvider::new(vec![Commit::new(
            "c1",
            "dev@example.com",
            Utc::now(),
        )]);
        let strategy = IgnoreCommitterStrategy::new(Policy::new("bot@example.com", false));

        let verdict = strategy.decide(
            &provider,
            &ctx(),
            &BranchHead::new("main"),
            &current(),
            None,
            None,
        );
        assert!(verdict.build_required);
        assert!(!verdict.trace.has_error());
    }

    #[test]
    fn provider_failure_fails_open_with_error_line() {
        let provider = FailingChangesetProvider::new(FailureMode::Provider);
        let strategy = IgnoreCommitterStrategy::new(Policy::new("bot@example.com", false));

        let verdict = strategy.decide(
            &provider,
            &ctx(),
            &BranchHead::new("main"),
            &current(),
            None,
            None,
        );
        assert!(verdict.build_required);
        assert_eq!(verdict.lines().len(), 1);
        assert_eq!(verdict.lines()[0].severity, Severity::Error);
    }

    #[test]
    fn decision_is_idempotent() {
        let provider = StaticChangesetProvider::new(vec![
            Commit::new("c2", "bot@example.com", Utc::now()),
            Commit::new("c1", "dev@example.com", Utc::now()),
        ]);
        let strategy = IgnoreCommitterStrategy::new(Policy::new("bot@example.com", true));

        let first = strategy.decide(
            &provider,
            &ctx(),
            &BranchHead::new("main"),
            &current(),
            None,
            None,
        );
        let second = strategy.decide(
            &provider,
            &ctx(),
            &BranchHead::new("main"),
            &current(),
            None,
            None,
        );
        assert_eq!(first, second);
    }
}
