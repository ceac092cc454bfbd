//! Structured observability hooks for decision lifecycle events.
//!
//! Events are emitted at `info!` level (filterable via `RUST_LOG`); a
//! failed resolution is a `warn!` because the decision itself still
//! succeeds (fail-open).

use tracing::{info, warn};

/// Emit event: a build-trigger decision started for a branch.
pub fn emit_decision_started(branch: &str, source_id: &str) {
    info!(event = "decision.started", branch = %branch, source_id = %source_id);
}

/// Emit event: the changeset was resolved with the given commit count.
pub fn emit_changeset_resolved(branch: &str, commit_count: usize) {
    info!(event = "decision.changeset_resolved", branch = %branch, commit_count = commit_count);
}

/// Emit event: the decision completed with a verdict.
pub fn emit_decision_made(branch: &str, build_required: bool) {
    info!(event = "decision.made", branch = %branch, build_required = build_required);
}

/// Emit event: resolution failed and the verdict fell open to "build
/// required".
pub fn emit_decision_failed(branch: &str, error: &dyn std::fmt::Display) {
    warn!(event = "decision.failed_open", branch = %branch, error = %error);
}
