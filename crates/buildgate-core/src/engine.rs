//! Verdict engine.
//!
//! Classifies each commit's author against the normalized ignore-list and
//! applies the precedence policy to produce the boolean verdict, recording
//! an audit line for every decisive step. Pure: same changeset and policy
//! always yield the same verdict and the same trace content.

use crate::changeset::{ChangeSet, Commit};
use crate::policy::{IgnoreList, Policy};
use crate::trace::Trace;

/// Decide whether the changeset requires a build.
///
/// With `check_only_head` set and a non-empty changeset, only the branch
/// tip is classified. Otherwise the scan walks most-recent-first and
/// short-circuits at the first decisive commit:
///
/// * ignored author, non-ignored-author builds not allowed — verdict false
/// * non-ignored author, non-ignored-author builds allowed — verdict true
///
/// A scan that exhausts without deciding (including the empty changeset)
/// yields the negation of `allow_build_if_not_excluded_author`: every
/// commit was uniformly non-decisive.
pub fn evaluate(changeset: &ChangeSet, policy: &Policy, trace: &mut Trace) -> bool {
    let ignore_list = policy.ignore_list();
    trace.info(format!("ignored authors: {ignore_list}"));

    let allow = policy.allow_build_if_not_excluded_author;

    if policy.check_only_head {
        if let Some(head) = changeset.head() {
            return classify_head(head, &ignore_list, allow, trace);
        }
        // Empty changeset: fall through to the exhaustion result below.
    }

    for commit in changeset.iter() {
        let ignored = ignore_list.contains(&commit.author_email);

        if ignored && !allow {
            trace.info(format!(
                "changeset contains ignored author {} ({}), build not required",
                commit.author_email, commit.commit_id,
            ));
            return false;
        }

        if !ignored && allow {
            trace.info(format!(
                "changeset contains non-ignored author {} ({}), build required",
                commit.author_email, commit.commit_id,
            ));
            return true;
        }
    }

    // Exhausted: either every author was ignored (allow = true) or every
    // author was non-ignored (allow = false, vacuously so when empty).
    trace.info(format!(
        "all commits in the changeset are by {} authors, build {}",
        if allow { "ignored" } else { "non-ignored" },
        if allow { "not required" } else { "required" },
    ));
    !allow
}

fn classify_head(head: &Commit, ignore_list: &IgnoreList, allow: bool, trace: &mut Trace) -> bool {
    let ignored = ignore_list.contains(&head.author_email);

    match (ignored, allow) {
        (true, false) => {
            trace.info(format!(
                "HEAD commit is by ignored author {} ({}), build not required",
                head.author_email, head.commit_id,
            ));
            false
        }
        (true, true) => {
            // Only the tip is examined, so no other commit can supply a
            // non-ignored author.
            trace.info(format!(
                "HEAD commit is by ignored author {} ({}) and no other commit is considered, build not required",
                head.author_email, head.commit_id,
            ));
            false
        }
        (false, true) => {
            trace.info(format!(
                "HEAD commit is by non-ignored author {} ({}), build required",
                head.author_email, head.commit_id,
            ));
            true
        }
        (false, false) => {
            trace.info(format!(
                "HEAD commit is by non-ignored author {} ({}), no ignored author present, build required",
                head.author_email, head.commit_id,
            ));
            true
        }
    }
}
