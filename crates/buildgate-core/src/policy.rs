//! Strategy configuration and the normalized author ignore-list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable configuration for one strategy instance.
///
/// Supplied at construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Comma-separated list of author emails whose commits should not, by
    /// themselves, trigger a build.
    pub ignored_authors: String,

    /// When true, the presence of at least one non-ignored author in the
    /// changeset is sufficient to require a build, regardless of ignored
    /// authors also present.
    pub allow_build_if_not_excluded_author: bool,

    /// When true, only the most recent commit (the branch tip) is
    /// classified.
    #[serde(default)]
    pub check_only_head: bool,
}

impl Policy {
    pub fn new(ignored_authors: impl Into<String>, allow_build_if_not_excluded_author: bool) -> Self {
        Self {
            ignored_authors: ignored_authors.into(),
            allow_build_if_not_excluded_author,
            check_only_head: false,
        }
    }

    /// Restrict classification to the branch tip commit.
    pub fn with_check_only_head(mut self, check_only_head: bool) -> Self {
        self.check_only_head = check_only_head;
        self
    }

    /// Parse the configured ignore string into a normalized ignore-list.
    pub fn ignore_list(&self) -> IgnoreList {
        IgnoreList::parse(&self.ignored_authors)
    }
}

/// Normalized set of ignored author emails.
///
/// Entries are trimmed and lower-cased once at parse time; membership tests
/// normalize the candidate the same way, so lookups are case- and
/// whitespace-insensitive. Duplicates are harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<String>,
}

impl IgnoreList {
    /// Split a comma-separated ignore string into normalized entries.
    /// Empty segments are dropped.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Case- and whitespace-insensitive membership test.
    pub fn contains(&self, author_email: &str) -> bool {
        let normalized = author_email.trim().to_lowercase();
        self.entries.iter().any(|e| *e == normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl fmt::Display for IgnoreList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.entries.join(", "))
    }
}
