//! Error taxonomy for build-trigger decisions.
//!
//! Every variant here is converted to a "build required" verdict at the
//! strategy boundary (fail-open): an internal failure must never silently
//! suppress a build.

/// Errors produced while resolving a changeset for a build decision.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The owner context needed to construct a version-control client is
    /// missing.
    #[error("source owner is unavailable")]
    OwnerUnavailable,

    /// No version-control client could be constructed for this
    /// source/head/revision combination.
    #[error("changeset client is unavailable: {0}")]
    ClientUnavailable(String),

    /// A foreign revision handle's string form is too short to degrade to
    /// a native identifier prefix.
    #[error("malformed revision '{repr}': need at least {min_len} characters")]
    MalformedRevision { repr: String, min_len: usize },

    /// Any other failure raised by the changeset provider while querying
    /// or parsing the revision range.
    #[error("changeset provider error: {0}")]
    Provider(String),
}

/// Result type for buildgate operations.
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GateError::OwnerUnavailable;
        assert!(err.to_string().contains("owner is unavailable"));

        let err = GateError::ClientUnavailable("unsupported backend".to_string());
        assert!(err.to_string().contains("unsupported backend"));

        let err = GateError::Provider("git log failed".to_string());
        assert!(err.to_string().contains("git log failed"));
    }

    #[test]
    fn test_malformed_revision_display() {
        let err = GateError::MalformedRevision {
            repr: "abc123".to_string(),
            min_len: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("40"));
    }
}
