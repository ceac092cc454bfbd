//! Decision audit trail.
//!
//! Every evaluation appends human-readable lines to a [`Trace`] explaining
//! how the verdict was reached. Lines are mirrored to `tracing` at the
//! matching level; the buffered copy travels with the [`Verdict`] for
//! audit and test assertions, and is never consumed by downstream logic.

use serde::{Deserialize, Serialize};

/// Severity of a single trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

/// One human-readable line of the decision audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLine {
    pub severity: Severity,
    pub message: String,
}

/// Ordered, append-only sink of trace lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    lines: Vec<TraceLine>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an info-level line.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "buildgate::decision", "{message}");
        self.lines.push(TraceLine {
            severity: Severity::Info,
            message,
        });
    }

    /// Append an error-level line.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(target: "buildgate::decision", "{message}");
        self.lines.push(TraceLine {
            severity: Severity::Error,
            message,
        });
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any error-level line was recorded.
    pub fn has_error(&self) -> bool {
        self.lines.iter().any(|l| l.severity == Severity::Error)
    }
}

/// The outcome of one build-trigger evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether an automatic build should be triggered.
    pub build_required: bool,
    /// The audit trail produced during evaluation.
    pub trace: Trace,
}

impl Verdict {
    pub fn lines(&self) -> &[TraceLine] {
        self.trace.lines()
    }
}
