//! Buildgate Core Library
//!
//! Decides whether the changeset between a last-built revision and the
//! current revision of a branch should trigger an automatic build, based
//! entirely on which commit authors appear in it. Authors on a configured
//! ignore-list can suppress builds; a policy flag controls whether any
//! non-ignored author forces one; an optional mode classifies only the
//! branch tip. Every internal failure fails open to "build required".

pub mod changeset;
pub mod engine;
pub mod error;
pub mod fakes;
pub mod obs;
pub mod policy;
pub mod resolver;
pub mod revision;
pub mod strategy;
pub mod telemetry;
pub mod trace;

pub use changeset::{ChangeSet, ChangesetProvider, Commit};
pub use engine::evaluate;
pub use error::{GateError, Result};
pub use policy::{IgnoreList, Policy};
pub use resolver::ChangesetResolver;
pub use revision::{BranchHead, OwnerHandle, RevisionRef, SourceContext, NATIVE_ID_LEN};
pub use strategy::IgnoreCommitterStrategy;
pub use telemetry::init_tracing;
pub use trace::{Severity, Trace, TraceLine, Verdict};

/// Buildgate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
