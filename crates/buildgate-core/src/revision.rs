//! Revision handles, branch heads, and the source context.
//!
//! A revision is either *native* (carries a full, directly resolvable
//! commit identifier) or *foreign* (produced by some other mechanism and
//! degraded to an identifier prefix before use).

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// Width of a native commit identifier prefix: a 160-bit hex content hash.
pub const NATIVE_ID_LEN: usize = 40;

/// An opaque handle to a point in version-control history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevisionRef {
    /// A revision of the kind the resolver expects; `id` is usable as-is.
    Native { id: String },
    /// A revision produced by another mechanism; only its string form is
    /// available and must be degraded to an id prefix.
    Foreign { repr: String },
}

impl RevisionRef {
    /// A native revision carrying a full commit identifier.
    pub fn native(id: impl Into<String>) -> Self {
        Self::Native { id: id.into() }
    }

    /// A foreign revision known only by its string representation.
    pub fn foreign(repr: impl Into<String>) -> Self {
        Self::Foreign { repr: repr.into() }
    }

    /// Resolve this handle to a native commit identifier.
    ///
    /// Foreign handles are degraded by taking the first [`NATIVE_ID_LEN`]
    /// characters of their string form. A shorter string form is a fatal
    /// [`GateError::MalformedRevision`].
    pub fn to_native_id(&self) -> Result<String> {
        match self {
            Self::Native { id } => Ok(id.clone()),
            Self::Foreign { repr } => {
                let prefix: String = repr.chars().take(NATIVE_ID_LEN).collect();
                if prefix.chars().count() < NATIVE_ID_LEN {
                    return Err(GateError::MalformedRevision {
                        repr: repr.clone(),
                        min_len: NATIVE_ID_LEN,
                    });
                }
                Ok(prefix)
            }
        }
    }
}

/// A branch handle, named after the ref whose tip is being considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchHead {
    pub name: String,
}

impl BranchHead {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The environment a version-control client is constructed in.
///
/// Passed explicitly into the resolver; there is no ambient session state.
/// A missing `owner` makes resolution fail with
/// [`GateError::OwnerUnavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    /// Identifier of the source-control configuration being evaluated.
    pub source_id: String,
    /// The owning context (job, folder, pipeline) for the source, when
    /// available.
    pub owner: Option<OwnerHandle>,
}

impl SourceContext {
    pub fn new(source_id: impl Into<String>, owner: Option<OwnerHandle>) -> Self {
        Self {
            source_id: source_id.into(),
            owner,
        }
    }
}

/// Handle to the entity that owns a source-control configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerHandle {
    pub name: String,
}

impl OwnerHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
