//! Error types for inbox and node construction.

use thiserror::Error;

/// Result type alias for construction operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Construction-time failures.
///
/// Contention outcomes (`try_*` returning `false`) are ordinary control flow,
/// not errors, and caller precondition violations (mismatched payload size,
/// mixing shared/non-shared variants) are undefined behavior with no runtime
/// check — neither is represented here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Capacity was zero or odd.
    #[error("inbox capacity must be nonzero and even, got {capacity}")]
    InvalidCapacity {
        /// The capacity that was rejected.
        capacity: usize,
    },

    /// Backing storage could not be allocated.
    #[error("failed to allocate {capacity} slots of {message_bytes} bytes")]
    AllocationFailed {
        /// Requested capacity.
        capacity: usize,
        /// Per-slot payload size in bytes.
        message_bytes: usize,
    },

    /// An inbox or node name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A node was constructed with zero inbox references.
    #[error("node must reference at least one inbox")]
    EmptyNode,

    /// A node referenced the same inbox more than once.
    #[error("node references inbox \"{name}\" more than once")]
    DuplicateInbox {
        /// The name of the duplicated inbox.
        name: String,
    },

    /// A name lookup on a node found no match.
    #[error("no inbox named \"{name}\" in node")]
    NameNotFound {
        /// The name that was searched for.
        name: String,
    },
}

impl MeshError {
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    pub fn allocation_failed(capacity: usize, message_bytes: usize) -> Self {
        Self::AllocationFailed { capacity, message_bytes }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn empty_node() -> Self {
        Self::EmptyNode
    }

    pub fn duplicate_inbox(name: impl Into<String>) -> Self {
        Self::DuplicateInbox { name: name.into() }
    }

    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::NameNotFound { name: name.into() }
    }

    /// The debug-sink tag associated with this error, matching the
    /// human-readable failure tags a compiled-in diagnostics reporter emits.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InvalidCapacity { .. } => "INBOX_INCORRECT_SIZE",
            Self::AllocationFailed { .. } => "INBOX_ALLOCATION_FAILED",
            Self::EmptyName => "INBOX_EMPTY_NAME",
            Self::EmptyNode => "NODE_EMPTY",
            Self::DuplicateInbox { .. } => "NODE_MULTIPLE_EQUAL_INBOXES",
            Self::NameNotFound { .. } => "NODE_NAME_NOT_FOUND",
        }
    }
}
