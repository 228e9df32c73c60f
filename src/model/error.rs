//! Error types for model operations.

use thiserror::Error;

use crate::base::ClassId;

/// Errors raised while building or querying the class model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required argument was absent or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Registry operation on an id that was never stored.
    #[error("unknown class id: {0}")]
    UnknownClass(ClassId),

    /// A class with this id is already stored; classes are never replaced.
    #[error("duplicate class id: {0}")]
    DuplicateId(ClassId),
}

impl ModelError {
    /// Construction attempted without a usable class name.
    pub fn missing_name() -> Self {
        Self::InvalidArgument("missing name")
    }

    /// Association recorded without a target class name.
    pub fn missing_target() -> Self {
        Self::InvalidArgument("missing target")
    }

    /// Association stored under a key other than its target name.
    pub fn mismatched_target() -> Self {
        Self::InvalidArgument("association key does not match target")
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
