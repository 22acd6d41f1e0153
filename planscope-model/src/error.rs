//! Error types for the entity model.

use planscope_types::EntityId;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while loading or checking entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// More than one of the three version slots is populated.
    #[error("entity {id} carries {count} version objects, expected one")]
    AmbiguousVersion { id: EntityId, count: usize },
}
