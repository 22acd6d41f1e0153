//! Error types for attachment processing and data point evaluation.

use planscope_types::AttachmentId;
use thiserror::Error;

/// Result type for attachment processing.
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Result type for data point configuration and evaluation.
pub type DataPointResult<T> = Result<T, DataPointError>;

#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The `type` discriminator names no known attachment kind.
    #[error("invalid attachment type: {0}")]
    InvalidAttachmentType(String),

    /// A known attachment kind whose version payload has the wrong shape.
    #[error("malformed payload for attachment {id}: {source}")]
    MalformedPayload {
        id: AttachmentId,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DataPointError {
    #[error("invalid processing type: {0}")]
    InvalidProcessingType(String),

    #[error("invalid calculation type: {0}")]
    InvalidCalculationType(String),

    #[error("invalid formatting type: {0}")]
    InvalidFormattingType(String),

    /// The processing mode reads more data points than the config lists.
    #[error("data point config lists {found} data points, {expected} required")]
    MissingDataPoint { expected: usize, found: usize },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
