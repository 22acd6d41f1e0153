//! Error types for entity resolution.

use planscope_types::EntityId;
use thiserror::Error;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Following `support` links returned to an entity already on the path.
    /// Only raised under `CyclePolicy::Error`.
    #[error("support graph cycles back to entity {entity}")]
    CyclicSupportGraph { entity: EntityId },

    /// Resolver configuration could not be parsed.
    #[error("invalid resolver config: {0}")]
    Config(#[from] toml::de::Error),

    /// Property filters were not a JSON object.
    #[error("invalid property filters: {0}")]
    InvalidFilters(#[from] serde_json::Error),
}
