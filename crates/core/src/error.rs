//! Error types for Stowage.

use thiserror::Error;

/// Result type alias for Stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during placement and simulation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid container definition.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// No position in the container can hold the item.
    #[error("No space available in container: {0}")]
    NoSpaceAvailable(String),

    /// A candidate position collides with an already placed item.
    #[error("Placement conflicts with item: {0}")]
    Conflict(String),

    /// Referenced item does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Referenced container does not exist.
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    /// Container still holds items.
    #[error("Container is not empty: {0}")]
    ContainerNotEmpty(String),

    /// An id is already registered.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Simulation duration is zero or negative.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}
