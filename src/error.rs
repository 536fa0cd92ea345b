use thiserror::Error;

use crate::types::Cell;

/// Result type for grididdy operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Main error type for the grididdy library
#[derive(Debug, Error)]
pub enum GridError {
    /// The planner found no traversable path under the current beliefs.
    /// Terminal for the episode, never fatal.
    #[error("No path found from {from}")]
    NoPathFound { from: Cell },

    /// Unsatisfiable setup request
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfiguration { name: String, reason: String },

    /// Cell outside the grid
    #[error("Cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },

    /// IO errors (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for GridError {
    fn from(err: bincode::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

impl GridError {
    pub fn invalid_configuration<S: Into<String>>(name: S, reason: S) -> Self {
        GridError::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error only ends the current episode
    pub fn is_terminal_only(&self) -> bool {
        matches!(self, GridError::NoPathFound { .. })
    }
}
