//! Error types for solver and collaborator operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::grid::Grid;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum CollapseError {
    /// Grid dimensions or alphabet rejected at construction
    InvalidConfiguration {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A cell's candidate set became empty during propagation
    ///
    /// Recovered inside the driver by restoring the last checkpoint; callers
    /// only see it when invoking the raw `collapse` or `reduce` operations.
    Contradiction {
        /// Grid position (row, col) whose candidates ran out
        position: [usize; 2],
    },

    /// Rollbacks exceeded the configured retry cap
    ContradictionExhausted {
        /// Rollbacks counted against the cap when it tripped
        rollbacks: usize,
        /// Cells still unresolved in the restored grid
        remaining: usize,
        /// Grid as restored after the final rollback
        grid: Box<Grid>,
    },

    /// An operation was invoked in a state the driver never produces
    IllegalState {
        /// Operation that was attempted
        operation: &'static str,
        /// Grid position (row, col) involved, if any
        position: Option<[usize; 2]>,
        /// Description of the violated precondition
        reason: String,
    },

    /// Failed to load a tile sprite from disk
    TileSetLoad {
        /// Path to the sprite file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the rendered canvas
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CollapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::Contradiction { position } => {
                write!(
                    f,
                    "Contradiction at cell ({}, {}): no candidates remain",
                    position[0], position[1]
                )
            }
            Self::ContradictionExhausted {
                rollbacks,
                remaining,
                ..
            } => {
                write!(
                    f,
                    "Contradictions exhausted after {rollbacks} rollbacks with {remaining} cells unresolved"
                )
            }
            Self::IllegalState {
                operation,
                position,
                reason,
            } => match position {
                Some([y, x]) => write!(f, "Illegal {operation} at cell ({y}, {x}): {reason}"),
                None => write!(f, "Illegal {operation} (no cell involved): {reason}"),
            },
            Self::TileSetLoad { path, source } => {
                write!(f, "Failed to load tile '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export canvas to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CollapseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileSetLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, CollapseError>;

impl From<image::ImageError> for CollapseError {
    fn from(err: image::ImageError) -> Self {
        Self::TileSetLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CollapseError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl CollapseError {
    /// Whether this is the locally recoverable contradiction outcome
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollapseError {
    CollapseError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an illegal state error
pub fn illegal_state(
    operation: &'static str,
    position: [usize; 2],
    reason: &impl ToString,
) -> CollapseError {
    CollapseError::IllegalState {
        operation,
        position: Some(position),
        reason: reason.to_string(),
    }
}

/// Create an illegal state error about the driver as a whole
pub fn illegal_driver_state(operation: &'static str, reason: &impl ToString) -> CollapseError {
    CollapseError::IllegalState {
        operation,
        position: None,
        reason: reason.to_string(),
    }
}
