//! Error types for configuration validation, solving and output operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::tiles::SocketLabel;

/// Malformed or inconsistent tileset configuration
///
/// Detected while building the catalog, the connection table or the solver.
/// Always fatal: no grid is allocated and no solving is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A tile variant uses a socket label that has no connection rule
    MissingSocket {
        /// The undefined socket label
        socket: SocketLabel,
        /// Index of the first variant referencing it
        variant: usize,
    },

    /// A connection rule lists a socket label that has no rule of its own
    UnknownSocket {
        /// Socket whose rule references the unknown label
        socket: SocketLabel,
        /// The unknown label
        target: SocketLabel,
    },

    /// `target` is allowed to face `socket` but not the other way round
    AsymmetricRule {
        /// Socket whose rule lists `target`
        socket: SocketLabel,
        /// Socket whose rule does not list `socket`
        target: SocketLabel,
    },

    /// The catalog contains no tile variants
    EmptyCatalog,

    /// Grid dimensions must be non-zero and their cell count representable
    InvalidDimensions {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
    },

    /// Rotation steps must lie in `0..=3`
    InvalidRotation {
        /// Index of the base tile in the configuration document
        tile: usize,
        /// Offending rotation step
        rotation: u8,
    },

    /// A tile references a sprite that was not loaded
    MissingSprite {
        /// Index of the base tile in the configuration document
        tile: usize,
        /// Sprite index that could not be resolved
        sprite: usize,
    },

    /// Sprite images must be square and share one size
    InvalidSprite {
        /// Path of the offending image
        path: PathBuf,
        /// Description of the mismatch
        reason: String,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSocket { socket, variant } => {
                write!(
                    f,
                    "Connections for socket '{socket}' are not defined (used by tile variant {variant})"
                )
            }
            Self::UnknownSocket { socket, target } => {
                write!(
                    f,
                    "Connection rule for '{socket}' references unknown socket '{target}'"
                )
            }
            Self::AsymmetricRule { socket, target } => {
                write!(
                    f,
                    "Asymmetric connection rule: '{socket}' allows '{target}' but '{target}' does not allow '{socket}'"
                )
            }
            Self::EmptyCatalog => write!(f, "Tile catalog contains no variants"),
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Grid dimensions {width}x{height} must be non-zero and fit in memory"
                )
            }
            Self::InvalidRotation { tile, rotation } => {
                write!(
                    f,
                    "Tile {tile} requests rotation {rotation}, expected a value in 0..=3"
                )
            }
            Self::MissingSprite { tile, sprite } => {
                write!(f, "Tile {tile} references missing sprite {sprite}")
            }
            Self::InvalidSprite { path, reason } => {
                write!(f, "Invalid sprite '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Tileset configuration failed validation
    Configuration(ConfigurationError),

    /// The attempt was interrupted through its cancellation token
    Cancelled,

    /// The configured attempt limit was reached without a solved grid
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// Failed to read or parse the configuration document
    ConfigLoad {
        /// Path to the document
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Failed to load a sprite image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
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

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cell index outside the grid
    InvalidCell {
        /// The invalid cell index
        index: usize,
        /// Number of cells in the grid
        cell_count: usize,
    },

    /// Tile variant index exceeds the catalog
    InvalidTileIndex {
        /// The invalid variant index
        index: usize,
        /// Number of variants in the catalog
        max_tiles: usize,
    },

    /// Rendering was asked to draw a cell without candidates
    EmptyCell {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(error) => write!(f, "Configuration error: {error}"),
            Self::Cancelled => write!(f, "Generation was cancelled"),
            Self::AttemptsExhausted { attempts } => {
                write!(
                    f,
                    "Every one of {attempts} attempts ended in a contradiction"
                )
            }
            Self::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration '{}': {source}",
                    path.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidCell { index, cell_count } => {
                write!(f, "Cell index {index} is out of bounds (cells: {cell_count})")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::EmptyCell { x, y } => {
                write!(f, "Cell ({x}, {y}) has no remaining candidates to render")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(error) => Some(error),
            Self::ConfigLoad { source, .. } => Some(source),
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GenerationError {
    /// Whether this error stems from tileset validation
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<ConfigurationError> for GenerationError {
    fn from(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
