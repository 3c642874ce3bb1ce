//! Runtime configuration defaults and the tileset configuration document

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::algorithm::connections::{ConnectionRules, ConnectionTable};
use crate::io::error::{GenerationError, Result};
use crate::spatial::tiles::{BaseTile, TileCatalog};

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Configuration document looked up when none is given
pub const DEFAULT_CONFIG_PATH: &str = "data.json";

/// Combined tileset image, `(n * l) x l` pixels for `n` tiles of side `l`
pub const COMBINED_TILESET_FILE: &str = "tileset.png";

/// Directory of `<sprite index>.png` files
pub const TILESET_DIRECTORY: &str = "tileset";

/// Default output for single-image mode
pub const DEFAULT_PNG_OUTPUT: &str = "result.png";

/// Default output for animated mode
pub const DEFAULT_GIF_OUTPUT: &str = "result.gif";

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 50;

/// The last frame is held this many frame delays
pub const FINAL_FRAME_HOLD: u32 = 25;

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Parsed tileset configuration document
///
/// ```json
/// {
///   "combined_tileset": true,
///   "tiles": [{ "sprite": 0, "sockets": ["A", "A", "B", "A"], "rotations": [0, 1] }],
///   "connections": { "A": ["A"], "B": ["B"] }
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct TilesetDocument {
    /// Sprites come from one strip image rather than a directory
    #[serde(default)]
    pub combined_tileset: bool,
    /// Base tiles in variant order
    pub tiles: Vec<BaseTile>,
    /// Socket compatibility rules
    pub connections: ConnectionRules,
    /// Directory sprite paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl TilesetDocument {
    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error for malformed JSON or missing fields
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read and parse a document, resolving sprites next to it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid document
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GenerationError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source: e,
        })?;
        let mut document = Self::from_json(&text).map_err(|e| GenerationError::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        document.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(document)
    }

    /// Expand the base tiles into the variant catalog
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid rotations or an empty tile list
    pub fn catalog(&self) -> Result<TileCatalog> {
        let catalog = TileCatalog::from_base_tiles(&self.tiles)?;
        if catalog.is_empty() {
            return Err(crate::io::error::ConfigurationError::EmptyCatalog.into());
        }
        Ok(catalog)
    }

    /// Validate the connection rules against a catalog
    ///
    /// # Errors
    ///
    /// Returns a configuration error for missing, unknown or asymmetric rules
    pub fn connection_table(&self, catalog: &TileCatalog) -> Result<ConnectionTable> {
        Ok(ConnectionTable::new(&self.connections, catalog)?)
    }

    /// Path of the combined tileset image
    pub fn combined_tileset_path(&self) -> PathBuf {
        self.base_dir.join(COMBINED_TILESET_FILE)
    }

    /// Path of the per-sprite tileset directory
    pub fn tileset_directory(&self) -> PathBuf {
        self.base_dir.join(TILESET_DIRECTORY)
    }
}
