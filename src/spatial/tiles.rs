//! Tile variants, socket labels and rotation expansion
//!
//! A base tile carries four socket labels and the rotation steps it may be
//! placed in. Each permitted rotation becomes one variant in the catalog; the
//! solver only ever sees variant indices and their socket sequences.

use serde::Deserialize;
use std::fmt;

use crate::io::error::ConfigurationError;
use crate::spatial::direction::Direction;

/// Number of distinct quarter turns
pub const ROTATION_STEPS: u8 = 4;

/// Opaque connector label on one side of a tile
///
/// Configuration documents may spell labels as strings or integers; integers
/// are kept as their decimal text so they match JSON object keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawSocketLabel")]
pub struct SocketLabel(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSocketLabel {
    Text(String),
    Integer(i64),
}

impl From<RawSocketLabel> for SocketLabel {
    fn from(raw: RawSocketLabel) -> Self {
        match raw {
            RawSocketLabel::Text(text) => Self(text),
            RawSocketLabel::Integer(value) => Self(value.to_string()),
        }
    }
}

impl SocketLabel {
    /// Create a label from any string-like value
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SocketLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for SocketLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for SocketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Socket labels in North, East, South, West order
pub type Sockets = [SocketLabel; 4];

/// Build a socket sequence from four string-like labels
pub fn sockets<S: Into<SocketLabel>>(labels: [S; 4]) -> Sockets {
    labels.map(Into::into)
}

/// Shift a socket sequence cyclically left by `rotation` quarter turns
///
/// Matches rotating the sprite counter-clockwise: after one turn the side
/// that faced east faces north.
pub fn rotate_sockets(sockets: &Sockets, rotation: u8) -> Sockets {
    let mut rotated = sockets.clone();
    rotated.rotate_left(usize::from(rotation % ROTATION_STEPS));
    rotated
}

/// One rotation of a base tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileVariant {
    /// Socket labels after rotation
    pub sockets: Sockets,
    /// Index of the originating base tile
    pub base_tile: usize,
    /// Quarter turns applied to the base tile
    pub rotation: u8,
}

impl TileVariant {
    /// Socket label exposed on the given side
    pub fn socket(&self, direction: Direction) -> &SocketLabel {
        match direction {
            Direction::North => &self.sockets[0],
            Direction::East => &self.sockets[1],
            Direction::South => &self.sockets[2],
            Direction::West => &self.sockets[3],
        }
    }
}

/// Base tile as described by a configuration document
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BaseTile {
    /// Sprite index in the loaded tileset
    pub sprite: usize,
    /// Unrotated socket labels
    pub sockets: Sockets,
    /// Permitted quarter turns
    #[serde(default = "default_rotations")]
    pub rotations: Vec<u8>,
}

fn default_rotations() -> Vec<u8> {
    vec![0]
}

/// Read-only list of tile variants indexed `0..len`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCatalog {
    variants: Vec<TileVariant>,
}

impl TileCatalog {
    /// Create a catalog from raw socket sequences, one variant per entry
    pub fn new(socket_sequences: Vec<Sockets>) -> Self {
        let variants = socket_sequences
            .into_iter()
            .enumerate()
            .map(|(base_tile, sockets)| TileVariant {
                sockets,
                base_tile,
                rotation: 0,
            })
            .collect();
        Self { variants }
    }

    /// Expand base tiles into one variant per permitted rotation
    ///
    /// Variant order follows the base tile order, then each tile's rotation
    /// list order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRotation`] for rotation steps
    /// outside `0..=3`.
    pub fn from_base_tiles(tiles: &[BaseTile]) -> Result<Self, ConfigurationError> {
        let mut variants = Vec::new();
        for (index, tile) in tiles.iter().enumerate() {
            for &rotation in &tile.rotations {
                if rotation >= ROTATION_STEPS {
                    return Err(ConfigurationError::InvalidRotation {
                        tile: index,
                        rotation,
                    });
                }
                variants.push(TileVariant {
                    sockets: rotate_sockets(&tile.sockets, rotation),
                    base_tile: index,
                    rotation,
                });
            }
        }
        Ok(Self { variants })
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the catalog has no variants
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Look up a variant
    pub fn get(&self, index: usize) -> Option<&TileVariant> {
        self.variants.get(index)
    }

    /// All variants in index order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Socket label of a variant on one side
    pub fn socket(&self, variant: usize, direction: Direction) -> Option<&SocketLabel> {
        self.get(variant).map(|tile| tile.socket(direction))
    }
}
