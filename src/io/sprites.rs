//! Sprite loading and per-variant sprite rotation
//!
//! Sprites are square images of one shared size, loaded either from a single
//! horizontal strip or from a directory of `<index>.png` files. The solver
//! never sees them; rendering maps variant indices back to rotated sprites.

use image::RgbaImage;
use image::imageops::{rotate90, rotate180, rotate270};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::io::configuration::TilesetDocument;
use crate::io::error::{ConfigurationError, GenerationError, Result};
use crate::spatial::tiles::TileCatalog;

/// Loaded sprites keyed by sprite index
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    sprites: BTreeMap<usize, RgbaImage>,
    tile_size: u32,
}

impl SpriteSheet {
    /// Load the sprites a document refers to
    ///
    /// # Errors
    ///
    /// Returns an error if images cannot be read or do not form a valid tileset
    pub fn for_document(document: &TilesetDocument) -> Result<Self> {
        if document.combined_tileset {
            Self::from_strip(&document.combined_tileset_path())
        } else {
            Self::from_directory(&document.tileset_directory())
        }
    }

    /// Split an `(n * l) x l` strip into `n` square sprites
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded or has zero height
    pub fn from_strip(path: &Path) -> Result<Self> {
        let strip = load_rgba(path)?;
        let tile_size = strip.height();
        if tile_size == 0 {
            return Err(ConfigurationError::InvalidSprite {
                path: path.to_path_buf(),
                reason: "tileset strip has zero height".to_string(),
            }
            .into());
        }

        let count = strip.width() / tile_size;
        let sprites = (0..count)
            .map(|index| {
                let sprite =
                    image::imageops::crop_imm(&strip, index * tile_size, 0, tile_size, tile_size)
                        .to_image();
                (index as usize, sprite)
            })
            .collect();

        debug!("Loaded {count} sprites of {tile_size}px from {}", path.display());
        Ok(Self { sprites, tile_size })
    }

    /// Load every `<index>.png` in a directory
    ///
    /// Files whose stem is not an integer are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, an image cannot be
    /// loaded, or the images are not square and equally sized
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| GenerationError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read tileset directory",
            source: e,
        })?;

        let mut paths: Vec<(usize, PathBuf)> = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| GenerationError::FileSystem {
                    path: dir.to_path_buf(),
                    operation: "read tileset directory",
                    source: e,
                })?
                .path();
            if path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            if let Some(index) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse().ok())
            {
                paths.push((index, path));
            }
        }
        paths.sort();

        let mut sprites = BTreeMap::new();
        let mut tile_size = None;
        for (index, path) in paths {
            let sprite = load_rgba(&path)?;
            if sprite.width() != sprite.height() {
                return Err(ConfigurationError::InvalidSprite {
                    path,
                    reason: format!("{}x{} is not square", sprite.width(), sprite.height()),
                }
                .into());
            }
            match tile_size {
                Some(size) if size != sprite.width() => {
                    return Err(ConfigurationError::InvalidSprite {
                        path,
                        reason: format!("size {} differs from {size}", sprite.width()),
                    }
                    .into());
                }
                _ => tile_size = Some(sprite.width()),
            }
            sprites.insert(index, sprite);
        }

        debug!("Loaded {} sprites from {}", sprites.len(), dir.display());
        Ok(Self {
            sprites,
            tile_size: tile_size.unwrap_or(0),
        })
    }

    /// Build a sheet from images already in memory
    pub const fn from_sprites(sprites: BTreeMap<usize, RgbaImage>, tile_size: u32) -> Self {
        Self { sprites, tile_size }
    }

    /// Side length of every sprite in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of loaded sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprites were loaded
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Look up a sprite by index
    pub fn get(&self, index: usize) -> Option<&RgbaImage> {
        self.sprites.get(&index)
    }

    /// One rotated sprite per catalog variant, in variant order
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSprite`] if a variant's base tile
    /// references a sprite that was not loaded
    pub fn variant_sprites(
        &self,
        catalog: &TileCatalog,
        document: &TilesetDocument,
    ) -> Result<Vec<RgbaImage>> {
        catalog
            .variants()
            .iter()
            .map(|variant| -> Result<RgbaImage> {
                let sprite_index = document
                    .tiles
                    .get(variant.base_tile)
                    .map_or(usize::MAX, |tile| tile.sprite);
                let sprite = self.get(sprite_index).ok_or(
                    ConfigurationError::MissingSprite {
                        tile: variant.base_tile,
                        sprite: sprite_index,
                    },
                )?;
                Ok(rotate_sprite(sprite, variant.rotation))
            })
            .collect()
    }
}

/// Rotate a sprite counter-clockwise by `rotation` quarter turns
///
/// Pairs with the left shift of socket sequences.
pub fn rotate_sprite(sprite: &RgbaImage, rotation: u8) -> RgbaImage {
    match rotation % 4 {
        1 => rotate270(sprite),
        2 => rotate180(sprite),
        3 => rotate90(sprite),
        _ => sprite.clone(),
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| GenerationError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}
