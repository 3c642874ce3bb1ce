//! Raster rendering of candidate snapshots and PNG export

use image::RgbaImage;
use std::path::Path;

use crate::algorithm::superposition::Snapshot;
use crate::io::error::{GenerationError, Result, invalid_parameter};

/// Weight of the candidate at `position` when blended onto earlier ones
///
/// The first candidate is the base; each later entry weighs less than the one
/// before it.
pub fn blend_weight(position: usize) -> f32 {
    1.0 / (position as f32 + 2.0)
}

/// Linearly mix `top` into `base`, `weight` being the share of `top`
pub fn blend_into(base: &mut RgbaImage, top: &RgbaImage, weight: f32) {
    for (dst, src) in base.pixels_mut().zip(top.pixels()) {
        for (d, s) in dst.0.iter_mut().zip(src.0) {
            let mixed = f32::from(*d).mul_add(1.0 - weight, f32::from(s) * weight);
            *d = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Render one cell from its candidates in the order given
///
/// Returns `None` for an empty candidate list or an unknown variant.
pub fn blend_candidates(candidates: &[usize], sprites: &[RgbaImage]) -> Option<RgbaImage> {
    let (first, rest) = candidates.split_first()?;
    let mut tile = sprites.get(*first)?.clone();
    for (offset, &variant) in rest.iter().enumerate() {
        blend_into(&mut tile, sprites.get(variant)?, blend_weight(offset + 1));
    }
    Some(tile)
}

/// Render every cell of a snapshot into one image
///
/// # Errors
///
/// Returns an error if:
/// - A cell has no candidates left
/// - A candidate has no matching sprite
/// - The canvas would exceed `u32` pixels on a side
pub fn render_snapshot(
    snapshot: &Snapshot,
    sprites: &[RgbaImage],
    tile_size: u32,
) -> Result<RgbaImage> {
    let (rows, cols) = snapshot.dim();
    let mut canvas = RgbaImage::new(
        pixel_extent("width", cols, tile_size)?,
        pixel_extent("height", rows, tile_size)?,
    );

    for ((y, x), candidates) in snapshot.indexed_iter() {
        if candidates.is_empty() {
            return Err(GenerationError::EmptyCell { x, y });
        }
        let tile = blend_candidates(candidates, sprites).ok_or_else(|| {
            let index = candidates
                .iter()
                .copied()
                .find(|&variant| variant >= sprites.len())
                .unwrap_or_default();
            GenerationError::InvalidTileIndex {
                index,
                max_tiles: sprites.len(),
            }
        })?;
        image::imageops::replace(
            &mut canvas,
            &tile,
            i64::from(pixel_extent("column", x, tile_size)?),
            i64::from(pixel_extent("row", y, tile_size)?),
        );
    }

    Ok(canvas)
}

/// Pixel length of `cells` tiles of side `tile_size`
fn pixel_extent(parameter: &'static str, cells: usize, tile_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|count| count.checked_mul(tile_size))
        .ok_or_else(|| {
            invalid_parameter(
                parameter,
                &cells,
                &format!("{cells} tiles of {tile_size}px exceed the image size limit"),
            )
        })
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be written
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
