//! Frame capture and GIF generation for step-by-step solving
//!
//! Frames belong to one attempt. When the attempt ends in a contradiction the
//! caller discards them and records the next attempt from scratch.

use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Rendered frames of the current attempt
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<RgbaImage>,
}

impl FrameRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rendered frame
    pub fn record(&mut self, frame: RgbaImage) {
        self.frames.push(frame);
    }

    /// Drop every frame of the current attempt
    pub fn discard(&mut self) {
        self.frames.clear();
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames were recorded
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Encode the frames as a looping GIF
    ///
    /// The final frame is held [`FINAL_FRAME_HOLD`] times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "frames",
                &0,
                &"No frames captured for animation",
            ));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| GenerationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, buffer)| {
            let delay = if index == last {
                frame_delay_ms * FINAL_FRAME_HOLD
            } else {
                frame_delay_ms
            };
            Frame::from_parts(buffer.clone(), 0, 0, Delay::from_numer_denom_ms(delay, 1))
        });

        let export_error = |e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };
        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)
    }
}
