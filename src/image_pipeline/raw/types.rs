//! RAW image data types

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raw::bayer::BayerPattern;

/// Widest sample the RAW stages store (`u16`).
pub const MAX_BIT_DEPTH: u32 = 16;

/// Represents a mosaiced RAW frame
#[derive(Debug, Clone, PartialEq)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Raw pixel data (single channel Bayer pattern), row-major
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
    /// Colour filter tiling reported by the decoder, if any
    pub bayer_pattern: Option<BayerPattern>,
    /// Camera as-shot white balance coefficients `[r, g, b, e]`, if any
    pub wb_coeffs: Option<[f32; 4]>,
}

impl RawImageData {
    /// Frame without decoder metadata.
    pub fn new(width: usize, height: usize, data: Vec<u16>, bits_per_sample: u32) -> Self {
        Self {
            width,
            height,
            data,
            bits_per_sample,
            bayer_pattern: None,
            wb_coeffs: None,
        }
    }

    /// Checks that the sample buffer covers exactly `width * height` pixels.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PipelineError::InvalidDimensions(self.width, self.height));
        }

        let expected = self.width.checked_mul(self.height).ok_or_else(|| PipelineError::ShapeMismatch {
            expected: format!("a {}x{} frame that fits in memory", self.width, self.height),
            actual: format!("{} samples", self.data.len()),
        })?;
        if self.data.len() != expected {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} samples for a {}x{} single-channel frame", expected, self.width, self.height),
                actual: format!("{} samples", self.data.len()),
            });
        }
        Ok(())
    }

    /// Sample at `(row, col)`.
    pub fn sample(&self, row: usize, col: usize) -> u16 {
        self.data[row * self.width + col]
    }
}

/// Sensor metadata threaded through the RAW stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorInfo {
    /// Valid sample range is `[0, 2^bit_depth - 1]`
    pub bit_depth: u32,
    pub bayer_pattern: BayerPattern,
}

impl SensorInfo {
    /// Builds sensor metadata from its configuration form (bit depth and a pattern tag such as `"rggb"`).
    pub fn new(bit_depth: u32, bayer_pattern: &str) -> Result<Self> {
        Self::with_pattern(bit_depth, bayer_pattern.parse()?)
    }

    /// Sensor metadata reported by the decoder alongside `raw`.
    ///
    /// Fails with `InvalidPattern` when the frame carries no Bayer tiling; the
    /// pattern is never guessed.
    pub fn from_frame(raw: &RawImageData) -> Result<Self> {
        let pattern = raw
            .bayer_pattern
            .ok_or_else(|| PipelineError::InvalidPattern("no Bayer CFA reported for frame".to_string()))?;
        Self::with_pattern(raw.bits_per_sample, pattern)
    }

    pub fn with_pattern(bit_depth: u32, bayer_pattern: BayerPattern) -> Result<Self> {
        if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
            return Err(PipelineError::UnsupportedBitDepth(bit_depth));
        }
        Ok(Self {
            bit_depth,
            bayer_pattern,
        })
    }

    /// Largest valid sample, `2^bit_depth - 1`.
    pub fn max_sample(&self) -> u16 {
        ((1u32 << self.bit_depth) - 1) as u16
    }
}
