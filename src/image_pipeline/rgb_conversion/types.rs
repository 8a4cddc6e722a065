//! Types for YUV to RGB conversion

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::stage::StageConfig;

/// Samples per pixel of every full-colour frame
pub const CHANNELS: usize = 3;

/// Broadcast standard whose integer coefficients drive the conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorStandard {
    /// ITU-R BT.709, selector `1`
    Bt709,
    /// ITU-R BT.601, selector `2`
    Bt601,
}

impl TryFrom<i64> for ColorStandard {
    type Error = PipelineError;

    fn try_from(selector: i64) -> Result<Self> {
        match selector {
            1 => Ok(ColorStandard::Bt709),
            2 => Ok(ColorStandard::Bt601),
            other => Err(PipelineError::UnsupportedColorStandard(other)),
        }
    }
}

impl From<ColorStandard> for i64 {
    fn from(standard: ColorStandard) -> Self {
        match standard {
            ColorStandard::Bt709 => 1,
            ColorStandard::Bt601 => 2,
        }
    }
}

fn check_interleaved(width: usize, height: usize, len: usize, what: &str) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| PipelineError::ShapeMismatch {
            expected: format!("a {}x{} 3-channel {} frame that fits in memory", width, height, what),
            actual: format!("{} samples", len),
        })?;
    if len != expected {
        return Err(PipelineError::ShapeMismatch {
            expected: format!("{} samples for a {}x{} 3-channel {} frame", expected, width, height, what),
            actual: format!("{} samples", len),
        });
    }
    Ok(())
}

/// 8-bit luma/chroma frame, interleaved `[Y, Cb, Cr, Y, Cb, Cr, ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YuvImageData {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl YuvImageData {
    /// Fails with `ShapeMismatch` unless `data` holds exactly three samples per pixel.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_interleaved(width, height, data.len(), "YUV")?;
        Ok(Self { width, height, data })
    }

    pub fn validate(&self) -> Result<()> {
        check_interleaved(self.width, self.height, self.data.len(), "YUV")
    }
}

/// RGB image data after conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

impl RgbImageData {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_interleaved(width, height, data.len(), "RGB")?;
        Ok(Self { width, height, data })
    }

    /// `[R, G, B]` at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = (row * self.width + col) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Configuration for the RGB conversion stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbConversionConfig {
    pub stage: StageConfig,
    /// Coefficient set used for the conversion
    pub color_standard: ColorStandard,
}

impl Default for RgbConversionConfig {
    fn default() -> Self {
        Self {
            stage: StageConfig::default(),
            color_standard: ColorStandard::Bt601,
        }
    }
}

impl RgbConversionConfig {
    pub fn builder() -> RgbConversionConfigBuilder {
        RgbConversionConfigBuilder::default()
    }
}

/// Builder for RgbConversionConfig
#[derive(Default)]
pub struct RgbConversionConfigBuilder {
    stage: Option<StageConfig>,
    color_standard: Option<ColorStandard>,
}

impl RgbConversionConfigBuilder {
    pub fn stage(mut self, stage: StageConfig) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn color_standard(mut self, standard: ColorStandard) -> Self {
        self.color_standard = Some(standard);
        self
    }

    /// Sets the standard from its integer selector (`1` = BT.709, `2` = BT.601).
    pub fn conv_standard(mut self, selector: i64) -> Result<Self> {
        self.color_standard = Some(ColorStandard::try_from(selector)?);
        Ok(self)
    }

    pub fn build(self) -> RgbConversionConfig {
        let default = RgbConversionConfig::default();
        RgbConversionConfig {
            stage: self.stage.unwrap_or(default.stage),
            color_standard: self.color_standard.unwrap_or(default.color_standard),
        }
    }
}
