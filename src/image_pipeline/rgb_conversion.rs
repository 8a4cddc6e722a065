//! YUV to RGB conversion module
//!
//! Converts 8-bit luma/chroma frames to RGB with the integer coefficient
//! matrices of BT.709 and BT.601.

mod converter;
pub mod matrix;
pub mod types;

#[cfg(test)]
mod tests;

pub use converter::{RgbConversion, RgbStageOutput, RGB_SAVE_PREFIX};
pub use matrix::{BT601_YUV_TO_RGB, BT709_YUV_TO_RGB, YUV_OFFSET, YUV_TO_RGB_SHIFT, convert_pixel};
pub use types::{ColorStandard, RgbConversionConfig, RgbConversionConfigBuilder, RgbImageData, YuvImageData};
