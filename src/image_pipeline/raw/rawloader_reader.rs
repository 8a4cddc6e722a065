//! RAW image reader implementation using the rawloader library.
//!
//! Decodes the sensor mosaic and pulls out the metadata the RAW stages need:
//! the real sample bit depth, the colour filter tiling and the camera's
//! as-shot white balance.

use std::io::Cursor;

use tracing::debug;
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::raw::bayer::{BayerPattern, CfaChannel};
use crate::image_pipeline::raw::types::RawImageData;
use crate::image_pipeline::raw::reader::RawImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// Any single-channel format rawloader understands works (ARW, RAF, NEF, CR2, DNG...).
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// # Errors
    ///
    /// * `DecodeError` - rawloader rejected the file, or it is not a single-channel mosaic
    /// * `InvalidPattern` - the colour filter array is not a 2x2 Bayer tile (e.g. X-Trans)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use isp_stages_rs::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let raw_bytes = std::fs::read("image.arw").unwrap();
    /// let frame = RawLoaderReader.read_raw(&raw_bytes).unwrap();
    /// println!("{:?}", frame.bayer_pattern);
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(PipelineError::DecodeError(format!(
                "expected a single-channel mosaic, got {} components per pixel",
                decoded.cpp
            )));
        }

        let width = decoded.width;
        let height = decoded.height;

        debug!("Decoded image: {}x{}", width, height);

        // Float data is normalized to 0.0-1.0 and gets scaled to the u16 range
        let (data, is_float): (Vec<u16>, bool) = match decoded.data {
            RawloaderImageData::Integer(values) => (values, false),
            RawloaderImageData::Float(values) => {
                (values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect(), true)
            }
        };

        let bits_per_sample = sample_bit_depth(is_float, &decoded.whitelevels);

        let colors = [
            [decoded.cfa.color_at(0, 0), decoded.cfa.color_at(0, 1)],
            [decoded.cfa.color_at(1, 0), decoded.cfa.color_at(1, 1)],
        ];
        let bayer_pattern = pattern_from_cfa(colors, (decoded.cfa.width, decoded.cfa.height), &decoded.cfa.name)?;

        let wb = decoded.wb_coeffs;
        let wb_coeffs = if wb[..3].iter().all(|c| c.is_finite()) && wb[1] > 0.0 {
            Some(wb)
        } else {
            None
        };

        debug!(
            "bits_per_sample={}, pattern={}, wb={:?}",
            bits_per_sample, bayer_pattern, wb_coeffs
        );

        Ok(RawImageData {
            width,
            height,
            data,
            bits_per_sample,
            bayer_pattern: Some(bayer_pattern),
            wb_coeffs,
        })
    }
}

/// rawloader colour indices: 0 red, 1 green, 2 blue, 3 second green.
fn cfa_channel(color: usize) -> CfaChannel {
    match color {
        0 => CfaChannel::Red,
        2 => CfaChannel::Blue,
        _ => CfaChannel::Green,
    }
}

/// Bit depth of decoded samples.
///
/// Float data has already been stretched over the full u16 range. For integer
/// data the white level is the largest value the sensor produces, so its bit
/// length is the sensor bit depth (4095 -> 12, 16383 -> 14).
fn sample_bit_depth(is_float: bool, whitelevels: &[u16]) -> u32 {
    if is_float {
        return U16_BITS;
    }
    let max_white_level = whitelevels.iter().max().copied().unwrap_or(u16::MAX);
    if max_white_level == 0 {
        DEFAULT_BITS_PER_SAMPLE
    } else {
        U16_BITS - max_white_level.leading_zeros()
    }
}

/// Maps the decoder's CFA onto a Bayer tiling; anything else is rejected.
fn pattern_from_cfa(colors: [[usize; 2]; 2], size: (usize, usize), name: &str) -> Result<BayerPattern> {
    if size != (2, 2) {
        return Err(PipelineError::InvalidPattern(name.to_string()));
    }
    let tile = colors.map(|row| row.map(cfa_channel));
    BayerPattern::from_tile(tile).ok_or_else(|| PipelineError::InvalidPattern(name.to_string()))
}
