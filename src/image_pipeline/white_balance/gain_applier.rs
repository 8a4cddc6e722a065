use std::borrow::Cow;

use tracing::{info, instrument, warn};

use crate::image_pipeline::common::{
    error::Result,
    fixed_point::{FixedPointFormat, FixedPointGain, quantize},
    output::{NoopSaver, OutputArray, OutputSaver},
    rows::map_rows,
};
use crate::image_pipeline::raw::{BayerPattern, CfaChannel, RawImageData, SensorInfo};
use crate::image_pipeline::white_balance::types::WhiteBalanceConfig;

/// Register layout of the white balance gain multiplier.
pub const WB_GAIN_FORMAT: FixedPointFormat = FixedPointFormat::U16_8;

/// File prefix for saved white balance output.
pub const WB_SAVE_PREFIX: &str = "Out_white_balance_";

/// Applies fixed-point red and blue gains to a Bayer mosaic.
pub struct WhiteBalance<S: OutputSaver = NoopSaver> {
    config: WhiteBalanceConfig,
    sensor: SensorInfo,
    saver: S,
}

impl WhiteBalance<NoopSaver> {
    pub fn new(config: WhiteBalanceConfig, sensor: SensorInfo) -> Self {
        Self {
            config,
            sensor,
            saver: NoopSaver,
        }
    }
}

impl<S: OutputSaver> WhiteBalance<S> {
    pub fn with_saver(config: WhiteBalanceConfig, sensor: SensorInfo, saver: S) -> Self {
        Self {
            config,
            sensor,
            saver,
        }
    }

    pub fn config(&self) -> &WhiteBalanceConfig {
        &self.config
    }

    pub fn sensor(&self) -> &SensorInfo {
        &self.sensor
    }

    /// Real-valued `(red, blue)` gains before quantization.
    fn resolve_gains(&self, raw: &RawImageData) -> (f64, f64) {
        if self.config.auto {
            match raw.wb_coeffs {
                Some(wb) => return ((wb[0] / wb[1]) as f64, (wb[2] / wb[1]) as f64),
                None => warn!("Auto white balance requested but the frame has no as-shot coefficients; using configured gains"),
            }
        }
        (self.config.r_gain, self.config.b_gain)
    }

    /// The `(red, blue)` gains as they will be loaded into the U16.8 multiplier.
    pub fn quantized_gains(&self, raw: &RawImageData) -> (FixedPointGain, FixedPointGain) {
        let (r_gain, b_gain) = self.resolve_gains(raw);
        let red = quantize(r_gain, WB_GAIN_FORMAT);
        let blue = quantize(b_gain, WB_GAIN_FORMAT);

        for (name, requested, gain) in [("red", r_gain, &red), ("blue", b_gain, &blue)] {
            if gain.clamped {
                warn!(
                    "WB {} gain {} is outside the {} range, clamped to {}",
                    name, requested, WB_GAIN_FORMAT, gain.value
                );
            }
        }
        (red, blue)
    }

    /// Returns a new frame with red and blue photosites scaled and every sample
    /// clipped to `[0, 2^bit_depth - 1]`.
    pub fn apply_wb_parameters(&self, raw: &RawImageData) -> Result<RawImageData> {
        raw.validate()?;

        if let Some(pattern) = raw.bayer_pattern {
            if pattern != self.sensor.bayer_pattern {
                warn!(
                    "Frame reports a {} mosaic but the sensor is configured as {}; using {}",
                    pattern, self.sensor.bayer_pattern, self.sensor.bayer_pattern
                );
            }
        }

        let (red, blue) = self.quantized_gains(raw);

        if self.config.stage.debug {
            info!("   - WB  - red gain : {}", red.value);
            info!("   - WB  - blue gain: {}", blue.value);
            info!("   - WB  - red gain ({}): {}", WB_GAIN_FORMAT, red.bits);
            info!("   - WB  - blue gain ({}): {}", WB_GAIN_FORMAT, blue.bits);
        }

        let kernel = GainKernel {
            pattern: self.sensor.bayer_pattern,
            red: red.raw,
            blue: blue.raw,
            shift: WB_GAIN_FORMAT.fractional_bits(),
            max: self.sensor.max_sample() as u64,
        };

        let mut data = vec![0u16; raw.data.len()];
        map_rows(&raw.data, raw.width, &mut data, raw.width, |row, src, dst| {
            kernel.apply_row(row, src, dst)
        });

        Ok(RawImageData {
            width: raw.width,
            height: raw.height,
            data,
            bits_per_sample: raw.bits_per_sample,
            bayer_pattern: raw.bayer_pattern,
            wb_coeffs: raw.wb_coeffs,
        })
    }

    /// Runs the stage. A disabled stage hands back the input frame itself.
    #[instrument(skip(self, raw), fields(width = raw.width, height = raw.height))]
    pub fn execute<'a>(&self, raw: &'a RawImageData, in_file: &str) -> Result<Cow<'a, RawImageData>> {
        info!("White balancing = {}", self.config.stage.enable);

        let out = if self.config.stage.enable {
            Cow::Owned(self.apply_wb_parameters(raw)?)
        } else {
            Cow::Borrowed(raw)
        };

        if self.config.stage.save {
            self.saver.save_output_array(in_file, WB_SAVE_PREFIX, OutputArray::Bayer(out.as_ref()))?;
        }
        Ok(out)
    }
}

/// Per-row multiply-shift-clip over one Bayer row.
///
/// `(sample * raw_gain) >> F` followed by a clip reproduces a 32-bit float
/// multiply, clip and truncate: every product below `2^24` is exact in f32,
/// and anything larger already exceeds the 16-bit ceiling.
#[derive(Debug, Clone, Copy)]
struct GainKernel {
    pattern: BayerPattern,
    red: u64,
    blue: u64,
    shift: u32,
    max: u64,
}

impl GainKernel {
    fn apply_row(&self, row: usize, src: &[u16], dst: &mut [u16]) {
        let tile_row = self.pattern.tile()[row & 1];
        let gains = tile_row.map(|channel| match channel {
            CfaChannel::Red => Some(self.red),
            CfaChannel::Blue => Some(self.blue),
            CfaChannel::Green => None,
        });

        for (col, (&s, d)) in src.iter().zip(dst.iter_mut()).enumerate() {
            let scaled = match gains[col & 1] {
                Some(gain) => (s as u64 * gain) >> self.shift,
                None => s as u64,
            };
            *d = scaled.min(self.max) as u16;
        }
    }
}
