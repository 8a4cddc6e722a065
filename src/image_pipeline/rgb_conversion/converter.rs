use tracing::{debug, info, instrument};

use crate::image_pipeline::common::{
    error::Result,
    output::{NoopSaver, OutputArray, OutputSaver},
    rows::map_rows,
};
use crate::image_pipeline::rgb_conversion::matrix::convert_row;
use crate::image_pipeline::rgb_conversion::types::{CHANNELS, RgbConversionConfig, RgbImageData, YuvImageData};

/// File prefix for saved RGB conversion output.
pub const RGB_SAVE_PREFIX: &str = "Out_rgb_conversion_";

/// Result of running the RGB conversion stage.
#[derive(Debug, PartialEq, Eq)]
pub enum RgbStageOutput<'a> {
    /// The stage is disabled; this is the input frame, untouched.
    PassThrough(&'a YuvImageData),
    Converted(RgbImageData),
}

impl RgbStageOutput<'_> {
    pub fn is_converted(&self) -> bool {
        matches!(self, RgbStageOutput::Converted(_))
    }

    /// Interleaved samples of whichever frame the stage produced.
    pub fn data(&self) -> &[u8] {
        match self {
            RgbStageOutput::PassThrough(yuv) => &yuv.data,
            RgbStageOutput::Converted(rgb) => &rgb.data,
        }
    }

    pub fn into_rgb(self) -> Option<RgbImageData> {
        match self {
            RgbStageOutput::Converted(rgb) => Some(rgb),
            RgbStageOutput::PassThrough(_) => None,
        }
    }
}

/// Integer matrix YUV to RGB converter.
pub struct RgbConversion<S: OutputSaver = NoopSaver> {
    config: RgbConversionConfig,
    saver: S,
}

impl RgbConversion<NoopSaver> {
    pub fn new(config: RgbConversionConfig) -> Self {
        Self {
            config,
            saver: NoopSaver,
        }
    }
}

impl<S: OutputSaver> RgbConversion<S> {
    pub fn with_saver(config: RgbConversionConfig, saver: S) -> Self {
        Self { config, saver }
    }

    pub fn config(&self) -> &RgbConversionConfig {
        &self.config
    }

    /// Converts every pixel with the configured standard's matrix.
    pub fn yuv_to_rgb(&self, yuv: &YuvImageData) -> Result<RgbImageData> {
        yuv.validate()?;

        let standard = self.config.color_standard;
        if self.config.stage.debug {
            info!("   - RGB - standard: {:?}", standard);
            info!("   - RGB - matrix  : {:?}", standard.yuv_to_rgb_matrix());
        }

        let stride = yuv.width * CHANNELS;
        let mut data = vec![0u8; yuv.data.len()];
        map_rows(&yuv.data, stride, &mut data, stride, |_, src, dst| {
            convert_row(src, dst, standard)
        });

        debug!("Converted {}x{} frame", yuv.width, yuv.height);
        Ok(RgbImageData {
            width: yuv.width,
            height: yuv.height,
            data,
        })
    }

    /// Runs the stage. A disabled stage hands back the input frame itself.
    #[instrument(skip(self, yuv), fields(width = yuv.width, height = yuv.height))]
    pub fn execute<'a>(&self, yuv: &'a YuvImageData, in_file: &str) -> Result<RgbStageOutput<'a>> {
        info!("RGB Conversion = {}", self.config.stage.enable);

        if !self.config.stage.enable {
            return Ok(RgbStageOutput::PassThrough(yuv));
        }

        let rgb = self.yuv_to_rgb(yuv)?;
        if self.config.stage.save {
            self.saver.save_output_array(in_file, RGB_SAVE_PREFIX, OutputArray::Rgb(&rgb))?;
        }
        Ok(RgbStageOutput::Converted(rgb))
    }
}
