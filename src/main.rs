use std::path::PathBuf;

use anyhow::Context;
use isp_stages_rs::image_pipeline::{
    BayerPattern, ColorStandard, RawImageData, RawImageReader, RawLoaderReader, RgbConversion, RgbConversionConfig,
    SensorInfo, StageConfig, TiffOutputSaver, WhiteBalance, WhiteBalanceConfig, YuvImageData,
};
use isp_stages_rs::logger;

use tracing::{info, warn};

/// Synthetic 12-bit mosaic used when no RAW file is given.
fn synthetic_raw(width: usize, height: usize) -> RawImageData {
    let data = (0..width * height).map(|i| ((i * 13) % 4096) as u16).collect();
    let mut raw = RawImageData::new(width, height, data, 12);
    raw.bayer_pattern = Some(BayerPattern::Rggb);
    raw
}

/// Synthetic YUV ramp: luma along x, chroma along y.
fn synthetic_yuv(width: usize, height: usize) -> anyhow::Result<YuvImageData> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((16 + x * 219 / width.max(1)) as u8);
            data.push((y * 255 / height.max(1)) as u8);
            data.push((255 - y * 255 / height.max(1)) as u8);
        }
    }
    Ok(YuvImageData::new(width, height, data)?)
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting isp_stages...");

    let input = std::env::args().nth(1);
    let output_dir = PathBuf::from(std::env::args().nth(2).unwrap_or_else(|| ".".to_string()));
    let saver = TiffOutputSaver::new(output_dir.clone());

    let (in_file, raw) = match &input {
        Some(path) => {
            let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
            (path.clone(), RawLoaderReader.read_raw(&bytes)?)
        }
        None => {
            warn!("No RAW file given, using a synthetic 64x48 frame");
            ("synthetic.raw".to_string(), synthetic_raw(64, 48))
        }
    };

    let sensor = SensorInfo::from_frame(&raw)?;
    info!("Sensor: {}-bit {}", sensor.bit_depth, sensor.bayer_pattern);

    let wb_config = WhiteBalanceConfig::builder()
        .stage(StageConfig::builder().save(true).debug(true).build())
        .auto(raw.wb_coeffs.is_some())
        .r_gain(1.94)
        .b_gain(1.52)
        .build();
    let white_balance = WhiteBalance::with_saver(wb_config, sensor, saver.clone());
    let balanced = white_balance.execute(&raw, &in_file)?;
    info!("White balance produced {}x{} frame", balanced.width, balanced.height);

    let rgb_config = RgbConversionConfig::builder()
        .stage(StageConfig::builder().save(true).build())
        .color_standard(ColorStandard::Bt709)
        .build();
    let yuv = synthetic_yuv(raw.width.min(256), raw.height.min(256))?;
    let rgb = RgbConversion::with_saver(rgb_config, saver).execute(&yuv, &in_file)?;
    info!("RGB conversion done (converted: {})", rgb.is_converted());

    info!(output_dir = %output_dir.display(), "Outputs saved");
    Ok(())
}
