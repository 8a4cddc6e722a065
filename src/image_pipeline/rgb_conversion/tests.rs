use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::output::{OutputArray, OutputSaver};
use crate::image_pipeline::common::stage::StageConfig;
use crate::image_pipeline::rgb_conversion::{
    ColorStandard, RGB_SAVE_PREFIX, RgbConversion, RgbConversionConfig, RgbImageData, RgbStageOutput, YuvImageData,
    convert_pixel,
};

struct MockSaver {
    saved: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
}

impl OutputSaver for MockSaver {
    fn save_output_array(&self, in_file: &str, prefix: &str, array: OutputArray<'_>) -> Result<()> {
        let OutputArray::Rgb(image) = array else {
            panic!("RGB conversion should only save RGB frames");
        };
        self.saved
            .lock()
            .unwrap()
            .push((in_file.to_string(), prefix.to_string(), image.data.clone()));
        Ok(())
    }
}

fn converter(standard: ColorStandard) -> RgbConversion {
    RgbConversion::new(RgbConversionConfig::builder().color_standard(standard).build())
}

fn gradient(width: usize, height: usize) -> YuvImageData {
    let data = (0..width * height * 3).map(|i| ((i * 37) % 256) as u8).collect();
    YuvImageData::new(width, height, data).unwrap()
}

#[test]
fn test_color_standard_selector() {
    assert_eq!(ColorStandard::try_from(1).unwrap(), ColorStandard::Bt709);
    assert_eq!(ColorStandard::try_from(2).unwrap(), ColorStandard::Bt601);
    assert!(matches!(
        ColorStandard::try_from(0),
        Err(PipelineError::UnsupportedColorStandard(0))
    ));
    assert_eq!(i64::from(ColorStandard::Bt709), 1);
}

#[test]
fn test_config_builder() {
    let config = RgbConversionConfig::builder().conv_standard(1).unwrap().build();
    assert_eq!(config.color_standard, ColorStandard::Bt709);
    assert!(config.stage.enable);

    assert!(RgbConversionConfig::builder().conv_standard(7).is_err());
    assert_eq!(RgbConversionConfig::default().color_standard, ColorStandard::Bt601);
}

#[test]
fn test_black_frame() {
    let yuv = YuvImageData::new(2, 1, vec![16, 128, 128, 16, 128, 128]).unwrap();
    for standard in [ColorStandard::Bt709, ColorStandard::Bt601] {
        let rgb = converter(standard).yuv_to_rgb(&yuv).unwrap();
        assert_eq!(rgb.data, vec![0; 6]);
    }
}

#[test]
fn test_standards_use_different_matrices() {
    let yuv = YuvImageData::new(1, 1, vec![180, 90, 200]).unwrap();

    // BT.709: v = (164, -38, 72)
    // R = 74*164 + 114*72 = 20344 -> 317 -> 255
    // G = 74*164 - 13*(-38) - 34*72 = 10182 -> 159
    // B = 74*164 + 135*(-38) = 7006 -> 109
    let rgb = converter(ColorStandard::Bt709).yuv_to_rgb(&yuv).unwrap();
    assert_eq!(rgb.pixel(0, 0), [255, 159, 109]);

    // BT.601: R = 64*164 + 87*(-38) = 7190 -> 112
    // G = 64*164 + 44*38 - 20*72 = 10728 -> 167
    // B = 61*164 + 105*72 = 17564 -> 274 -> 255
    let rgb = converter(ColorStandard::Bt601).yuv_to_rgb(&yuv).unwrap();
    assert_eq!(rgb.pixel(0, 0), [112, 167, 255]);
}

#[test]
fn test_negative_pre_clip_value_yields_zero() {
    let yuv = YuvImageData::new(1, 1, vec![20, 128, 255]).unwrap();
    // G = 74*4 - 34*127 = -4022
    let rgb = converter(ColorStandard::Bt709).yuv_to_rgb(&yuv).unwrap();
    assert_eq!(rgb.pixel(0, 0)[1], 0);
}

#[test]
fn test_frame_matches_per_pixel_transform() {
    let yuv = gradient(7, 5);
    for standard in [ColorStandard::Bt709, ColorStandard::Bt601] {
        let rgb = converter(standard).yuv_to_rgb(&yuv).unwrap();
        for row in 0..5 {
            for col in 0..7 {
                let i = (row * 7 + col) * 3;
                let expected = convert_pixel([yuv.data[i], yuv.data[i + 1], yuv.data[i + 2]], standard);
                assert_eq!(rgb.pixel(row, col), expected);
            }
        }
    }
}

#[test]
fn test_shape_mismatch() {
    assert!(matches!(
        YuvImageData::new(2, 2, vec![0; 8]),
        Err(PipelineError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        YuvImageData::new(0, 2, vec![]),
        Err(PipelineError::InvalidDimensions(0, 2))
    ));

    // Frames assembled by hand are checked too.
    let yuv = YuvImageData { width: 2, height: 2, data: vec![0; 4] };
    let result = converter(ColorStandard::Bt601).yuv_to_rgb(&yuv);
    assert!(matches!(result.unwrap_err(), PipelineError::ShapeMismatch { .. }));
}

#[test]
fn test_overflowing_dimensions_are_a_shape_mismatch() {
    assert!(matches!(
        YuvImageData::new(usize::MAX / 2, 1, vec![0; 3]),
        Err(PipelineError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        RgbImageData::new(usize::MAX, 2, vec![0; 6]),
        Err(PipelineError::ShapeMismatch { .. })
    ));

    let yuv = YuvImageData { width: usize::MAX, height: 1, data: vec![0; 3] };
    let result = converter(ColorStandard::Bt709).yuv_to_rgb(&yuv);
    assert!(matches!(result.unwrap_err(), PipelineError::ShapeMismatch { .. }));
}

#[test]
fn test_deterministic() {
    let yuv = gradient(33, 17);
    let stage = converter(ColorStandard::Bt709);
    assert_eq!(stage.yuv_to_rgb(&yuv).unwrap(), stage.yuv_to_rgb(&yuv).unwrap());
}

#[test]
fn test_disabled_passes_input_through() {
    let yuv = gradient(4, 4);
    let config = RgbConversionConfig::builder().stage(StageConfig::disabled()).build();

    let out = RgbConversion::new(config).execute(&yuv, "frame.raw").unwrap();
    match out {
        RgbStageOutput::PassThrough(frame) => assert!(std::ptr::eq(frame, &yuv)),
        RgbStageOutput::Converted(_) => panic!("disabled stage converted the frame"),
    }
}

#[test]
fn test_disabled_accepts_malformed_frame() {
    let yuv = YuvImageData { width: 3, height: 3, data: vec![1, 2] };
    let config = RgbConversionConfig::builder().stage(StageConfig::disabled()).build();
    let out = RgbConversion::new(config).execute(&yuv, "frame.raw").unwrap();
    assert_eq!(out.data(), &[1, 2]);
    assert!(!out.is_converted());
}

#[test]
fn test_enabled_execute_converts() {
    let yuv = YuvImageData::new(1, 1, vec![235, 128, 128]).unwrap();
    let out = converter(ColorStandard::Bt709).execute(&yuv, "frame.raw").unwrap();
    assert!(out.is_converted());
    assert_eq!(out.into_rgb().unwrap().data, vec![253, 253, 253]);
}

#[test]
fn test_save_hands_rgb_to_saver() {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let config = RgbConversionConfig::builder()
        .stage(StageConfig::builder().save(true).build())
        .color_standard(ColorStandard::Bt709)
        .build();
    let stage = RgbConversion::with_saver(config, MockSaver { saved: saved.clone() });

    let yuv = YuvImageData::new(1, 1, vec![16, 128, 128]).unwrap();
    stage.execute(&yuv, "scene.raw").unwrap();

    assert_eq!(
        *saved.lock().unwrap(),
        vec![("scene.raw".to_string(), RGB_SAVE_PREFIX.to_string(), vec![0, 0, 0])]
    );
}
