//! Integer YUV to RGB multiply-accumulate-shift
//!
//! Coefficients are the 8-bit integer approximations scaled by `2^6`, so the
//! product is normalised with an arithmetic right shift rather than a float
//! divide. The shift floors toward negative infinity like the hardware
//! shifter it models.

use crate::image_pipeline::rgb_conversion::types::{CHANNELS, ColorStandard};

/// Offsets subtracted from `(Y, Cb, Cr)` before the multiply.
pub const YUV_OFFSET: [i32; 3] = [16, 128, 128];

/// Right shift normalising the integer product back to sample range.
pub const YUV_TO_RGB_SHIFT: u32 = 6;

pub const BT709_YUV_TO_RGB: [[i32; 3]; 3] = [
    [74, 0, 114],
    [74, -13, -34],
    [74, 135, 0],
];

pub const BT601_YUV_TO_RGB: [[i32; 3]; 3] = [
    [64, 87, 0],
    [64, -44, -20],
    [61, 0, 105],
];

impl ColorStandard {
    pub fn yuv_to_rgb_matrix(self) -> &'static [[i32; 3]; 3] {
        match self {
            ColorStandard::Bt709 => &BT709_YUV_TO_RGB,
            ColorStandard::Bt601 => &BT601_YUV_TO_RGB,
        }
    }
}

/// Converts one `[Y, Cb, Cr]` pixel to `[R, G, B]`.
#[inline]
pub fn convert_pixel(yuv: [u8; 3], standard: ColorStandard) -> [u8; 3] {
    let m = standard.yuv_to_rgb_matrix();
    let v = [
        yuv[0] as i32 - YUV_OFFSET[0],
        yuv[1] as i32 - YUV_OFFSET[1],
        yuv[2] as i32 - YUV_OFFSET[2],
    ];

    let mut rgb = [0u8; 3];
    for (out, row) in rgb.iter_mut().zip(m) {
        let acc = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
        *out = (acc >> YUV_TO_RGB_SHIFT).clamp(0, u8::MAX as i32) as u8;
    }
    rgb
}

/// Converts a run of interleaved YUV samples into `dst`, pixel by pixel.
pub(crate) fn convert_row(src: &[u8], dst: &mut [u8], standard: ColorStandard) {
    for (yuv, rgb) in src.chunks_exact(CHANNELS).zip(dst.chunks_exact_mut(CHANNELS)) {
        rgb.copy_from_slice(&convert_pixel([yuv[0], yuv[1], yuv[2]], standard));
    }
}
