//! Unsigned fixed-point quantization of stage gains.
//!
//! Hardware ISP blocks hold gains in narrow registers, so a gain is never
//! applied as a float. It is first floored onto the `2^-F` grid of an
//! unsigned `I.F` format and clamped to the largest representable value.

use std::fmt;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Separator placed between integer and fractional digits of a bit string.
const BIT_SEPARATOR: char = '.';

/// Describes an unsigned fixed-point register layout (`U<I>.<F>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointFormat {
    integer_bits: u32,
    fractional_bits: u32,
}

impl FixedPointFormat {
    /// 16 integer bits, 8 fractional bits: the white balance gain register.
    pub const U16_8: Self = Self {
        integer_bits: 16,
        fractional_bits: 8,
    };

    /// Widest register the quantizer models.
    pub const MAX_TOTAL_BITS: u32 = 32;

    pub fn new(integer_bits: u32, fractional_bits: u32) -> Result<Self> {
        let total = integer_bits.checked_add(fractional_bits);
        match total {
            Some(total) if total > 0 && total <= Self::MAX_TOTAL_BITS => Ok(Self {
                integer_bits,
                fractional_bits,
            }),
            _ => Err(PipelineError::InvalidFixedPointFormat {
                integer_bits,
                fractional_bits,
            }),
        }
    }

    pub fn integer_bits(&self) -> u32 {
        self.integer_bits
    }

    pub fn fractional_bits(&self) -> u32 {
        self.fractional_bits
    }

    pub fn total_bits(&self) -> u32 {
        self.integer_bits + self.fractional_bits
    }

    /// Largest raw register value, `2^(I+F) - 1`.
    pub fn max_raw(&self) -> u64 {
        (1u64 << self.total_bits()) - 1
    }

    /// Number of raw steps per unit, `2^F`.
    pub fn scale(&self) -> f64 {
        (1u64 << self.fractional_bits) as f64
    }

    /// Value of one least significant bit, `2^-F`.
    pub fn step(&self) -> f64 {
        1.0 / self.scale()
    }

    /// Largest representable value, `2^I - 2^-F`.
    pub fn max_value(&self) -> f64 {
        self.max_raw() as f64 / self.scale()
    }
}

impl fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}.{}", self.integer_bits, self.fractional_bits)
    }
}

/// A gain after quantization.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPointGain {
    /// Quantized gain as a real number, exactly `raw * 2^-F`.
    pub value: f64,
    /// Register contents.
    pub raw: u64,
    /// `I` binary digits, `.`, then `F` binary digits, most significant first.
    pub bits: String,
    pub format: FixedPointFormat,
    /// Set when the input was outside `[0, max_value]` and had to be clamped.
    pub clamped: bool,
}

impl FixedPointGain {
    /// Real value held by the register.
    pub fn reconstruct(&self) -> f64 {
        self.raw as f64 / self.format.scale()
    }
}

impl fmt::Display for FixedPointGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}: {})", self.value, self.format, self.bits)
    }
}

/// Floors `gain` onto the grid of `format`.
///
/// Values above the representable range saturate at `format.max_value()`.
/// Negative and NaN inputs saturate at zero. Both cases set `clamped`; this
/// function never fails.
pub fn quantize(gain: f64, format: FixedPointFormat) -> FixedPointGain {
    let max_raw = format.max_raw();

    let (raw, clamped) = if gain.is_nan() || gain < 0.0 {
        (0, true)
    } else {
        let scaled = (gain * format.scale()).floor();
        if scaled > max_raw as f64 {
            (max_raw, true)
        } else {
            (scaled as u64, false)
        }
    };

    FixedPointGain {
        value: raw as f64 / format.scale(),
        raw,
        bits: to_bit_string(raw, format),
        format,
        clamped,
    }
}

/// Quantizes `gain` into an unsigned `integer_bits.fractional_bits` register.
pub fn get_approximate(gain: f64, integer_bits: u32, fractional_bits: u32) -> Result<FixedPointGain> {
    let format = FixedPointFormat::new(integer_bits, fractional_bits)?;
    Ok(quantize(gain, format))
}

/// Decodes a bit string produced by [`quantize`] back into its raw register value.
///
/// The separator is optional, but when present it must sit after the integer digits.
pub fn parse_bits(bits: &str, format: FixedPointFormat) -> Result<u64> {
    let invalid = || PipelineError::InvalidBitString(format!("{bits:?} is not a {format} value"));

    if let Some(pos) = bits.find(BIT_SEPARATOR) {
        if pos != format.integer_bits as usize || bits.matches(BIT_SEPARATOR).count() != 1 {
            return Err(invalid());
        }
    }

    let mut raw = 0u64;
    let mut digits = 0u32;
    for c in bits.chars().filter(|&c| c != BIT_SEPARATOR) {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            _ => return Err(invalid()),
        };
        digits += 1;
        if digits > format.total_bits() {
            return Err(invalid());
        }
        raw = (raw << 1) | bit;
    }

    if digits != format.total_bits() {
        return Err(invalid());
    }
    Ok(raw)
}

fn to_bit_string(raw: u64, format: FixedPointFormat) -> String {
    let total = format.total_bits();
    let mut out = String::with_capacity(total as usize + 1);
    for i in 0..total {
        if i == format.integer_bits {
            out.push(BIT_SEPARATOR);
        }
        let bit = (raw >> (total - 1 - i)) & 1;
        out.push(if bit == 1 { '1' } else { '0' });
    }
    if format.fractional_bits == 0 {
        out.push(BIT_SEPARATOR);
    }
    out
}
