use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid Bayer pattern: {0:?} (expected rggb, bggr, grbg or gbrg)")]
    InvalidPattern(String),

    #[error("Unsupported color standard selector: {0} (expected 1 for BT.709 or 2 for BT.601)")]
    UnsupportedColorStandard(i64),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported bit depth: {0} (expected 1..=16)")]
    UnsupportedBitDepth(u32),

    #[error("Invalid fixed-point format: U{integer_bits}.{fractional_bits}")]
    InvalidFixedPointFormat { integer_bits: u32, fractional_bits: u32 },

    #[error("Invalid fixed-point bit string: {0}")]
    InvalidBitString(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
