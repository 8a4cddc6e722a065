//! Image processing pipeline module
//!
//! Two bit-exact fixed-point ISP stages: white balance on the Bayer mosaic
//! and integer-matrix YUV to RGB conversion on full-colour frames. Both share
//! the fixed-point quantizer, stage gating and output saving in `common`.

pub mod common;
pub mod raw;
pub mod rgb_conversion;
pub mod white_balance;

pub use common::{
    FixedPointFormat,
    FixedPointGain,
    NoopSaver,
    OutputArray,
    OutputSaver,
    PipelineError,
    Result,
    StageConfig,
    TiffCompression,
    TiffOutputSaver,
    get_approximate,
    quantize,
};

pub use raw::{
    BayerPattern,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
    SensorInfo,
};

pub use white_balance::{
    WhiteBalance,
    WhiteBalanceConfig,
};

pub use rgb_conversion::{
    ColorStandard,
    RgbConversion,
    RgbConversionConfig,
    RgbImageData,
    RgbStageOutput,
    YuvImageData,
};
