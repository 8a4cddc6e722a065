//! Common utilities module
//!
//! This module contains the pieces shared by every stage: the error type,
//! fixed-point gain quantization, per-stage gating flags and output saving.

pub mod error;
pub mod fixed_point;
pub mod output;
pub(crate) mod rows;
pub mod stage;

pub use error::{PipelineError, Result};
pub use fixed_point::{FixedPointFormat, FixedPointGain, get_approximate, parse_bits, quantize};
pub use output::{NoopSaver, OutputArray, OutputSaver, TiffCompression, TiffOutputSaver};
pub use stage::{StageConfig, StageConfigBuilder};
