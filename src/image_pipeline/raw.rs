//! RAW image module
//!
//! Mosaiced sensor frames, the sensor metadata that travels with them and
//! format-agnostic RAW reading.

pub mod bayer;
mod reader;
mod rawloader_reader;
pub mod types;

pub use bayer::{BayerPattern, CfaChannel};
pub use reader::RawImageReader;
pub use rawloader_reader::RawLoaderReader;
pub use types::{RawImageData, SensorInfo};
