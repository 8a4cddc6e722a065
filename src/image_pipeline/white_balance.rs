//! White balance module
//!
//! Scales the red and blue photosites of a mosaiced frame by fixed-point gains.

mod gain_applier;
pub mod types;


pub use gain_applier::{WhiteBalance, WB_GAIN_FORMAT, WB_SAVE_PREFIX};
pub use types::{WhiteBalanceConfig, WhiteBalanceConfigBuilder};
