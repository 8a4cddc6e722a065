//! White balance configuration types

use crate::image_pipeline::common::stage::StageConfig;

/// Configuration for the white balance stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteBalanceConfig {
    pub stage: StageConfig,
    /// Take gains from the camera's as-shot coefficients when the frame carries them
    pub auto: bool,
    /// Gain applied to red photosites
    pub r_gain: f64,
    /// Gain applied to blue photosites
    pub b_gain: f64,
}

impl Default for WhiteBalanceConfig {
    fn default() -> Self {
        Self {
            stage: StageConfig::default(),
            auto: false,
            r_gain: 1.0,
            b_gain: 1.0,
        }
    }
}

impl WhiteBalanceConfig {
    pub fn builder() -> WhiteBalanceConfigBuilder {
        WhiteBalanceConfigBuilder::default()
    }
}

/// Builder for WhiteBalanceConfig
#[derive(Default)]
pub struct WhiteBalanceConfigBuilder {
    stage: Option<StageConfig>,
    auto: Option<bool>,
    r_gain: Option<f64>,
    b_gain: Option<f64>,
}

impl WhiteBalanceConfigBuilder {
    pub fn stage(mut self, stage: StageConfig) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn auto(mut self, auto: bool) -> Self {
        self.auto = Some(auto);
        self
    }

    pub fn r_gain(mut self, gain: f64) -> Self {
        self.r_gain = Some(gain);
        self
    }

    pub fn b_gain(mut self, gain: f64) -> Self {
        self.b_gain = Some(gain);
        self
    }

    pub fn build(self) -> WhiteBalanceConfig {
        let default = WhiteBalanceConfig::default();
        WhiteBalanceConfig {
            stage: self.stage.unwrap_or(default.stage),
            auto: self.auto.unwrap_or(default.auto),
            r_gain: self.r_gain.unwrap_or(default.r_gain),
            b_gain: self.b_gain.unwrap_or(default.b_gain),
        }
    }
}
