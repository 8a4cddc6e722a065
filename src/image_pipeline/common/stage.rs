//! Per-stage gating flags

/// Flags every pipeline stage carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    /// Run the stage; a disabled stage passes its input through unchanged
    pub enable: bool,
    /// Hand the stage output to the output saver
    pub save: bool,
    /// Log stage internals (quantized gains, selected matrices)
    pub debug: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            enable: true,
            save: false,
            debug: false,
        }
    }
}

impl StageConfig {
    pub fn builder() -> StageConfigBuilder {
        StageConfigBuilder::default()
    }

    /// A stage that does nothing but pass frames through.
    pub fn disabled() -> Self {
        Self {
            enable: false,
            ..Self::default()
        }
    }
}

/// Builder for StageConfig
#[derive(Default)]
pub struct StageConfigBuilder {
    enable: Option<bool>,
    save: Option<bool>,
    debug: Option<bool>,
}

impl StageConfigBuilder {
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    pub fn save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn build(self) -> StageConfig {
        let default = StageConfig::default();
        StageConfig {
            enable: self.enable.unwrap_or(default.enable),
            save: self.save.unwrap_or(default.save),
            debug: self.debug.unwrap_or(default.debug),
        }
    }
}
