//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;

use trustweb_core::EngineConfig;
use trustweb_sim::SimulationConfig;

/// Full configuration for the `trustweb` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustwebConfig {
    /// Propagation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Synthetic scenario settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl TrustwebConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: TrustwebConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the engine and simulation sections.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.engine.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}
