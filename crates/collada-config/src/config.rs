//! Converter settings with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "converter.ron";

/// Top-level converter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Material resolution settings.
    pub materials: MaterialConfig,
    /// Logging and diagnostics settings.
    pub debug: DebugConfig,
}

/// How the material registry is consulted before a new material is built.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RegistryKeying {
    /// Look up the material's own id, so every distinct material id gets
    /// exactly one converted record.
    #[default]
    PerMaterial,
    /// Reproduce the reference converter: once the default material exists,
    /// every further material resolves to it.
    LegacyDefaultShortCircuit,
}

impl RegistryKeying {
    /// Parse the CLI spelling (`per-material` or `legacy`).
    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name {
            "per-material" => Some(Self::PerMaterial),
            "legacy" => Some(Self::LegacyDefaultShortCircuit),
            _ => None,
        }
    }
}

/// Material resolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialConfig {
    /// Registry look-up policy used by the resolver.
    pub registry_keying: RegistryKeying,
}

/// Debug/diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g. "debug", "info,collada_materials=trace").
    pub log_level: String,
    /// Also write JSON logs next to the config file.
    pub log_to_file: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Per-user config directory for the converter.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("collada-converter"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as [`CONFIG_FILE_NAME`].
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized).map_err(ConfigError::Write)
    }
}
