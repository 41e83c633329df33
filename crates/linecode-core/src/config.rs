//! # Configuration System
//!
//! YAML-based configuration for the `linecode` tools:
//!
//! - Encoding defaults (scheme, whether to record a trace)
//! - Output settings (format, which sections to print)
//! - Logging
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `LINECODE_CONFIG` environment variable
//! 2. `./linecode.yaml` (current directory)
//! 3. `<user config dir>/linecode/config.yaml`
//! 4. `/etc/linecode/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! encoding:
//!   scheme: 8B6T
//!   trace: true
//!
//! output:
//!   format: json
//!   show_profile: true
//!
//! logging:
//!   level: debug
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::scheme::Scheme;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "LINECODE_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to write config: {0}")]
    Write(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Encoding defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Scheme used when none is given on the command line
    pub scheme: Scheme,
    /// Record the step-by-step trace
    pub trace: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::TwoB1Q,
            trace: true,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Print the trace steps (text format only, ignored when
    /// `encoding.trace` is off)
    pub show_trace: bool,
    /// Print the DC balance profile
    pub show_profile: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_trace: true,
            show_profile: false,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinecodeConfig {
    /// Configuration version
    pub version: String,
    /// Encoding defaults
    pub encoding: EncodingConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Default for LinecodeConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: EncodingConfig::default(),
            output: OutputConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl LinecodeConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if Path::new(&path).exists() {
                return Self::load_from(Path::new(&path));
            }
            tracing::warn!(path = %path, "{} points to a missing file, ignoring", CONFIG_ENV);
        }

        for path in &Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::Write(format!("{}: {}", path.display(), e)))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./linecode.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "linecode") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/linecode/config.yaml"));

        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.split('.').next() != Some("1") {
            return Err(ConfigError::Validation(format!(
                "unsupported config version '{}'",
                self.version
            )));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            encoding: EncodingConfig {
                scheme: Scheme::EightB6T,
                trace: true,
            },
            output: OutputConfig {
                show_profile: true,
                ..Default::default()
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}
