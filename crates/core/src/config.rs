use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FrameRate;

/// User preferences for how timecodes are entered and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rate used when the caller does not supply one
    pub default_frame_rate: FrameRate,
    /// Prefix non-negative timecodes with `+`
    pub always_show_sign: bool,
    /// Permit a non-standard default rate
    pub allow_custom_rates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_frame_rate: FrameRate::Fps24,
            always_show_sign: false,
            allow_custom_rates: false,
        }
    }
}

/// Configuration manager for slate settings
/// Separates the schema (defaults and valid choices) from persisted values. Settings are
/// stored as JSON under the platform config directory unless a path is given.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

/// Available configuration options with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub display: DisplayConfigSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfigSchema {
    pub default_frame_rate: ConfigOption<FrameRate>,
    pub always_show_sign: ConfigOption<bool>,
    pub allow_custom_rates: ConfigOption<bool>,
}

/// Configuration option with validation and available choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption<T> {
    pub default: T,
    pub valid_choices: Option<Vec<T>>,
    pub description: String,
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    /// If no path is provided, defaults to `slate/config.json` in the user's config directory
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_path);

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("slate").join("config.json"),
            None => PathBuf::from("config.json"),
        }
    }

    /// Load settings from the configuration file
    /// A missing file yields defaults and is not created; persisting is left to `save`
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            log::debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            self.settings = Settings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Config file version {} doesn't match library version {}. Using defaults for new settings.",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Self::validate_settings(&config_file.settings).map_err(ConfigError::ValidationError)?;

        log::debug!("Loaded settings from {}", self.config_path.display());
        self.settings = config_file.settings;
        Ok(self.settings.clone())
    }

    /// Save current settings to the configuration file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let created_at = self.existing_created_at().unwrap_or_else(|| now.clone());
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at,
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        log::debug!("Saved settings to {}", self.config_path.display());
        Ok(())
    }

    /// `created_at` of the file being overwritten, if it is readable
    fn existing_created_at(&self) -> Option<String> {
        let content = fs::read_to_string(&self.config_path).ok()?;
        let config_file: ConfigFile = serde_json::from_str(&content).ok()?;
        Some(config_file.created_at)
    }

    /// Validate, then replace and save settings
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
        self.settings = settings;
        self.save()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get configuration schema with available options
    pub fn schema() -> ConfigSchema {
        ConfigSchema {
            display: DisplayConfigSchema {
                default_frame_rate: ConfigOption {
                    default: FrameRate::Fps24,
                    valid_choices: Some(FrameRate::STANDARD.to_vec()),
                    description: "Frame rate used when none is given".to_string(),
                },
                always_show_sign: ConfigOption {
                    default: false,
                    valid_choices: None,
                    description: "Show a leading + on non-negative timecodes".to_string(),
                },
                allow_custom_rates: ConfigOption {
                    default: false,
                    valid_choices: None,
                    description: "Allow a non-standard default frame rate".to_string(),
                },
            },
        }
    }

    /// Validate settings against schema
    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let schema = Self::schema();

        if !settings.allow_custom_rates {
            if let Some(choices) = &schema.display.default_frame_rate.valid_choices {
                if !choices.contains(&settings.default_frame_rate) {
                    errors.push(format!(
                        "default_frame_rate {} is not a standard rate (enable allow_custom_rates)",
                        settings.default_frame_rate
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Reset settings to defaults
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::default();
        self.save()
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
    #[error("Config validation errors: {}", .0.join(", "))]
    ValidationError(Vec<String>),
}
