//! Configuration management for the schema tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (lts-schema.toml)
//! - Environment variables (LTS_SCHEMA__*)
//!
//! ## Example config file (lts-schema.toml):
//! ```toml
//! [schema]
//! path = "/usr/share/ltsp/lts_vars.conf"
//!
//! [locales]
//! dir = "/usr/share/locale"
//! extra = ["C", "POSIX"]
//!
//! [validation]
//! report_unknown_options = true
//! fail_on_warnings = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::locale::{self, DEFAULT_LOCALE_DIR};
use crate::validation::ValidationRegistry;

/// Main configuration for the schema tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LtsSchemaConfig {
    /// Schema source settings
    #[serde(default)]
    pub schema: SchemaSourceConfig,

    /// Console keymap locales
    #[serde(default)]
    pub locales: LocaleConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Where the variable schema is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSourceConfig {
    /// Path to the schema file
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,
}

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Directory whose subdirectories name the installed locales
    #[serde(default = "default_locale_dir")]
    pub dir: PathBuf,

    /// Locales accepted in addition to the discovered ones
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Print options the schema does not declare
    #[serde(default = "default_true")]
    pub report_unknown_options: bool,

    /// Exit with failure when any value is rejected
    #[serde(default)]
    pub fail_on_warnings: bool,
}

// Default value functions
fn default_schema_path() -> PathBuf {
    PathBuf::from("lts_vars.conf")
}

fn default_locale_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOCALE_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for SchemaSourceConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            dir: default_locale_dir(),
            extra: Vec::new(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            report_unknown_options: true,
            fail_on_warnings: false,
        }
    }
}

impl LtsSchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering a specific file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "lts-schema.toml",
            ".lts-schema.toml",
            "config/lts-schema.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("org", "ltsp", "lts-schema") {
            let xdg_config = config_dir.config_dir().join("lts-schema.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (LTS_SCHEMA__*)
        builder = builder.add_source(
            Environment::with_prefix("LTS_SCHEMA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Build a registry whose console keymaps are the configured locales.
    ///
    /// An unreadable locale directory is not fatal: only the extra locales
    /// are accepted then.
    pub fn build_registry(&self) -> ValidationRegistry {
        let mut locales = match locale::discover(&self.locales.dir) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(dir = %self.locales.dir.display(), error = %e, "could not read locale directory");
                Default::default()
            }
        };
        locales.extend(self.locales.extra.iter().cloned());
        ValidationRegistry::with_locales(locales)
    }
}
