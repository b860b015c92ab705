//! Configuration loading and data directory resolution
//!
//! Data directory priority order:
//! 1. Command-line argument (`--data-dir`, highest priority)
//! 2. Environment variable (`RCP_DATA_DIR`)
//! 3. TOML config file (`data_dir`)
//! 4. Compiled default (`./output`)
//!
//! A missing config file is not an error; compiled defaults apply. A config
//! file that exists but does not parse is.

use crate::source::DataFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "RCP_DATA_DIR";

/// Environment variable overriding the data format
pub const FORMAT_ENV: &str = "RCP_FORMAT";

/// Data directory used when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = "./output";

/// Command-line options shared by every pipeline binary
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory holding the exported tables and receiving the artifacts
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Format of the exported tables and written reports
    #[arg(long, value_enum, env = "RCP_FORMAT")]
    pub format: Option<DataFormat>,

    /// Path to a TOML config file (default: platform config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Configuration file contents; every key is optional
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Input/output format
    #[serde(default)]
    pub format: Option<DataFormat>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Analytics report tuning
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Analytics report tuning
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Length of every top-N list in the report
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// How many most-liked recipes feed the engagement ingredient list
    #[serde(default = "default_engaged_recipes")]
    pub engaged_recipes: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            engaged_recipes: default_engaged_recipes(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_engaged_recipes() -> usize {
    5
}

/// Where the resolved data directory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

/// Fully resolved configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub data_dir_source: DataDirSource,
    pub format: DataFormat,
    pub logging: LoggingConfig,
    pub analytics: AnalyticsConfig,
    /// Config file that was read, if any
    pub config_file: Option<PathBuf>,
}

impl PipelineConfig {
    /// Resolve configuration from command-line args, environment and TOML
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - an explicitly requested config file does not exist
    /// - a config file exists but cannot be read or parsed
    /// - `RCP_FORMAT` names an unknown format
    pub fn load(args: &CommonArgs) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.clone()),
            None => default_config_file(),
        };

        let toml_config = match &config_file {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };

        let (data_dir, data_dir_source) =
            resolve_data_dir(args.data_dir.as_deref(), toml_config.data_dir.as_deref());

        let format = match args.format {
            Some(format) => format,
            None => match std::env::var(FORMAT_ENV) {
                Ok(value) => value.parse()?,
                Err(_) => toml_config.format.unwrap_or_default(),
            },
        };

        Ok(Self {
            data_dir,
            data_dir_source,
            format,
            logging: toml_config.logging,
            analytics: toml_config.analytics,
            config_file,
        })
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> std::result::Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Resolve the data directory following the priority order above
pub fn resolve_data_dir(
    cli_arg: Option<&Path>,
    toml_value: Option<&Path>,
) -> (PathBuf, DataDirSource) {
    if let Some(path) = cli_arg {
        return (path.to_path_buf(), DataDirSource::CommandLine);
    }

    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        if !path.is_empty() {
            return (PathBuf::from(path), DataDirSource::Environment);
        }
    }

    if let Some(path) = toml_value {
        return (path.to_path_buf(), DataDirSource::ConfigFile);
    }

    (PathBuf::from(DEFAULT_DATA_DIR), DataDirSource::Default)
}

/// First existing config file among the platform locations
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("rcp").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/rcp/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
