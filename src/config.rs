//! Configuration management
//!
//! File locations, prediction constants and server binding, stored as TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Model artifact and evaluation log locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Simulation and currency constants
    #[serde(default)]
    pub prediction: PredictionConfig,
    /// Web server binding
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Serialized model, loaded once at start
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    /// CSV history of predictions
    #[serde(default = "default_log_path")]
    pub evaluation_log: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/salary_predictor.json")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("model_evaluation_table.csv")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            evaluation_log: default_log_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Half-width of the noise used to simulate an actual salary
    #[serde(default = "default_noise_range")]
    pub noise_range: u32,
    /// INR per USD for display conversion
    #[serde(default = "default_exchange_rate")]
    pub usd_exchange_rate: f64,
}

fn default_noise_range() -> u32 {
    10_000
}

fn default_exchange_rate() -> f64 {
    83.2
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            noise_range: default_noise_range(),
            usd_exchange_rate: default_exchange_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "salary-predictor", "salary-predictor")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Show configuration loaded from `path`
pub fn show_config(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;

    println!("Configuration ({})", path.display());
    println!("  model:             {}", config.paths.model.display());
    println!("  evaluation log:    {}", config.paths.evaluation_log.display());
    println!("  noise range:       ±{}", config.prediction.noise_range);
    println!("  USD exchange rate: {} INR", config.prediction.usd_exchange_rate);
    println!("  server:            {}:{}", config.server.host, config.server.port);

    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
