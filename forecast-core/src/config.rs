use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::fetcher::{
    Units,
    openweather::{DEFAULT_BASE_URL, OpenWeatherFetcher},
};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Cupertino"
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    pub default_city: Option<String>,

    #[serde(default)]
    pub units: Units,

    /// Override for the OpenWeatherMap host.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the stored one.
    pub fn resolve_api_key(&self) -> Result<String> {
        let env = std::env::var(API_KEY_ENV).ok();
        let key = pick_api_key(env, self.api_key.as_deref());

        key.ok_or_else(|| {
            anyhow!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: run `forecast configure` or set {API_KEY_ENV}."
            )
        })
    }

    /// City given on the command line, falling back to `default_city`.
    pub fn resolve_city(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.default_city.clone())
            .filter(|city| !city.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No city given and no default city configured.\n\
                     Hint: pass a city, e.g. `forecast show London`, or run `forecast configure`."
                )
            })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Builds a fetcher from this configuration.
    pub fn fetcher(&self, units: Option<Units>) -> Result<OpenWeatherFetcher> {
        let api_key = self.resolve_api_key()?;
        let fetcher = OpenWeatherFetcher::new(api_key, units.unwrap_or(self.units));
        Ok(fetcher.with_base_url(self.base_url()))
    }
}

fn pick_api_key(env: Option<String>, stored: Option<&str>) -> Option<String> {
    [env, stored.map(str::to_owned)]
        .into_iter()
        .flatten()
        .find(|key| !key.trim().is_empty())
}
