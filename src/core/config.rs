use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://us-central1-rom-exchange.cloudfunctions.net";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RomExchangeProviderConfig {
    pub base_url: String,
}

impl Default for RomExchangeProviderConfig {
    fn default() -> Self {
        RomExchangeProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub rom_exchange: RomExchangeProviderConfig,
}

/// Settings for one analysis run.
///
/// Every field is optional in the YAML file; missing ones fall back to the
/// defaults below. Relative paths resolve against the working directory:
///
/// - `cache_dir`: `cache`
/// - `dust_table`: `cardust.csv`
/// - `recipe_table`: `cardcraft.csv`
/// - `sale_tax`: `0.11`
/// - `top_n`: `10`
/// - `max_pages`: `1000`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_dust_table")]
    pub dust_table: PathBuf,
    #[serde(default = "default_recipe_table")]
    pub recipe_table: PathBuf,
    #[serde(default = "default_sale_tax")]
    pub sale_tax: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_dust_table() -> PathBuf {
    PathBuf::from("cardust.csv")
}

fn default_recipe_table() -> PathBuf {
    PathBuf::from("cardcraft.csv")
}

fn default_sale_tax() -> f64 {
    0.11
}

fn default_top_n() -> usize {
    10
}

fn default_max_pages() -> u32 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            cache_dir: default_cache_dir(),
            dust_table: default_dust_table(),
            recipe_table: default_recipe_table(),
            sale_tax: default_sale_tax(),
            top_n: default_top_n(),
            max_pages: default_max_pages(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "cardcraft", "cardcraft")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.sale_tax) {
            bail!("sale_tax must be in [0, 1), got {}", self.sale_tax);
        }
        if self.top_n == 0 {
            bail!("top_n must be at least 1");
        }
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        Ok(())
    }
}
