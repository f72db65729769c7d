use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::error::{KatalogError, Result};
use crate::normalizer::{AUTHOR_UNAVAILABLE, Normalizer, TITLE_UNAVAILABLE};

/// Root application configuration, loaded from `~/.config/katalog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub aliases: AliasTable,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file holding the catalog as an array of records.
    pub path: String,
    pub featured_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title_unavailable: String,
    pub author_unavailable: String,
    /// Category tiles on the home screen, in display order.
    pub category_tiles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"katalog_core=trace"`.
    pub level: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for CatalogConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("katalog");

        Self {
            path: data_dir.join("books.json").to_string_lossy().to_string(),
            featured_limit: 10,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title_unavailable: TITLE_UNAVAILABLE.to_string(),
            author_unavailable: AUTHOR_UNAVAILABLE.to_string(),
            category_tiles: ["Fiksi", "Pendidikan", "Bisnis", "Sains"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/katalog/config.toml`
    pub fn config_path() -> PathBuf {
        // Allow override via env var
        if let Ok(path) = std::env::var("KATALOG_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("katalog")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.aliases.validate()?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) {
        self.catalog.path = path.to_string_lossy().to_string();
    }

    /// Set one value by its dotted key, as used by `katalog config set`.
    /// `display.category_tiles` takes a comma-separated list.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.path" => self.catalog.path = value.to_string(),
            "catalog.featured_limit" => {
                self.catalog.featured_limit = value.parse().map_err(|_| {
                    KatalogError::ConfigError(format!(
                        "catalog.featured_limit must be a non-negative integer, got `{value}`"
                    ))
                })?;
            }
            "display.title_unavailable" => self.display.title_unavailable = value.to_string(),
            "display.author_unavailable" => self.display.author_unavailable = value.to_string(),
            "display.category_tiles" => {
                self.display.category_tiles = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "log.level" => self.log.level = value.to_string(),
            _ => {
                return Err(KatalogError::ConfigError(format!("unknown config key: {key}")));
            }
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog.path)
    }

    /// Normalizer configured with this config's aliases and sentinels.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.aliases.clone()).with_sentinels(
            self.display.title_unavailable.clone(),
            self.display.author_unavailable.clone(),
        )
    }
}
