use crate::scheduler::DEFAULT_HINT_FALLBACK;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Shuffle due cards before each session (default: true)
    #[serde(default = "default_shuffle_cards")]
    pub shuffle_cards: bool,

    /// Text shown for cards without a hint (default: "You do not deserve hint")
    #[serde(default = "default_hint_fallback")]
    pub hint_fallback: String,

    /// Path to decks directory
    #[serde(default = "default_decks_dir")]
    pub decks_dir: PathBuf,
}

fn default_shuffle_cards() -> bool {
    true
}

fn default_hint_fallback() -> String {
    DEFAULT_HINT_FALLBACK.to_string()
}

fn default_decks_dir() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("leitner").join("decks"))
        .unwrap_or_else(|| PathBuf::from("decks"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shuffle_cards: default_shuffle_cards(),
            hint_fallback: default_hint_fallback(),
            decks_dir: default_decks_dir(),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(suffix) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(suffix);
    }
    path.to_path_buf()
}

impl Config {
    /// Load config from the default location or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load config from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.decks_dir = expand_tilde(&config.decks_dir);
        Ok(config)
    }

    /// Path to config file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("leitner").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Ensure the decks directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.decks_dir).with_context(|| {
            format!(
                "Failed to create decks directory: {}",
                self.decks_dir.display()
            )
        })?;
        Ok(())
    }
}
