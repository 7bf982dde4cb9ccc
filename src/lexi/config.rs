use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

const CONFIG_FILENAME: &str = "config.json";

/// Practice mode used when `lexi practice` is run without `--mode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultMode {
    #[default]
    All,
    Forgot,
}

impl fmt::Display for DefaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultMode::All => f.write_str("all"),
            DefaultMode::Forgot => f.write_str("forgot"),
        }
    }
}

impl FromStr for DefaultMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DefaultMode::All),
            "forgot" => Ok(DefaultMode::Forgot),
            other => Err(format!("unknown practice mode '{}' (use all or forgot)", other)),
        }
    }
}

/// Configuration for lexi, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiConfig {
    /// Language used when no `--language` is given
    #[serde(default)]
    pub current_language: Option<Uuid>,

    #[serde(default)]
    pub default_mode: DefaultMode,
}

/// Keys understood by `get` and `set`.
pub const CONFIG_KEYS: [&str; 2] = ["current-language", "default-mode"];

impl LexiConfig {
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "current-language" => Some(
                self.current_language
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            "default-mode" => Some(self.default_mode.to_string()),
            _ => None,
        }
    }

    /// Sets a user editable key. The current language is changed with
    /// `lexi language use` instead.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-mode" => {
                self.default_mode = value.parse()?;
                Ok(())
            }
            "current-language" => {
                Err("current-language is set with `lexi language use <index>`".to_string())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: LexiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
