//! Configuration management for countdown.
//!
//! Loads configuration from ${COUNTDOWN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for countdown configuration and the log directory.
    //!
    //! COUNTDOWN_HOME resolution order:
    //! 1. COUNTDOWN_HOME environment variable (if set)
    //! 2. ~/.config/countdown (default)

    use std::path::PathBuf;

    use anyhow::{Context, Result};

    /// Returns the countdown home directory.
    ///
    /// # Errors
    /// Returns an error if COUNTDOWN_HOME is unset and no home directory can be found.
    pub fn countdown_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("COUNTDOWN_HOME") {
            return Ok(PathBuf::from(home));
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("countdown"))
            .context("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be resolved.
    pub fn config_path() -> Result<PathBuf> {
        Ok(countdown_home()?.join("config.toml"))
    }
}

/// File name of the opt-in log file inside COUNTDOWN_HOME.
pub const LOG_FILE_NAME: &str = "countdown.log";

/// Key bindings for pausing and resuming the clock.
///
/// Matching is ASCII case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub pause: char,
    pub resume: char,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            pause: 'p',
            resume: 'c',
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Foreground color of the clock digits (color name or `#rrggbb`)
    pub clock_color: String,

    /// Foreground color of the title line
    pub title_color: String,

    /// Pause/resume key bindings
    #[serde(default)]
    pub keys: KeysConfig,
}

impl Config {
    const DEFAULT_COLOR: &str = "reset";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path()?)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the pause and resume keys collide.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let KeysConfig { pause, resume } = self.keys;
        if pause.eq_ignore_ascii_case(&resume) {
            anyhow::bail!("pause and resume keys are both '{pause}'");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_color: Self::DEFAULT_COLOR.to_string(),
            title_color: Self::DEFAULT_COLOR.to_string(),
            keys: KeysConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.keys.pause, 'p');
        assert_eq!(config.keys.resume, 'c');
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "clock_color = \"green\"\n[keys]\npause = \"s\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.clock_color, "green");
        assert_eq!(config.title_color, "reset");
        assert_eq!(config.keys.pause, 's');
        assert_eq!(config.keys.resume, 'c');
    }

    #[test]
    fn test_load_rejects_multi_char_key() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[keys]\npause = \"space\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_load_rejects_colliding_keys() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[keys]\npause = \"C\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("pause and resume keys are both 'C'"));
    }
}
