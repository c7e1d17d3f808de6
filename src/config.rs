//! Client configuration loaded from `config.toml`

use crate::error::{KoiFoxError, KoiFoxResult};
use crate::goal::GoalMode;
use crate::submission::DEFAULT_SESSION_ID;
use crate::tone::ToneParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base address of the analysis backend
    pub base_url: String,
    /// Session id sent with every analysis
    pub session_id: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
        }
    }
}

/// Initial slider values and step size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub aggressiveness: f64,
    pub interruptiveness: f64,
    pub structure_strength: f64,
    /// Amount a single arrow key press moves a slider
    pub step: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        let tone = ToneParameters::default();
        Self {
            aggressiveness: tone.aggressiveness,
            interruptiveness: tone.interruptiveness,
            structure_strength: tone.structure_strength,
            step: 0.05,
        }
    }
}

impl ToneConfig {
    pub fn initial(&self) -> ToneParameters {
        ToneParameters {
            aggressiveness: self.aggressiveness,
            interruptiveness: self.interruptiveness,
            structure_strength: self.structure_strength,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Goal mode selected at startup
    pub default_mode: GoalMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file for the terminal UI; defaults to `koifox.log` in the config directory
    pub file: Option<PathBuf>,
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub tone: ToneConfig,
    pub goal: GoalConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Directory holding `config.toml` and the log file
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("koifox"))
    }

    /// Default location of `config.toml`
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from file; a missing file yields defaults
    pub fn load_from_file(path: &Path) -> KoiFoxResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| KoiFoxError::config(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| KoiFoxError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or the default location if none is given
    pub fn load(path: Option<&Path>) -> KoiFoxResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> KoiFoxResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> KoiFoxResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> KoiFoxResult<()> {
        url::Url::parse(&self.backend.base_url).map_err(|e| {
            KoiFoxError::config(format!(
                "Invalid backend base_url '{}': {}",
                self.backend.base_url, e
            ))
        })?;

        if !self.tone.initial().is_valid() {
            return Err(KoiFoxError::config("Tone values must be between 0.0 and 1.0"));
        }

        if !(self.tone.step > 0.0 && self.tone.step <= 1.0) {
            return Err(KoiFoxError::config("Tone step must be in (0.0, 1.0]"));
        }

        Ok(())
    }

    /// Log file for the terminal UI
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| Self::config_dir().map(|dir| dir.join("koifox.log")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.base_url, DEFAULT_API_BASE);
        assert_eq!(config.backend.session_id, "demo");
        assert_eq!(config.goal.default_mode, GoalMode::Guided);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://localhost:9000\"\n\n[goal]\ndefault_mode = \"infer\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:9000");
        assert_eq!(config.backend.session_id, "demo");
        assert_eq!(config.goal.default_mode, GoalMode::Infer);
        assert_eq!(config.tone, ToneConfig::default());
    }

    #[test]
    fn test_out_of_range_tone_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tone]\naggressiveness = 1.5\n").unwrap();

        assert!(matches!(
            AppConfig::load_from_file(&path),
            Err(KoiFoxError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.backend.base_url = "127.0.0.1 8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.tone.step = 0.1;
        config.save_to_file(&path).unwrap();

        assert_eq!(AppConfig::load_from_file(&path).unwrap(), config);
    }
}
