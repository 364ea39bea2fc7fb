/// CLI configuration
use rave_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rave.toml";

#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(String);

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RaveConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token from a previous login
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl RaveConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `rave.toml` is read when present.
    /// `RAVE_` variables override file values (`RAVE_API__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn from_sources(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("RAVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| ConfigError(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError(format!(
                "api.base_url must be an http(s) URL, got {:?} (set RAVE_API__BASE_URL)",
                self.api.base_url
            )));
        }

        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(ConfigError(format!(
                "playback.initial_volume must be within 0.0-1.0, got {}",
                self.playback.initial_volume
            )));
        }

        if self.playback.seek_tolerance_secs < 0.0 {
            return Err(ConfigError(
                "playback.seek_tolerance_secs must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RaveConfig::from_sources(None, Some(HashMap::new())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert!(config.api.token.is_none());
        assert_eq!(config.playback.initial_volume, 1.0);
        assert_eq!(config.playback.seek_tolerance_secs, 0.5);
        config.validate().unwrap();
    }

    #[test]
    fn test_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://rave.example.com\"\ntoken = \"abc\"\n\n[playback]\ninitial_volume = 0.4"
        )
        .unwrap();

        let config = RaveConfig::from_sources(Some(file.path()), Some(HashMap::new())).unwrap();
        assert_eq!(config.api.base_url, "https://rave.example.com");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert!((config.playback.initial_volume - 0.4).abs() < f32::EPSILON);
        assert!(!config.playback.muted);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://rave.example.com\"").unwrap();

        let env = HashMap::from([
            ("RAVE_API__BASE_URL".to_string(), "http://10.0.0.2:3000".to_string()),
            ("RAVE_PLAYBACK__MUTED".to_string(), "true".to_string()),
        ]);

        let config = RaveConfig::from_sources(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:3000");
        assert!(config.playback.muted);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = RaveConfig::from_sources(
            Some(Path::new("/definitely/not/here/rave.toml")),
            Some(HashMap::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RaveConfig::default();
        config.api.base_url = "localhost:3000".into();
        assert!(config.validate().is_err());

        let mut config = RaveConfig::default();
        config.playback.initial_volume = 1.5;
        assert!(config.validate().is_err());
    }
}
