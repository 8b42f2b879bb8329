//! Settings loaded from `config/settings.yaml` (template:
//! `config/settings.example.yaml`) with environment overrides for the
//! credentials and the dashboard port: `BOT_TOKEN`, `ADMIN_API_KEY`,
//! `UVICORN_PORT`.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rubika: RubikaSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub security: SecuritySettings,
    #[serde(default)]
    pub xp: XpSettings,
    #[serde(default)]
    pub cups: CupsSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub system: SystemSettings,
    #[serde(default)]
    pub webapp: WebappSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RubikaSettings {
    /// Overridden by the BOT_TOKEN environment variable.
    #[serde(default)]
    pub bot_token: Option<String>,
    pub owner_id: String,
    /// Chat that receives new applications for review.
    #[serde(default)]
    pub application_review_chat: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub path: PathBuf,
    #[serde(default)]
    pub backup_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub rate_limit_interval: f64,
    pub rate_limit_burst: usize,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            rate_limit_interval: 10.0,
            rate_limit_burst: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct XpSettings {
    pub message_character_reward: f64,
    pub message_reward_limit: i64,
    pub message_reward_cooldown: f64,
    pub milestone_interval: i64,
    pub leaderboard_size: usize,
}

impl Default for XpSettings {
    fn default() -> Self {
        Self {
            message_character_reward: 0.5,
            message_reward_limit: 20,
            message_reward_cooldown: 20.0,
            milestone_interval: 5,
            leaderboard_size: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CupsSettings {
    pub leaderboard_size: usize,
}

impl Default for CupsSettings {
    fn default() -> Self {
        Self { leaderboard_size: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub flush_interval: f64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self { flush_interval: 300.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// UTC offset for displayed timestamps, e.g. "+03:30".
    pub timezone: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            timezone: "+03:30".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebappSettings {
    pub enabled: bool,
    pub host: String,
    /// Overridden by the UVICORN_PORT environment variable.
    pub port: u16,
    /// Public URL shown on web-app buttons; defaults to none.
    pub public_url: Option<String>,
    /// Overridden by the ADMIN_API_KEY environment variable.
    pub admin_api_key: Option<String>,
}

impl Default for WebappSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1".to_string(),
            port: 8000,
            public_url: None,
            admin_api_key: None,
        }
    }
}

impl Settings {
    /// Loads and validates settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_yaml::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.rubika.owner_id.trim().is_empty() {
            return Err(SettingsError::Invalid("rubika.owner_id is empty".to_string()));
        }
        if self.webapp.enabled && self.admin_api_key().is_none() {
            return Err(SettingsError::Invalid(
                "webapp enabled without an admin key: set webapp.admin_api_key or ADMIN_API_KEY"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Bot token, preferring the BOT_TOKEN environment variable.
    pub fn bot_token(&self) -> Option<String> {
        env::var("BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                self.rubika
                    .bot_token
                    .clone()
                    .filter(|token| !token.trim().is_empty())
            })
    }

    /// Dashboard admin key, preferring the ADMIN_API_KEY environment variable.
    pub fn admin_api_key(&self) -> Option<String> {
        env::var("ADMIN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.webapp
                    .admin_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Dashboard listen port; UVICORN_PORT wins when set and parseable.
    pub fn webapp_port(&self) -> u16 {
        env::var("UVICORN_PORT")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(self.webapp.port)
    }

    /// URL for the dashboard buttons: the configured public URL when set.
    pub fn webapp_url(&self) -> Option<String> {
        self.webapp
            .public_url
            .clone()
            .filter(|url| !url.trim().is_empty())
    }
}
