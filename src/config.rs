//! Configuration handling for the login form

use crate::controller::ControllerSettings;
use crate::state::DEFAULT_MIN_PASSWORD_LENGTH;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the config file location
const CONFIG_PATH_ENV: &str = "NEON_LOGIN_CONFIG";

const DEFAULT_AUTH_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SUCCESS_RESET_DELAY_MS: u64 = 5_300;
const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1_500;
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;
const DEFAULT_DEMO_EMAIL: &str = "admin@cyberlab.com";
/// Must pass the default password rules, or the demo account cannot sign in
const DEFAULT_DEMO_PASSWORD: &str = "cyberlab1";

/// User configuration for the login form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginConfig {
    /// Upper bound on one sign-in call
    pub auth_timeout_ms: Option<u64>,
    /// How long the confirmation shows before the form resets
    pub success_reset_delay_ms: Option<u64>,
    /// Artificial latency of the simulated backend
    pub simulated_latency_ms: Option<u64>,
    /// Minimum accepted password length
    pub min_password_length: Option<usize>,
    /// How long a toast stays on screen
    pub notification_ttl_ms: Option<u64>,
    /// Append every attempt to the attempt log
    pub log_attempts: Option<bool>,
    /// Attempt log location
    pub attempt_log_path: Option<PathBuf>,
    /// Accounts accepted by the simulated backend, email to password
    pub demo_users: Option<HashMap<String, String>>,
}

impl LoginConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "neon", "neon-login")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: LoginConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms.unwrap_or(DEFAULT_AUTH_TIMEOUT_MS))
    }

    pub fn success_reset_delay(&self) -> Duration {
        Duration::from_millis(
            self.success_reset_delay_ms
                .unwrap_or(DEFAULT_SUCCESS_RESET_DELAY_MS),
        )
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(
            self.simulated_latency_ms
                .unwrap_or(DEFAULT_SIMULATED_LATENCY_MS),
        )
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
            .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(
            self.notification_ttl_ms
                .unwrap_or(DEFAULT_NOTIFICATION_TTL_MS),
        )
    }

    /// Where attempts are logged, `None` when logging is off or no location is known
    pub fn attempt_log_path(&self) -> Option<PathBuf> {
        if !self.log_attempts.unwrap_or(true) {
            return None;
        }
        self.attempt_log_path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("logs").join("connections.log"))
        })
    }

    pub fn demo_users(&self) -> HashMap<String, String> {
        self.demo_users.clone().unwrap_or_else(|| {
            HashMap::from([(
                DEFAULT_DEMO_EMAIL.to_string(),
                DEFAULT_DEMO_PASSWORD.to_string(),
            )])
        })
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            auth_timeout: self.auth_timeout(),
            success_reset_delay: self.success_reset_delay(),
        }
    }
}
