//! # relay-config
//!
//! Layered configuration loading for Relay using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RELAY_*` prefix, `__` as separator)
//! 2. Project-level `.relay/config.toml`
//! 3. User-level `~/.config/relay/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RELAY_API__BASE_URL` -> `api.base_url`,
//! `RELAY_IDENTITY__USER_ID` -> `identity.user_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use relay_config::RelayConfig;
//!
//! let config = RelayConfig::load_with_dotenv().expect("config");
//!
//! if config.identity.is_configured() {
//!     println!("Acting as {} in {}", config.identity.user_id, config.identity.space_id);
//! }
//! ```

mod api;
mod board;
mod error;
mod identity;
mod poll;
mod report;

pub use api::ApiConfig;
pub use board::BoardConfig;
pub use error::ConfigError;
pub use identity::IdentityConfig;
pub use poll::{PollConfig, RetryConfig};
pub use report::ReportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use relay_core::window::DateRangePreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "RELAY_";
const PROJECT_CONFIG: &str = ".relay/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl RelayConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if a value fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Like [`Self::load`], with the project config looked up under
    /// `project_root`.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_at(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    pub fn figment() -> Figment {
        Self::figment_at(Path::new("."))
    }

    fn figment_at(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the client misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !base_url.is_empty()
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("'{base_url}' is not an http(s) URL"),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be at least 1"));
        }
        if self.board.default_range == DateRangePreset::Custom {
            return Err(ConfigError::invalid(
                "board.default_range",
                "custom needs explicit dates and cannot be a default",
            ));
        }
        let rate = self.report.cost_per_million_tokens;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::invalid(
                "report.cost_per_million_tokens",
                format!("{rate} is not a non-negative number"),
            ));
        }
        if self.report.currency.trim().is_empty() {
            return Err(ConfigError::invalid("report.currency", "must not be empty"));
        }
        if self.poll.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "poll.max_attempts",
                "polling needs at least one attempt",
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "retry.max_attempts",
                "must be at least 1 (the initial attempt)",
            ));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::invalid(
                "retry.base_delay_ms",
                "must not exceed retry.max_delay_ms",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relay").join("config.toml"))
    }

    /// Load `.env` from the workspace root, or the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RelayConfig::default();
        assert!(config.api.is_configured());
        assert!(!config.identity.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: RelayConfig = RelayConfig::figment_at(Path::new("/nonexistent"))
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.poll.max_attempts, 5);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn zero_poll_attempts_rejected() {
        let mut config = RelayConfig::default();
        config.poll.max_attempts = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "poll.max_attempts"));
    }

    #[test]
    fn nan_cost_rejected() {
        let mut config = RelayConfig::default();
        config.report.cost_per_million_tokens = f64::NAN;
        assert!(config.validate().is_err());
    }
}
