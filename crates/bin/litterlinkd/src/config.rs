//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `litterlink.toml` in the working directory. Every field has a
//! default so the file is optional, but the four account credentials must be
//! provided (file or environment) — startup is fatal without them.
//! Environment variables take precedence over file values.

use std::time::Duration;

use litterlink_adapter_roborock::RoborockConfig;
use litterlink_adapter_whisker::WhiskerConfig;
use litterlink_app::automation_loop::LoopSettings;
use litterlink_domain::trigger::TriggerPolicy;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source account (litter box) settings.
    pub whisker: WhiskerConfig,
    /// Action account (vacuum) settings.
    pub roborock: RoborockConfig,
    /// Automation loop tuning.
    #[serde(rename = "loop")]
    pub automation: LoopConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Optional telemetry export.
    pub telemetry: TelemetryConfig,
}

/// Automation loop tuning knobs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Trigger strategy: `activity` (default) or `heartbeat`.
    pub policy: TriggerPolicy,
    /// Maximum age of an event/heartbeat still considered fresh, in seconds.
    pub staleness_window_secs: u64,
    /// Pause between polls, in seconds.
    pub poll_interval_secs: u64,
    /// Settle time between trigger and action, in seconds.
    pub pre_action_delay_secs: u64,
    /// Pause before re-polling when the routine is missing, in seconds.
    pub not_found_backoff_secs: u64,
    /// Cooldown after a successful execution, in seconds.
    pub post_action_cooldown_secs: u64,
    /// Name of the routine to execute.
    pub routine_name: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            policy: TriggerPolicy::default(),
            staleness_window_secs: 10 * 60,
            poll_interval_secs: 60,
            pre_action_delay_secs: 0,
            not_found_backoff_secs: 10,
            post_action_cooldown_secs: 15 * 60,
            routine_name: "Litter".to_string(),
        }
    }
}

impl LoopConfig {
    /// Convert into the loop's settings value.
    #[must_use]
    pub fn to_settings(&self) -> LoopSettings {
        LoopSettings {
            policy: self.policy,
            staleness_window: Duration::from_secs(self.staleness_window_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            pre_action_delay: Duration::from_secs(self.pre_action_delay_secs),
            not_found_backoff: Duration::from_secs(self.not_found_backoff_secs),
            post_action_cooldown: Duration::from_secs(self.post_action_cooldown_secs),
            routine_name: self.routine_name.clone(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "litterlinkd=info,litterlink=info".to_string(),
        }
    }
}

/// Telemetry export configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// OTLP endpoint for traces and logs. No-op when unset.
    pub otlp_url: Option<String>,
}

impl Config {
    /// Load configuration from `litterlink.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// required credential is missing after overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("litterlink.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WHISKER_USERNAME") {
            self.whisker.username = val;
        }
        if let Ok(val) = std::env::var("WHISKER_PASSWORD") {
            self.whisker.password = val;
        }
        if let Ok(val) = std::env::var("ROBOROCK_USERNAME") {
            self.roborock.username = val;
        }
        if let Ok(val) = std::env::var("ROBOROCK_PASSWORD") {
            self.roborock.password = val;
        }
        if let Ok(val) = std::env::var("LITTERLINK_OTLP_URL") {
            self.telemetry.otlp_url = Some(val);
        }
        if let Ok(val) = std::env::var("LITTERLINK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("WHISKER_USERNAME", &self.whisker.username),
            ("WHISKER_PASSWORD", &self.whisker.password),
            ("ROBOROCK_USERNAME", &self.roborock.username),
            ("ROBOROCK_PASSWORD", &self.roborock.password),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingCredential(name));
            }
        }
        Ok(())
    }
}

/// Configuration errors. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A required credential was provided neither in the file nor the
    /// environment.
    #[error("missing required credential {0}")]
    MissingCredential(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials(mut config: Config) -> Config {
        config.whisker.username = "cat@example.com".to_string();
        config.whisker.password = "secret".to_string();
        config.roborock.username = "vac@example.com".to_string();
        config.roborock.password = "secret".to_string();
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.automation.poll_interval_secs, 60);
        assert_eq!(config.automation.staleness_window_secs, 600);
        assert_eq!(config.automation.post_action_cooldown_secs, 900);
        assert_eq!(config.automation.not_found_backoff_secs, 10);
        assert_eq!(config.automation.pre_action_delay_secs, 0);
        assert_eq!(config.automation.routine_name, "Litter");
        assert_eq!(config.automation.policy, TriggerPolicy::Activity);
        assert!(config.telemetry.otlp_url.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.automation.poll_interval_secs, 60);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            [whisker]
            username = 'cat@example.com'
            password = 'secret'

            [roborock]
            username = 'vac@example.com'
            password = 'secret'

            [loop]
            policy = 'heartbeat'
            staleness_window_secs = 300
            poll_interval_secs = 30
            pre_action_delay_secs = 120
            not_found_backoff_secs = 5
            post_action_cooldown_secs = 600
            routine_name = 'Sweep litter corner'

            [logging]
            filter = 'debug'

            [telemetry]
            otlp_url = 'http://localhost:4317'
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.automation.policy, TriggerPolicy::Heartbeat);
        assert_eq!(config.automation.poll_interval_secs, 30);
        assert_eq!(config.automation.pre_action_delay_secs, 120);
        assert_eq!(config.automation.routine_name, "Sweep litter corner");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.telemetry.otlp_url.as_deref(),
            Some("http://localhost:4317")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = r"
            [loop]
            post_action_cooldown_secs = 1200
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.automation.post_action_cooldown_secs, 1200);
        assert_eq!(config.automation.poll_interval_secs, 60);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.automation.poll_interval_secs, 60);
    }

    #[test]
    fn should_reject_missing_whisker_credentials() {
        let mut config = with_credentials(Config::default());
        config.whisker.password = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential("WHISKER_PASSWORD")
        ));
    }

    #[test]
    fn should_reject_missing_roborock_credentials() {
        let mut config = with_credentials(Config::default());
        config.roborock.username = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential("ROBOROCK_USERNAME")
        ));
    }

    #[test]
    fn should_accept_complete_credentials() {
        let config = with_credentials(Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_convert_loop_config_to_settings() {
        let config = LoopConfig {
            pre_action_delay_secs: 90,
            ..LoopConfig::default()
        };
        let settings = config.to_settings();
        assert_eq!(settings.pre_action_delay, Duration::from_secs(90));
        assert_eq!(settings.poll_interval, Duration::from_secs(60));
        assert_eq!(settings.routine_name, "Litter");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
