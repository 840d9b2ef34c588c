//! Roborock adapter configuration.

use serde::Deserialize;

/// Configuration for the Roborock cloud session.
///
/// Credentials default to empty so the embedding config can be built from an
/// optional file; the composition root validates that they were provided.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoborockConfig {
    /// Account username (email).
    pub username: String,
    /// Account password.
    pub password: String,
    /// API base URL. Overridable for tests and regional endpoints.
    pub base_url: String,
}

impl Default for RoborockConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            base_url: "https://api.roborock.com/v1".to_string(),
        }
    }
}

impl RoborockConfig {
    /// Build a config with the default base URL.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_default_base_url() {
        let config = RoborockConfig::new("vac@example.com", "secret");
        assert_eq!(config.base_url, "https://api.roborock.com/v1");
    }

    #[test]
    fn should_deserialize_with_base_url_override() {
        let toml = r#"
            username = "vac@example.com"
            password = "secret"
            base_url = "http://localhost:8081"
        "#;
        let config: RoborockConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "http://localhost:8081");
    }
}
