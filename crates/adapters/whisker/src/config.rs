//! Whisker adapter configuration.

use serde::Deserialize;

/// Configuration for the Whisker cloud session.
///
/// Credentials default to empty so the embedding config can be built from an
/// optional file; the composition root validates that they were provided.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhiskerConfig {
    /// Account username (email).
    pub username: String,
    /// Account password.
    pub password: String,
    /// API base URL. Overridable for tests and regional endpoints.
    pub base_url: String,
}

impl Default for WhiskerConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            base_url: "https://api.whisker.iothings.site/v1".to_string(),
        }
    }
}

impl WhiskerConfig {
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
