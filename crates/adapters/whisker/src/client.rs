//! Whisker cloud session and the tracked litter box client.

use std::time::Duration;

use litterlink_app::ports::SourceDeviceClient;
use litterlink_domain::device::SourceDevice;
use litterlink_domain::error::NetworkError;
use litterlink_domain::id::SourceDeviceId;
use litterlink_domain::snapshot::SourceDeviceSnapshot;
use reqwest::StatusCode;

use crate::config::WhiskerConfig;
use crate::error::WhiskerError;
use crate::model::{ActivityPayload, LoginPayload, RobotPayload, RobotStatePayload};

/// Bound on any single request to the vendor cloud.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated Whisker account session.
///
/// Used once at startup to enumerate the account's robots, then consumed
/// into a [`WhiskerClient`] tracking a single litter box. Teardown happens
/// exactly once, via `Drop`, on success and failure paths alike.
pub struct WhiskerSession {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl WhiskerSession {
    /// Authenticate against the Whisker cloud.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::Unauthorized`] when the credentials are
    /// rejected, [`WhiskerError::Http`] on transport failure.
    pub async fn connect(config: &WhiskerConfig) -> Result<Self, WhiskerError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        tracing::info!(username = %config.username, "connecting to whisker");
        let response = http
            .post(format!("{}/auth/login", config.base_url))
            .json(&serde_json::json!({
                "username": config.username,
                "password": config.password,
            }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(WhiskerError::Unauthorized);
        }
        let login: LoginPayload = response.error_for_status()?.json().await?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: login.token,
        })
    }

    /// Enumerate the account's robots.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::Http`] on transport or decoding failure.
    pub async fn robots(&self) -> Result<Vec<SourceDevice>, WhiskerError> {
        let payloads: Vec<RobotPayload> = self
            .http
            .get(format!("{}/robots", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let devices: Vec<SourceDevice> = payloads
            .into_iter()
            .map(RobotPayload::into_device)
            .collect();
        tracing::info!(count = devices.len(), "enumerated whisker robots");
        Ok(devices)
    }

    /// Consume the session into a client tracking the given litter box.
    #[must_use]
    pub fn into_client(self, litter_box: &SourceDevice) -> WhiskerClient {
        WhiskerClient {
            http: self.http,
            base_url: self.base_url,
            token: self.token,
            robot_id: litter_box.id.clone(),
        }
    }
}

/// Refresh client for one tracked litter box.
pub struct WhiskerClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    robot_id: SourceDeviceId,
}

impl WhiskerClient {
    async fn fetch_snapshot(&self) -> Result<SourceDeviceSnapshot, WhiskerError> {
        let state: RobotStatePayload = self
            .http
            .get(format!("{}/robots/{}", self.base_url, self.robot_id))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut activities: Vec<ActivityPayload> = self
            .http
            .get(format!(
                "{}/robots/{}/activities",
                self.base_url, self.robot_id
            ))
            .query(&[("limit", "1")])
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let latest_activity = match activities.drain(..).next() {
            Some(payload) => Some(payload.into_activity()?),
            None => None,
        };

        Ok(SourceDeviceSnapshot {
            latest_activity,
            last_seen: state.last_seen,
        })
    }
}

impl SourceDeviceClient for WhiskerClient {
    async fn refresh(&self) -> Result<SourceDeviceSnapshot, NetworkError> {
        self.fetch_snapshot()
            .await
            .map_err(|err| NetworkError::new("refresh litter box", err))
    }
}
