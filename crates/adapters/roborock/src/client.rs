//! Roborock cloud session and the routine client for one vacuum.

use std::time::Duration;

use litterlink_app::ports::ActionDeviceClient;
use litterlink_domain::device::ActionDevice;
use litterlink_domain::error::{DispatchError, NetworkError};
use litterlink_domain::id::{ActionDeviceId, RoutineId};
use litterlink_domain::routine::ActionRoutine;
use reqwest::StatusCode;

use crate::config::RoborockConfig;
use crate::error::RoborockError;
use crate::model::{HomeDataPayload, LoginPayload, ScenePayload};

/// Bound on any single request to the vendor cloud.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated Roborock account session.
///
/// Used once at startup to fetch the home topology, then consumed into a
/// [`RoborockClient`] bound to a single device.
pub struct RoborockSession {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RoborockSession {
    /// Authenticate against the Roborock cloud.
    ///
    /// # Errors
    ///
    /// Returns [`RoborockError::Unauthorized`] when the credentials are
    /// rejected, [`RoborockError::Http`] on transport failure.
    pub async fn login(config: &RoborockConfig) -> Result<Self, RoborockError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        tracing::info!(username = %config.username, "logging in to roborock");
        let response = http
            .post(format!("{}/auth/login", config.base_url))
            .json(&serde_json::json!({
                "username": config.username,
                "password": config.password,
            }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(RoborockError::Unauthorized);
        }
        let login: LoginPayload = response.error_for_status()?.json().await?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: login.token,
        })
    }

    /// Fetch the devices of the account's home topology.
    ///
    /// # Errors
    ///
    /// Returns [`RoborockError::Http`] on transport or decoding failure.
    pub async fn home_devices(&self) -> Result<Vec<ActionDevice>, RoborockError> {
        let home: HomeDataPayload = self
            .http
            .get(format!("{}/homes", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let devices: Vec<ActionDevice> = home
            .devices
            .into_iter()
            .map(crate::model::DevicePayload::into_device)
            .collect();
        tracing::info!(count = devices.len(), "fetched roborock home topology");
        Ok(devices)
    }

    /// Consume the session into a client bound to the given device.
    #[must_use]
    pub fn into_client(self, device: &ActionDevice) -> RoborockClient {
        RoborockClient {
            http: self.http,
            base_url: self.base_url,
            token: self.token,
            device_id: device.id.clone(),
        }
    }
}

/// Routine client for one vacuum.
pub struct RoborockClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    device_id: ActionDeviceId,
}

impl RoborockClient {
    async fn fetch_routines(&self) -> Result<Vec<ActionRoutine>, RoborockError> {
        let scenes: Vec<ScenePayload> = self
            .http
            .get(format!(
                "{}/devices/{}/routines",
                self.base_url, self.device_id
            ))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(scenes.into_iter().map(ScenePayload::into_routine).collect())
    }

    async fn post_execute(&self, id: &RoutineId) -> Result<(), RoborockError> {
        let response = self
            .http
            .post(format!("{}/routines/{}/execute", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            return Err(RoborockError::RoutineRejected { status });
        }
        response.error_for_status()?;
        Ok(())
    }
}

impl ActionDeviceClient for RoborockClient {
    async fn list_routines(&self) -> Result<Vec<ActionRoutine>, NetworkError> {
        self.fetch_routines()
            .await
            .map_err(|err| NetworkError::new("list routines", err))
    }

    /// One POST, no retry: the vendor call actuates a physical device.
    async fn execute_routine(&self, id: &RoutineId) -> Result<(), DispatchError> {
        match self.post_execute(id).await {
            Ok(()) => Ok(()),
            Err(RoborockError::RoutineRejected { status }) => {
                tracing::warn!(%status, routine = %id, "routine rejected by vendor");
                Err(DispatchError::NotExecutable { id: id.clone() })
            }
            Err(err) => Err(DispatchError::Transport(NetworkError::new(
                "execute routine",
                err,
            ))),
        }
    }
}
