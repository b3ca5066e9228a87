//! HTTP client for the map backend.
//!
//! Four endpoints, all JSON except the command post:
//!
//! - `GET  /settlements` - settlement + tribe snapshot
//! - `GET  /entities`    - mobile entity snapshot
//! - `GET  /travels?id=` - recent movement of one entity, as plane points
//! - `POST /command`     - raw command string body
//!
//! There is no retry or backoff: a failed poll surfaces one notification
//! and the next scheduled poll tries again. An empty-body probe of
//! `/command` answering HTTP 405 means commands are disabled for the whole
//! session.

use shardmap_core::coords::PlanePoint;
use shardmap_core::entity::{EntityId, EntitySnapshot};
use shardmap_core::settlement::SettlementSnapshot;

use crate::error::{Result, ViewerError};

/// Client for the map backend.
#[derive(Debug, Clone)]
pub struct MapClient {
    http: reqwest::Client,
    base_url: String,
}

impl MapClient {
    /// Create a client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the current settlement snapshot.
    pub async fn settlements(&self) -> Result<SettlementSnapshot> {
        let url = format!("{}/settlements", self.base_url);
        let snapshot = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(snapshot)
    }

    /// Fetch the current entity snapshot.
    pub async fn entities(&self) -> Result<EntitySnapshot> {
        let url = format!("{}/entities", self.base_url);
        let snapshot = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(snapshot)
    }

    /// Fetch the recent travel path of one entity. Pure passthrough; the
    /// backend already reports plane points.
    pub async fn travel_path(&self, id: EntityId) -> Result<Vec<PlanePoint>> {
        let url = format!("{}/travels?id={id}", self.base_url);
        let path = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(path)
    }

    /// Probe whether the backend accepts commands this session.
    ///
    /// Posts an empty body; HTTP 405 means the feature is disabled.
    pub async fn commands_enabled(&self) -> Result<bool> {
        let url = format!("{}/command", self.base_url);
        let response = self.http.post(&url).body("").send().await?;
        Ok(response.status() != reqwest::StatusCode::METHOD_NOT_ALLOWED)
    }

    /// Send a command string to the backend.
    pub async fn send_command(&self, command: &str) -> Result<()> {
        let url = format!("{}/command", self.base_url);
        let response = self
            .http
            .post(&url)
            .body(command.to_string())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::METHOD_NOT_ALLOWED {
            Err(ViewerError::CommandsDisabled)
        } else {
            Err(ViewerError::CommandRejected {
                status: status.as_u16(),
            })
        }
    }
}
