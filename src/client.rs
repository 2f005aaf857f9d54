/// Typed access to the comfort zone REST API
use std::time::Duration;

use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::{
    CurrentTelemetry, PreferenceScope, Preferences, PreferencesUpdate, TelemetrySample,
};

/// Look-back window used when the caller does not pick one
pub const DEFAULT_HISTORY_HOURS: u32 = 24;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API endpoint: {0}")]
    Endpoint(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error: {0}")]
    Status(StatusCode),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("preferences were not saved: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The service answers a save either with the stored record or with a
/// `{success, message}` acknowledgement.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SaveReply {
    Saved(Preferences),
    Ack {
        success: bool,
        #[serde(default)]
        message: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::Endpoint(format!("{} cannot carry a path", base)));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiClient { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Store preferences for a user and workspace
    ///
    /// # Returns
    /// The saved preferences as echoed by the service, or the submitted
    /// values when the service only acknowledges the write
    pub async fn save_preferences(
        &self,
        scope: &PreferenceScope,
        preferences: &Preferences,
    ) -> Result<Preferences, ApiError> {
        let url = self.endpoint(&["preferences"])?;
        let body = PreferencesUpdate { scope, preferences };

        let response = self.client.post(url).json(&body).send().await?;
        let reply: SaveReply = decode(expect_success(response)?).await?;

        match reply {
            SaveReply::Saved(saved) => Ok(saved),
            SaveReply::Ack { success: true, .. } => Ok(*preferences),
            SaveReply::Ack {
                success: false,
                message,
            } => Err(ApiError::Rejected(
                message.unwrap_or_else(|| "no reason given".to_string()),
            )),
        }
    }

    /// Fetch stored preferences; `None` when the service has nothing for the scope
    pub async fn get_preferences(
        &self,
        scope: &PreferenceScope,
    ) -> Result<Option<Preferences>, ApiError> {
        let url = self.endpoint(&["preferences"])?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("user_id", scope.user_id.as_str()),
                ("workspace_id", scope.workspace_id.as_str()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(expect_success(response)?).await
    }

    /// Latest reading for a workspace; `None` when the workspace has reported nothing yet
    pub async fn current_telemetry(
        &self,
        workspace_id: &str,
    ) -> Result<Option<CurrentTelemetry>, ApiError> {
        let url = self.endpoint(&["telemetry"])?;
        let response = self
            .client
            .get(url)
            .query(&[("workspace_id", workspace_id)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(expect_success(response)?).await
    }

    /// Samples recorded over the last `hours` hours, in whatever order the service returns them
    pub async fn telemetry_history(
        &self,
        workspace_id: &str,
        hours: u32,
    ) -> Result<Vec<TelemetrySample>, ApiError> {
        let url = self.endpoint(&["telemetry", "history"])?;
        let hours = hours.to_string();
        let response = self
            .client
            .get(url)
            .query(&[("workspace_id", workspace_id), ("hours", hours.as_str())])
            .send()
            .await?;

        decode(expect_success(response)?).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn expect_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    debug!("Response body: {}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}
