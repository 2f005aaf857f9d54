use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::client::DEFAULT_HISTORY_HOURS;
use crate::models::PreferenceScope;

const DEFAULT_WORKSPACE_ID: &str = "workspace_1";
const DEFAULT_USER_ID: &str = "user_1";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: Url,
    pub workspace_id: String,
    pub user_id: String,
    pub poll_interval: Duration,
    pub history_hours: u32,
    pub request_timeout: Duration,
}

impl DashboardConfig {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("COMFORT_API_URL").ok_or(ConfigError::Missing("COMFORT_API_URL"))?;
        let api_url = parse_api_url(&raw_url)?;

        let workspace_id = non_empty(lookup("COMFORT_WORKSPACE_ID"))
            .unwrap_or_else(|| DEFAULT_WORKSPACE_ID.to_string());
        let user_id =
            non_empty(lookup("COMFORT_USER_ID")).unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let poll_secs = positive(
            "COMFORT_POLL_INTERVAL_SECS",
            lookup("COMFORT_POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let history_hours = positive(
            "COMFORT_HISTORY_HOURS",
            lookup("COMFORT_HISTORY_HOURS"),
            DEFAULT_HISTORY_HOURS,
        )?;
        let timeout_secs = positive(
            "COMFORT_REQUEST_TIMEOUT_SECS",
            lookup("COMFORT_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(DashboardConfig {
            api_url,
            workspace_id,
            user_id,
            poll_interval: Duration::from_secs(poll_secs),
            history_hours,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn scope(&self) -> PreferenceScope {
        PreferenceScope {
            user_id: self.user_id.clone(),
            workspace_id: self.workspace_id.clone(),
        }
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "COMFORT_API_URL",
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = non_empty(value) else {
        return Ok(default);
    };

    let parsed = raw.parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        value: raw.clone(),
        reason: e.to_string(),
    })?;

    if parsed <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(parsed)
}
