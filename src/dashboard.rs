/// Dashboard glue: error policy around the API client and frame assembly
use futures_util::future::join;
use log::{debug, error, info, warn};

use crate::client::{ApiClient, ApiError};
use crate::comfort::{evaluate, ComfortReport};
use crate::history::normalize_history;
use crate::models::{CurrentTelemetry, NormalizedSeries, PreferenceScope, Preferences};

/// Everything one refresh produces for a chart surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFrame {
    pub current: Option<CurrentTelemetry>,
    pub comfort: Option<ComfortReport>,
    pub history: Option<NormalizedSeries>,
}

/// Something that can display a dashboard frame
pub trait ChartSurface {
    fn draw(&mut self, frame: &DashboardFrame) -> std::io::Result<()>;
}

pub struct Dashboard {
    client: ApiClient,
    scope: PreferenceScope,
    history_hours: u32,
}

impl Dashboard {
    pub fn new(client: ApiClient, scope: PreferenceScope, history_hours: u32) -> Self {
        Dashboard {
            client,
            scope,
            history_hours,
        }
    }

    pub fn scope(&self) -> &PreferenceScope {
        &self.scope
    }

    /// Save preferences; failures are logged and handed back for the caller to surface
    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<Preferences, ApiError> {
        info!("Saving preferences: {:?}", preferences);
        match self.client.save_preferences(&self.scope, preferences).await {
            Ok(saved) => {
                info!("Preferences saved: {:?}", saved);
                Ok(saved)
            }
            Err(e) => {
                error!("Error saving preferences: {}", e);
                Err(e)
            }
        }
    }

    pub async fn load_preferences(&self) -> Option<Preferences> {
        match self.client.get_preferences(&self.scope).await {
            Ok(Some(preferences)) => {
                debug!("Retrieved preferences: {:?}", preferences);
                Some(preferences)
            }
            Ok(None) => {
                warn!(
                    "No preferences stored for {} in {}",
                    self.scope.user_id, self.scope.workspace_id
                );
                None
            }
            Err(e) => {
                error!("Error getting preferences: {}", e);
                None
            }
        }
    }

    pub async fn current(&self) -> Option<CurrentTelemetry> {
        match self.client.current_telemetry(&self.scope.workspace_id).await {
            Ok(Some(current)) => {
                debug!("Retrieved telemetry: {:?}", current);
                Some(current)
            }
            Ok(None) => {
                warn!("No telemetry yet for {}", self.scope.workspace_id);
                None
            }
            Err(e) => {
                error!("Error getting telemetry: {}", e);
                None
            }
        }
    }

    /// Fetch and normalize the configured look-back window
    pub async fn history(&self) -> Option<NormalizedSeries> {
        self.history_for(self.history_hours).await
    }

    pub async fn history_for(&self, hours: u32) -> Option<NormalizedSeries> {
        let samples = match self
            .client
            .telemetry_history(&self.scope.workspace_id, hours)
            .await
        {
            Ok(samples) => samples,
            Err(e) => {
                error!("Error getting telemetry history: {}", e);
                return None;
            }
        };

        match normalize_history(&samples) {
            Ok(series) => {
                if series.is_empty() {
                    warn!("No telemetry recorded in the last {} hours", hours);
                }
                Some(series)
            }
            Err(e) => {
                error!("Discarding telemetry history: {}", e);
                None
            }
        }
    }

    /// Latest reading only, with its comfort assessment
    pub async fn current_frame(&self, preferences: Option<&Preferences>) -> DashboardFrame {
        let current = self.current().await;
        frame(current, preferences, None)
    }

    /// Fetch current telemetry and history together and assemble a frame
    pub async fn refresh(&self, preferences: Option<&Preferences>) -> DashboardFrame {
        let (current, history) = join(self.current(), self.history()).await;
        frame(current, preferences, history)
    }
}

fn frame(
    current: Option<CurrentTelemetry>,
    preferences: Option<&Preferences>,
    history: Option<NormalizedSeries>,
) -> DashboardFrame {
    let comfort = match (&current, preferences) {
        (Some(current), Some(preferences)) => Some(evaluate(current, preferences)),
        _ => None,
    };

    DashboardFrame {
        current,
        comfort,
        history,
    }
}
