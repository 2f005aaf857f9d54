//! Client for the comfort zone API: preferences, live telemetry and
//! chart-ready telemetry history for a workspace.

pub mod client;
pub mod comfort;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod models;
pub mod render;
pub mod utils;

pub use client::{ApiClient, ApiError, DEFAULT_HISTORY_HOURS};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{ChartSurface, Dashboard, DashboardFrame};
pub use history::{normalize_history, HistoryError};
pub use models::{CurrentTelemetry, NormalizedSeries, PreferenceScope, Preferences, TelemetrySample};
