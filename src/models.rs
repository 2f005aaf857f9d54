use serde::{Deserialize, Serialize};

/// A single environmental reading for a workspace, as returned by the
/// telemetry service. Fields the service adds (e.g. `workspace_id`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub occupied: bool,
}

/// Latest reading plus the fan state reported by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTelemetry {
    #[serde(flatten)]
    pub sample: TelemetrySample,
    #[serde(default)]
    pub fan_state: bool,
}

/// Comfort targets and alert thresholds for one user in one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub preferred_temp: f64,
    pub temp_threshold: f64,
    pub preferred_humidity: f64,
    pub humidity_threshold: f64,
}

impl Default for Preferences {
    // Same values the preferences service falls back to for unknown users
    fn default() -> Self {
        Preferences {
            preferred_temp: 23.0,
            temp_threshold: 1.0,
            preferred_humidity: 50.0,
            humidity_threshold: 10.0,
        }
    }
}

/// Who the preferences belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceScope {
    pub user_id: String,
    pub workspace_id: String,
}

/// Body of `POST /preferences`: the scope and the preference values side by side.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesUpdate<'a> {
    #[serde(flatten)]
    pub scope: &'a PreferenceScope,
    #[serde(flatten)]
    pub preferences: &'a Preferences,
}

/// Time-ordered parallel sequences ready for plotting.
///
/// All four vectors have the same length and index `i` in each describes
/// the same sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    pub timestamps: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub occupied: Vec<bool>,
}

impl NormalizedSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        NormalizedSeries {
            timestamps: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            humidity: Vec::with_capacity(capacity),
            occupied: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_telemetry_flattens_sample_and_ignores_extra_fields() {
        let body = r#"{
            "workspace_id": "workspace_1",
            "timestamp": "2024-01-01T10:05:00.123456",
            "temperature": 23.5,
            "humidity": 45.0,
            "occupied": true,
            "fan_state": true
        }"#;
        let current: CurrentTelemetry = serde_json::from_str(body).unwrap();
        assert_eq!(current.sample.timestamp, "2024-01-01T10:05:00.123456");
        assert_eq!(current.sample.temperature, 23.5);
        assert!(current.sample.occupied);
        assert!(current.fan_state);
    }

    #[test]
    fn missing_occupancy_and_fan_state_default_to_false() {
        let body = r#"{"timestamp": "2024-01-01T10:05:00Z", "temperature": 21, "humidity": 40}"#;
        let current: CurrentTelemetry = serde_json::from_str(body).unwrap();
        assert!(!current.sample.occupied);
        assert!(!current.fan_state);
    }

    #[test]
    fn update_body_carries_scope_and_values() {
        let scope = PreferenceScope {
            user_id: "user_1".to_string(),
            workspace_id: "workspace_1".to_string(),
        };
        let preferences = Preferences::default();
        let body = serde_json::to_value(PreferencesUpdate {
            scope: &scope,
            preferences: &preferences,
        })
        .unwrap();

        assert_eq!(body["user_id"], "user_1");
        assert_eq!(body["workspace_id"], "workspace_1");
        assert_eq!(body["preferred_temp"], 23.0);
        assert_eq!(body["humidity_threshold"], 10.0);
    }

    #[test]
    fn preferences_round_trip_unchanged() {
        let preferences = Preferences {
            preferred_temp: 21.5,
            temp_threshold: 0.5,
            preferred_humidity: 45.0,
            humidity_threshold: 7.5,
        };
        let json = serde_json::to_string(&preferences).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preferences);
    }
}
