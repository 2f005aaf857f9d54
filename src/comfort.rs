/// Classification of readings against a user's comfort preferences
use std::fmt;

use crate::models::{CurrentTelemetry, Preferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStatus {
    Comfortable,
    TooWarm,
    TooCool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityStatus {
    Comfortable,
    TooHumid,
    TooDry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComfortReport {
    pub temperature: TempStatus,
    pub humidity: HumidityStatus,
    pub fan_on: bool,
}

/// Threshold is inclusive: a reading exactly `temp_threshold` away is comfortable.
pub fn temperature_status(temperature: f64, prefs: &Preferences) -> TempStatus {
    if (temperature - prefs.preferred_temp).abs() <= prefs.temp_threshold {
        TempStatus::Comfortable
    } else if temperature > prefs.preferred_temp {
        TempStatus::TooWarm
    } else {
        TempStatus::TooCool
    }
}

pub fn humidity_status(humidity: f64, prefs: &Preferences) -> HumidityStatus {
    if (humidity - prefs.preferred_humidity).abs() <= prefs.humidity_threshold {
        HumidityStatus::Comfortable
    } else if humidity > prefs.preferred_humidity {
        HumidityStatus::TooHumid
    } else {
        HumidityStatus::TooDry
    }
}

/// The fan only runs for an occupied workspace that is warmer than the band allows.
pub fn fan_should_run(temperature: f64, occupied: bool, prefs: &Preferences) -> bool {
    occupied && temperature > prefs.preferred_temp + prefs.temp_threshold
}

pub fn evaluate(current: &CurrentTelemetry, prefs: &Preferences) -> ComfortReport {
    let sample = &current.sample;
    ComfortReport {
        temperature: temperature_status(sample.temperature, prefs),
        humidity: humidity_status(sample.humidity, prefs),
        fan_on: fan_should_run(sample.temperature, sample.occupied, prefs),
    }
}

impl fmt::Display for TempStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TempStatus::Comfortable => "comfortable",
            TempStatus::TooWarm => "too warm",
            TempStatus::TooCool => "too cool",
        };
        f.write_str(label)
    }
}

impl fmt::Display for HumidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HumidityStatus::Comfortable => "comfortable",
            HumidityStatus::TooHumid => "too humid",
            HumidityStatus::TooDry => "too dry",
        };
        f.write_str(label)
    }
}
