/// Reshaping of telemetry history into chart-ready parallel sequences
use thiserror::Error;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::models::{NormalizedSeries, TelemetrySample};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("sample {index} has an unparsable timestamp {timestamp:?}: {source}")]
    InvalidTimestamp {
        index: usize,
        timestamp: String,
        #[source]
        source: time::error::Parse,
    },
}

/// Parse a telemetry timestamp
///
/// Accepts RFC 3339 and other ISO-8601 timestamps with an offset (extended
/// `+02:00` or basic `+0200`), and the offset-less ISO-8601 date-times the
/// sensors publish. Offset-less values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let rfc_err = match OffsetDateTime::parse(value, &Rfc3339) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    if let Ok(dt) = OffsetDateTime::parse(value, &Iso8601::DEFAULT) {
        return Ok(dt);
    }

    // Only a value with no offset at all may be read as UTC
    PrimitiveDateTime::parse(value, &Iso8601::DEFAULT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| rfc_err)
}

/// Format a timestamp as `H:MM` for chart labels, in the offset it carries
pub fn format_clock(dt: &OffsetDateTime) -> String {
    format!("{}:{:02}", dt.hour(), dt.minute())
}

/// Sort samples chronologically and split them into parallel sequences
///
/// The sort is stable, so samples sharing an instant keep their input order.
/// Every timestamp is parsed before anything is emitted; the first one that
/// fails aborts the whole normalization.
///
/// # Arguments
/// * `samples` - Telemetry samples in any order
///
/// # Returns
/// NormalizedSeries ordered oldest first, or the first timestamp parse failure
pub fn normalize_history(samples: &[TelemetrySample]) -> Result<NormalizedSeries, HistoryError> {
    let mut timed = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            parse_timestamp(&sample.timestamp)
                .map(|at| (at, sample))
                .map_err(|source| HistoryError::InvalidTimestamp {
                    index,
                    timestamp: sample.timestamp.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    timed.sort_by_key(|(at, _)| *at);

    let mut series = NormalizedSeries::with_capacity(timed.len());
    for (at, sample) in timed {
        series.timestamps.push(format_clock(&at));
        series.temperature.push(sample.temperature);
        series.humidity.push(sample.humidity);
        series.occupied.push(sample.occupied);
    }

    Ok(series)
}
