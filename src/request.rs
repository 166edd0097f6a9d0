/// Request parameter assembly for the data-fetch collaborator.
///
/// Builds the complete parameter set a timeline query needs — field keys,
/// location, unit system, cadence, query window, exclusions — from one
/// resolved timeline spec. No I/O happens here; the collaborator owns the
/// wire format and transport.
///
/// # Clock injection
/// Window arithmetic takes a `now: DateTime<Utc>` parameter rather than
/// calling `Utc::now()` internally, so tests stay deterministic.

use chrono::{DateTime, Duration, Utc};

use crate::logging::{self, Stage};
use crate::model::{ExcludeInterval, PreparedConfig, ResolvedTimelineSpec, UnitSystem, TIMESTEP_CURRENT};

// ---------------------------------------------------------------------------
// Request type
// ---------------------------------------------------------------------------

/// Everything one timeline query needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRequest {
    /// Canonical API field keys, in resolution order.
    pub fields: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub units: UnitSystem,
    pub timestep: String,
    pub observations: u32,
    /// Start of the query window: now plus the configured offset.
    pub start_time: DateTime<Utc>,
    /// End of the query window: start plus `observations × timestep`.
    /// Equal to `start_time` for `current`.
    pub end_time: DateTime<Utc>,
    pub exclude_intervals: Vec<ExcludeInterval>,
}

// ---------------------------------------------------------------------------
// Timestep arithmetic
// ---------------------------------------------------------------------------

/// Parses a validated timestep token into a duration. Returns `None` for
/// `current`, which carries no cadence, and for values too large to
/// represent as a duration.
pub fn timestep_duration(timestep: &str) -> Option<Duration> {
    if timestep == TIMESTEP_CURRENT {
        return None;
    }
    let unit = timestep.chars().last()?;
    let value: i64 = timestep[..timestep.len() - 1].parse().ok()?;
    match unit {
        'm' => Duration::try_minutes(value),
        'h' => Duration::try_hours(value),
        'd' => Duration::try_days(value),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Builds the request for one resolved timeline at a given clock reading.
///
/// Window arithmetic never panics: an offset or span too large to
/// represent collapses to the unshifted time with a log line, matching
/// how the resolver degrades on bad input.
pub fn build_request_at(
    spec: &ResolvedTimelineSpec,
    config: &PreparedConfig,
    now: DateTime<Utc>,
) -> TimelineRequest {
    let start_time = Duration::try_hours(spec.start_time_hours)
        .and_then(|offset| now.checked_add_signed(offset))
        .unwrap_or_else(|| {
            logging::error(
                Stage::Request,
                Some(&spec.name),
                &format!(
                    "Start offset {}h is out of range, using the current time",
                    spec.start_time_hours
                ),
            );
            now
        });

    let end_time = if spec.timestep == TIMESTEP_CURRENT {
        start_time
    } else {
        let window = timestep_duration(&spec.timestep)
            .and_then(|step| i32::try_from(spec.forecast_observations).ok().and_then(|n| step.checked_mul(n)))
            .and_then(|span| start_time.checked_add_signed(span));
        window.unwrap_or_else(|| {
            logging::error(
                Stage::Request,
                Some(&spec.name),
                &format!(
                    "Query window {} × {} observations is out of range, using the start time",
                    spec.timestep, spec.forecast_observations
                ),
            );
            start_time
        })
    };

    TimelineRequest {
        fields: spec.field_keys().iter().map(|k| k.to_string()).collect(),
        latitude: config.latitude,
        longitude: config.longitude,
        units: config.units,
        timestep: spec.timestep.clone(),
        observations: spec.forecast_observations,
        start_time,
        end_time,
        exclude_intervals: spec.exclude_intervals.clone(),
    }
}

/// Convenience wrapper using the real current time. Use `build_request_at`
/// in tests to keep them deterministic.
pub fn build_request(spec: &ResolvedTimelineSpec, config: &PreparedConfig) -> TimelineRequest {
    build_request_at(spec, config, Utc::now())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
