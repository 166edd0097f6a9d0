/// Legacy configuration translation.
///
/// Rewrites the old flat "monitored conditions" configuration (grouped by
/// API product) into new-style timeline specs, fills host defaults, and
/// resolves the unit system to its canonical value. Pure config→config:
/// absent keys take documented defaults and nothing here ever fails.

use crate::logging::{self, Stage};
use crate::model::{
    legacy_scalar, Config, HostDefaults, LegacyProduct, RawConfig, RawTimelineSpec, UnitSystem,
};

// ---------------------------------------------------------------------------
// Legacy product defaults
// ---------------------------------------------------------------------------

/// Default timestep per legacy product, used unless the block overrides it.
const REALTIME_TIMESTEP: &str = "1m";
const DAILY_TIMESTEP: &str = "1d";
const HOURLY_TIMESTEP: &str = "1h";
const NOWCAST_TIMESTEP: &str = "5m";

/// Realtime reports a single observation; forecast products default to 5.
const REALTIME_OBSERVATIONS: u32 = 1;
const FORECAST_OBSERVATIONS: u32 = 5;

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Translates a raw user configuration into canonical form.
///
/// Fills missing name/latitude/longitude from `defaults`, resolves the
/// unit system (explicit value wins, else the host preference; legacy
/// aliases map to the canonical pair), converts any legacy block into
/// appended new-style timeline specs, and discards the legacy block.
pub fn translate(raw: RawConfig, defaults: &HostDefaults) -> Config {
    let name = raw.name.unwrap_or_else(|| defaults.name.clone());
    let latitude = raw.latitude.unwrap_or(defaults.latitude);
    let longitude = raw.longitude.unwrap_or(defaults.longitude);
    let units = resolve_units(raw.units.as_deref(), defaults);

    let mut timelines = raw.timelines;
    if let Some(legacy) = raw.monitored_conditions {
        // Products are visited in the legacy block's documented order, so
        // synthesized timelines land deterministically.
        let products = [
            (legacy.realtime, REALTIME_TIMESTEP, REALTIME_OBSERVATIONS),
            (legacy.daily, DAILY_TIMESTEP, FORECAST_OBSERVATIONS),
            (legacy.hourly, HOURLY_TIMESTEP, FORECAST_OBSERVATIONS),
            (legacy.nowcast, NOWCAST_TIMESTEP, FORECAST_OBSERVATIONS),
        ];
        for (product, default_timestep, default_observations) in products {
            if let Some(product) = product {
                timelines.push(synthesize_timeline(
                    product,
                    default_timestep,
                    default_observations,
                ));
            }
        }
    }

    Config {
        api_key: raw.api_key,
        name,
        latitude,
        longitude,
        units,
        timelines,
    }
}

/// Explicit unit token wins; otherwise the host preference. An
/// unrecognizable explicit token falls back to the host preference with a
/// warning rather than aborting configuration loading.
fn resolve_units(token: Option<&str>, defaults: &HostDefaults) -> UnitSystem {
    let preferred = if defaults.prefers_metric {
        UnitSystem::Metric
    } else {
        UnitSystem::Imperial
    };
    match token {
        None => preferred,
        Some(token) => UnitSystem::from_token(token).unwrap_or_else(|| {
            logging::warn(
                Stage::Translate,
                None,
                &format!("Unknown unit system '{}', using '{}'", token, preferred.as_str()),
            );
            preferred
        }),
    }
}

/// Synthesizes one new-style timeline spec from a legacy product entry.
///
/// A legacy timestep override is a bare number reinterpreted as minutes.
/// The one-element-list options stay as lists here; the resolver collapses
/// them the same way it does for authored specs.
fn synthesize_timeline(
    product: LegacyProduct,
    default_timestep: &str,
    default_observations: u32,
) -> RawTimelineSpec {
    let forecast_observations = legacy_scalar(product.forecast_observations.as_deref())
        .unwrap_or(default_observations);
    let timestep = match legacy_scalar(product.timestep.as_deref()) {
        Some(minutes) => format!("{}m", minutes),
        None => default_timestep.to_string(),
    };

    RawTimelineSpec {
        name: None,
        fields: product.conditions,
        forecast_observations: Some(forecast_observations),
        update: product.update,
        exclude_interval: product.exclude_interval,
        scan_interval: product.scan_interval,
        timestep: Some(timestep),
        start_time: Some(0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MonitoredConditions, UpdateMode};

    fn defaults() -> HostDefaults {
        HostDefaults {
            name: "climacell".to_string(),
            latitude: 40.56,
            longitude: -89.99,
            prefers_metric: true,
        }
    }

    fn legacy_daily(product: LegacyProduct) -> RawConfig {
        RawConfig {
            monitored_conditions: Some(MonitoredConditions {
                daily: Some(product),
                ..MonitoredConditions::default()
            }),
            ..RawConfig::default()
        }
    }

    // --- Header defaults ----------------------------------------------------

    #[test]
    fn test_missing_name_and_location_take_host_defaults() {
        let config = translate(RawConfig::default(), &defaults());
        assert_eq!(config.name, "climacell");
        assert_eq!(config.latitude, 40.56);
        assert_eq!(config.longitude, -89.99);
        assert!(config.timelines.is_empty());
    }

    #[test]
    fn test_explicit_name_and_location_are_kept() {
        let raw = RawConfig {
            name: Some("backyard".to_string()),
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..RawConfig::default()
        };
        let config = translate(raw, &defaults());
        assert_eq!(config.name, "backyard");
        assert_eq!(config.latitude, 1.0);
        assert_eq!(config.longitude, 2.0);
    }

    // --- Unit system --------------------------------------------------------

    #[test]
    fn test_explicit_units_win_over_host_preference() {
        let raw = RawConfig {
            units: Some("imperial".to_string()),
            ..RawConfig::default()
        };
        assert_eq!(translate(raw, &defaults()).units, UnitSystem::Imperial);
    }

    #[test]
    fn test_legacy_unit_aliases_map_to_canonical_values() {
        let si = RawConfig {
            units: Some("si".to_string()),
            ..RawConfig::default()
        };
        let us = RawConfig {
            units: Some("us".to_string()),
            ..RawConfig::default()
        };
        assert_eq!(translate(si, &defaults()).units, UnitSystem::Metric);
        assert_eq!(translate(us, &defaults()).units, UnitSystem::Imperial);
    }

    #[test]
    fn test_missing_units_follow_host_preference() {
        let mut host = defaults();
        host.prefers_metric = false;
        assert_eq!(
            translate(RawConfig::default(), &host).units,
            UnitSystem::Imperial
        );
    }

    #[test]
    fn test_unknown_unit_token_falls_back_to_host_preference() {
        let raw = RawConfig {
            units: Some("kelvin".to_string()),
            ..RawConfig::default()
        };
        assert_eq!(translate(raw, &defaults()).units, UnitSystem::Metric);
    }

    // --- Legacy block translation -------------------------------------------

    #[test]
    fn test_daily_only_block_synthesizes_one_timeline_with_product_defaults() {
        let raw = legacy_daily(LegacyProduct {
            conditions: vec!["temp".to_string(), "weather_condition".to_string()],
            ..LegacyProduct::default()
        });
        let config = translate(raw, &defaults());

        assert_eq!(config.timelines.len(), 1);
        let timeline = &config.timelines[0];
        assert_eq!(timeline.timestep.as_deref(), Some("1d"));
        assert_eq!(timeline.forecast_observations, Some(5));
        assert_eq!(timeline.start_time, Some(0));
        assert_eq!(timeline.name, None);
        assert_eq!(timeline.fields, vec!["temp", "weather_condition"]);
    }

    #[test]
    fn test_realtime_product_defaults_to_one_observation_and_1m() {
        let raw = RawConfig {
            monitored_conditions: Some(MonitoredConditions {
                realtime: Some(LegacyProduct {
                    conditions: vec!["temp".to_string()],
                    ..LegacyProduct::default()
                }),
                ..MonitoredConditions::default()
            }),
            ..RawConfig::default()
        };
        let config = translate(raw, &defaults());
        assert_eq!(config.timelines[0].forecast_observations, Some(1));
        assert_eq!(config.timelines[0].timestep.as_deref(), Some("1m"));
    }

    #[test]
    fn test_legacy_observation_override_collapses_first_element() {
        let raw = legacy_daily(LegacyProduct {
            conditions: vec!["temp".to_string()],
            forecast_observations: Some(vec![14, 99]),
            ..LegacyProduct::default()
        });
        let config = translate(raw, &defaults());
        assert_eq!(config.timelines[0].forecast_observations, Some(14));
    }

    #[test]
    fn test_legacy_numeric_timestep_override_is_reinterpreted_as_minutes() {
        let raw = legacy_daily(LegacyProduct {
            conditions: vec!["temp".to_string()],
            timestep: Some(vec![30]),
            ..LegacyProduct::default()
        });
        let config = translate(raw, &defaults());
        assert_eq!(config.timelines[0].timestep.as_deref(), Some("30m"));
    }

    #[test]
    fn test_legacy_update_and_scan_interval_are_carried_over() {
        let raw = legacy_daily(LegacyProduct {
            conditions: vec!["temp".to_string()],
            update: Some(vec![UpdateMode::Manual]),
            scan_interval: Some(600),
            ..LegacyProduct::default()
        });
        let config = translate(raw, &defaults());
        assert_eq!(
            config.timelines[0].update,
            Some(vec![UpdateMode::Manual]),
            "collapsing to a scalar is the resolver's job, done exactly once"
        );
        assert_eq!(config.timelines[0].scan_interval, Some(600));
    }

    #[test]
    fn test_synthesized_timelines_append_after_authored_ones() {
        let raw = RawConfig {
            timelines: vec![RawTimelineSpec {
                name: Some(" hourly".to_string()),
                fields: vec!["humidity".to_string()],
                ..RawTimelineSpec::default()
            }],
            monitored_conditions: Some(MonitoredConditions {
                realtime: Some(LegacyProduct {
                    conditions: vec!["temp".to_string()],
                    ..LegacyProduct::default()
                }),
                daily: Some(LegacyProduct {
                    conditions: vec!["weather_condition".to_string()],
                    ..LegacyProduct::default()
                }),
                ..MonitoredConditions::default()
            }),
            ..RawConfig::default()
        };
        let config = translate(raw, &defaults());

        assert_eq!(config.timelines.len(), 3);
        assert_eq!(config.timelines[0].fields, vec!["humidity"]);
        // realtime before daily: legacy product order
        assert_eq!(config.timelines[1].timestep.as_deref(), Some("1m"));
        assert_eq!(config.timelines[2].timestep.as_deref(), Some("1d"));
    }

    #[test]
    fn test_absent_legacy_block_leaves_timelines_untouched() {
        let raw = RawConfig {
            timelines: vec![RawTimelineSpec::default()],
            ..RawConfig::default()
        };
        let config = translate(raw, &defaults());
        assert_eq!(config.timelines.len(), 1);
    }
}
