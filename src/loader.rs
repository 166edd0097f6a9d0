/// Raw configuration ingestion.
///
/// Hosts hand configuration over either as a TOML file/string or as an
/// already-parsed JSON mapping. Loading is the only fallible step in the
/// pipeline; everything downstream degrades instead of failing.

use crate::model::{ConfigError, RawConfig};

/// Parses a raw configuration from TOML text.
pub fn from_toml_str(text: &str) -> Result<RawConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Loads a raw configuration from a TOML file.
pub fn load_file(path: &str) -> Result<RawConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
    from_toml_str(&text)
}

/// Ingests an arbitrary host-supplied mapping. Unknown keys are ignored;
/// a key with the wrong shape is an error the schema-validating host
/// should have caught.
pub fn from_value(value: serde_json::Value) -> Result<RawConfig, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::Shape(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UpdateMode;
    use serde_json::json;

    #[test]
    fn test_toml_config_parses_timelines_and_legacy_block() {
        let text = r#"
            api_key = "secret"
            name = "home"
            units = "si"

            [[timelines]]
            name = " hourly"
            fields = ["temp", "humidity"]
            timestep = "1h"
            forecast_observations = 24
            update = ["manual"]

            [monitored_conditions.daily]
            conditions = ["weather_condition"]
            forecast_observations = [7]
        "#;
        let raw = from_toml_str(text).expect("valid TOML config");

        assert_eq!(raw.api_key.as_deref(), Some("secret"));
        assert_eq!(raw.units.as_deref(), Some("si"));
        assert_eq!(raw.timelines.len(), 1);
        assert_eq!(raw.timelines[0].fields, vec!["temp", "humidity"]);
        assert_eq!(raw.timelines[0].update, Some(vec![UpdateMode::Manual]));

        let legacy = raw.monitored_conditions.expect("legacy block present");
        let daily = legacy.daily.expect("daily product present");
        assert_eq!(daily.conditions, vec!["weather_condition"]);
        assert_eq!(daily.forecast_observations, Some(vec![7]));
    }

    #[test]
    fn test_unparseable_toml_reports_a_parse_error() {
        let err = from_toml_str("timelines = not-a-list").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_file_reports_an_io_error_with_the_path() {
        let err = load_file("/nonexistent/climacell.toml").unwrap_err();
        match err {
            ConfigError::Io(msg) => assert!(msg.contains("/nonexistent/climacell.toml")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_mapping_ingests_and_ignores_unknown_keys() {
        let raw = from_value(json!({
            "api_key": "secret",
            "latitude": 40.5,
            "platform": "climacell",
            "timelines": [
                {"fields": ["temp"], "timestep": "current"}
            ]
        }))
        .expect("valid host mapping");

        assert_eq!(raw.latitude, Some(40.5));
        assert_eq!(raw.timelines[0].timestep.as_deref(), Some("current"));
    }

    #[test]
    fn test_json_mapping_with_wrong_shape_reports_shape_error() {
        let err = from_value(json!({"timelines": "everything"})).unwrap_err();
        assert!(matches!(err, ConfigError::Shape(_)), "got {:?}", err);
    }
}
