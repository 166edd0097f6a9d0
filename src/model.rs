/// Core data types for the ClimaCell timeline configuration core.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no resolution logic — only types, their small
/// accessors, and the crate-wide defaults.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Fallback scan interval applied when a timeline spec omits one, in seconds.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 300;

/// Fallback timestep token, also substituted for invalid timestep grammar.
pub const DEFAULT_TIMESTEP: &str = "1d";

/// The timestep literal selecting current conditions instead of a forecast
/// series. Forces the observation count to 1.
pub const TIMESTEP_CURRENT: &str = "current";

// ---------------------------------------------------------------------------
// Unit system
// ---------------------------------------------------------------------------

/// The unit system a configuration resolves fields under.
///
/// Exactly one canonical value is stored after translation; the legacy
/// aliases `si` and `us` are accepted on input and mapped to the canonical
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Canonical configuration token for this unit system.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Parses a configuration token, accepting the legacy aliases.
    pub fn from_token(token: &str) -> Option<UnitSystem> {
        match token {
            "metric" | "si" => Some(UnitSystem::Metric),
            "imperial" | "us" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Update mode
// ---------------------------------------------------------------------------

/// Whether a timeline refreshes on the host's schedule or only on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    Auto,
    Manual,
}

impl Default for UpdateMode {
    fn default() -> Self {
        UpdateMode::Auto
    }
}

// ---------------------------------------------------------------------------
// Raw configuration (as authored)
// ---------------------------------------------------------------------------

/// User-supplied configuration, before translation. Every key is optional;
/// absent keys take documented defaults during translation and resolution.
///
/// Both the legacy `monitored_conditions` block and the new-style
/// `timelines` list may be present at once; translation appends the
/// synthesized legacy timelines after the authored ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub api_key: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Unit system token: `metric`, `imperial`, or a legacy alias.
    pub units: Option<String>,
    pub monitored_conditions: Option<MonitoredConditions>,
    pub timelines: Vec<RawTimelineSpec>,
}

/// The legacy flat configuration block, grouped by API product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitoredConditions {
    pub realtime: Option<LegacyProduct>,
    pub daily: Option<LegacyProduct>,
    pub hourly: Option<LegacyProduct>,
    pub nowcast: Option<LegacyProduct>,
}

/// One product entry inside the legacy block. The legacy schema wrapped
/// several scalar options in one-element lists; `legacy_scalar` collapses
/// them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyProduct {
    pub conditions: Vec<String>,
    pub forecast_observations: Option<Vec<u32>>,
    pub scan_interval: Option<u64>,
    pub exclude_interval: Option<Vec<ExcludeInterval>>,
    pub update: Option<Vec<UpdateMode>>,
    /// Legacy timestep override, a bare number reinterpreted as minutes.
    pub timestep: Option<Vec<u32>>,
}

/// One user-declared request for a forecast/observation series, before
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawTimelineSpec {
    /// Display-name suffix appended to the integration name.
    pub name: Option<String>,
    /// Requested field tokens, possibly carrying legacy names, variant
    /// suffixes, or the raw prefix.
    pub fields: Vec<String>,
    pub forecast_observations: Option<u32>,
    /// Legacy one-element list; the first element wins.
    pub update: Option<Vec<UpdateMode>>,
    pub exclude_interval: Option<Vec<ExcludeInterval>>,
    /// Seconds between refreshes.
    pub scan_interval: Option<u64>,
    pub timestep: Option<String>,
    /// Offset of the query window start from "now", in hours.
    pub start_time: Option<i64>,
}

/// A window during which the data-fetch collaborator must not refresh,
/// as host-local `HH:MM` times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExcludeInterval {
    pub start: String,
    pub end: String,
}

/// Collapses the legacy "one-element list" option shape to its scalar.
/// First element wins when more than one was supplied.
pub fn legacy_scalar<T: Copy>(list: Option<&[T]>) -> Option<T> {
    list.and_then(|items| items.first()).copied()
}

// ---------------------------------------------------------------------------
// Host defaults
// ---------------------------------------------------------------------------

/// Fallbacks supplied by the host platform, consumed by translation.
#[derive(Debug, Clone, PartialEq)]
pub struct HostDefaults {
    /// Integration display name used when the config declares none.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// The host's declared metric/imperial preference, used when the
    /// config declares no unit system.
    pub prefers_metric: bool,
}

// ---------------------------------------------------------------------------
// Translated configuration
// ---------------------------------------------------------------------------

/// Configuration after legacy translation: defaults filled, unit system
/// canonical, and a unified list of new-style raw timeline specs. The
/// legacy block is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub units: UnitSystem,
    pub timelines: Vec<RawTimelineSpec>,
}

// ---------------------------------------------------------------------------
// Resolved types
// ---------------------------------------------------------------------------

/// A discrete mapping from a field's raw numeric/code value to a
/// human-readable label, e.g. precipitation type codes.
#[derive(Debug, PartialEq, Eq)]
pub struct ValueMap(pub &'static [(&'static str, &'static str)]);

impl ValueMap {
    /// Looks up the label for a raw value. Values are matched as strings,
    /// the form the API returns them in.
    pub fn label_for(&self, value: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(raw, _)| *raw == value)
            .map(|(_, label)| *label)
    }
}

/// Unit of measurement for a resolved field under the active unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOfMeasure {
    /// No unit (indexes, timestamps, raw-marked enumerations).
    None,
    /// A physical unit symbol, e.g. `°C` or `mph`.
    Symbol(&'static str),
    /// A value→label enumeration; collaborators translate raw values
    /// through it unless the field was raw-marked.
    Map(&'static ValueMap),
}

/// Display metadata for one resolved field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    pub unit: UnitOfMeasure,
    /// Catalog display name plus any suffix label, `Raw`-prefixed when a
    /// raw marker suppressed a value map.
    pub name: String,
    /// Drives which host UI indicator is shown.
    pub condition: &'static str,
    pub icon: &'static str,
}

/// A timeline spec after resolution: every optional has a concrete value
/// and every requested token became a canonical field key with metadata.
/// Immutable once handed to collaborators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedTimelineSpec {
    /// Host display name concatenated with the per-timeline suffix.
    pub name: String,
    /// Canonical field key (`<fieldId><suffix>`) → metadata, kept in
    /// first-insertion order.
    pub fields: Vec<(String, FieldMetadata)>,
    pub forecast_observations: u32,
    pub update: UpdateMode,
    pub exclude_intervals: Vec<ExcludeInterval>,
    pub scan_interval_secs: u64,
    /// Validated: `current` or `<integer><m|h|d>`.
    pub timestep: String,
    pub start_time_hours: i64,
}

impl ResolvedTimelineSpec {
    /// Stores field metadata under a canonical key. On a key collision the
    /// later write wins but the key keeps its original position, so output
    /// ordering is deterministic.
    pub fn set_field(&mut self, key: String, meta: FieldMetadata) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = meta,
            None => self.fields.push((key, meta)),
        }
    }

    /// Metadata for a canonical field key, if resolved.
    pub fn field(&self, key: &str) -> Option<&FieldMetadata> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, meta)| meta)
    }

    /// The canonical API field keys, in resolution order. This is the list
    /// the data-fetch collaborator requests.
    pub fn field_keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Fully prepared configuration: translated header plus resolved timelines.
/// This is what the data-fetch and entity-registration collaborators consume.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedConfig {
    pub api_key: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub units: UnitSystem,
    pub timelines: Vec<ResolvedTimelineSpec>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading a raw configuration from a file or a
/// host-supplied mapping. The translate/resolve pipeline itself never
/// fails — malformed entries degrade with a log line instead.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration text could not be deserialized.
    Parse(String),
    /// A host-supplied mapping did not match the expected shape.
    Shape(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Shape(msg) => write!(f, "Config shape error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_canonical_tokens_round_trip() {
        assert_eq!(UnitSystem::from_token("metric"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::from_token("imperial"), Some(UnitSystem::Imperial));
        assert_eq!(UnitSystem::Metric.as_str(), "metric");
        assert_eq!(UnitSystem::Imperial.as_str(), "imperial");
    }

    #[test]
    fn test_unit_system_accepts_legacy_aliases() {
        assert_eq!(UnitSystem::from_token("si"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::from_token("us"), Some(UnitSystem::Imperial));
    }

    #[test]
    fn test_unit_system_rejects_unknown_tokens() {
        assert_eq!(UnitSystem::from_token("kelvin"), None);
        assert_eq!(UnitSystem::from_token(""), None);
    }

    #[test]
    fn test_legacy_scalar_takes_first_element() {
        assert_eq!(legacy_scalar(Some(&[7u32, 9][..])), Some(7));
        assert_eq!(legacy_scalar(Some(&[][..])), None::<u32>);
        assert_eq!(legacy_scalar::<u32>(None), None);
    }

    #[test]
    fn test_value_map_label_lookup() {
        static MAP: ValueMap = ValueMap(&[("0", "N/A"), ("1", "Rain")]);
        assert_eq!(MAP.label_for("1"), Some("Rain"));
        assert_eq!(MAP.label_for("9"), None);
    }

    fn meta(name: &str) -> FieldMetadata {
        FieldMetadata {
            unit: UnitOfMeasure::None,
            name: name.to_string(),
            condition: "temperature",
            icon: "mdi:thermometer",
        }
    }

    #[test]
    fn test_set_field_collision_last_write_wins_in_place() {
        let mut spec = ResolvedTimelineSpec::default();
        spec.set_field("temperature".to_string(), meta("Temperature"));
        spec.set_field("humidity".to_string(), meta("Humidity"));
        spec.set_field("temperature".to_string(), meta("Raw Temperature"));

        assert_eq!(spec.fields.len(), 2, "collision must overwrite, not append");
        assert_eq!(
            spec.field_keys(),
            vec!["temperature", "humidity"],
            "a colliding key keeps its original position"
        );
        assert_eq!(
            spec.field("temperature").map(|m| m.name.as_str()),
            Some("Raw Temperature"),
            "the later token is the deterministic winner"
        );
    }

    #[test]
    fn test_update_mode_deserializes_lowercase_and_defaults_to_auto() {
        let mode: UpdateMode = serde_json::from_str("\"manual\"").expect("valid mode");
        assert_eq!(mode, UpdateMode::Manual);
        assert_eq!(UpdateMode::default(), UpdateMode::Auto);
    }

    #[test]
    fn test_config_error_display_includes_detail() {
        let err = ConfigError::Parse("expected a table".to_string());
        assert!(err.to_string().contains("expected a table"));
    }
}
