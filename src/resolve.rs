/// Timeline resolution.
///
/// Turns raw timeline specs into fully-resolved specs: every optional gets
/// a concrete default, the timestep grammar is validated, and each
/// requested field token is resolved through a fixed ordered pipeline into
/// a canonical API field key plus display metadata.
///
/// Resolution is a pure function of its inputs (spec, translated config,
/// catalog). A bad token never aborts its timeline and a bad timeline
/// never aborts the config — malformed entries degrade with a log line.

use crate::catalog::{Catalog, RAW_NAME_MARKER};
use crate::logging::{self, Stage};
use crate::model::{
    legacy_scalar, Config, FieldMetadata, RawTimelineSpec, ResolvedTimelineSpec, UnitOfMeasure,
    UnitSystem, UpdateMode, DEFAULT_SCAN_INTERVAL_SECS, DEFAULT_TIMESTEP, TIMESTEP_CURRENT,
};

// ---------------------------------------------------------------------------
// Timestep grammar
// ---------------------------------------------------------------------------

/// A valid timestep is the literal `current` or `<integer><m|h|d>`.
pub fn is_valid_timestep(token: &str) -> bool {
    if token == TIMESTEP_CURRENT {
        return true;
    }
    let Some(unit) = token.chars().last() else {
        return false;
    };
    if !matches!(unit, 'm' | 'h' | 'd') {
        return false;
    }
    let digits = &token[..token.len() - 1];
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validates the timestep token, substituting the safe fallback for
/// invalid grammar. A missing token takes the documented default silently;
/// only a present-but-invalid token is logged.
fn normalize_timestep(token: Option<&str>, timeline: &str) -> String {
    match token {
        None => DEFAULT_TIMESTEP.to_string(),
        Some(token) if is_valid_timestep(token) => token.to_string(),
        Some(token) => {
            logging::error(
                Stage::Resolve,
                Some(timeline),
                &format!("Invalid timestep: {}, using {} instead", token, DEFAULT_TIMESTEP),
            );
            DEFAULT_TIMESTEP.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving one requested field token. Unknown tokens are
/// reported, never raised, so one bad token cannot abort a timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldResolution {
    Resolved { key: String, meta: FieldMetadata },
    /// The token survived alias/suffix/prefix stripping but `base_id` is
    /// not in the catalog.
    Unknown { token: String, base_id: String },
}

/// Resolves one field token through the ordered pipeline:
/// legacy alias → variant suffix (first table entry wins) → raw prefix →
/// catalog lookup → unit resolution under the active unit system.
///
/// The resolved key is `<fieldId><suffixToken>`. A raw marker only takes
/// effect when the field's unit is a value map: the map is discarded and
/// the display name gains the raw marker, yielding the unmapped value.
pub fn resolve_field(token: &str, units: UnitSystem, catalog: &Catalog) -> FieldResolution {
    let mut id = catalog.canonical_id(token);

    let mut suffix = "";
    let mut suffix_label = "";
    if let Some((matched, label)) = catalog.match_suffix(id) {
        id = &id[..id.len() - matched.len()];
        suffix = matched;
        suffix_label = label;
    }

    let mut raw = false;
    if let Some(stripped) = id.strip_prefix(catalog.raw_prefix()) {
        raw = true;
        id = stripped;
    }

    let Some(entry) = catalog.find_field(id) else {
        return FieldResolution::Unknown {
            token: token.to_string(),
            base_id: id.to_string(),
        };
    };

    let mut name = if suffix_label.is_empty() {
        entry.name.to_string()
    } else {
        format!("{} {}", entry.name, suffix_label)
    };

    let mut unit = catalog.unit_for(entry, units);
    if raw && matches!(unit, UnitOfMeasure::Map(_)) {
        unit = UnitOfMeasure::None;
        name = format!("{} {}", RAW_NAME_MARKER, name);
    }

    FieldResolution::Resolved {
        key: format!("{}{}", entry.id, suffix),
        meta: FieldMetadata {
            unit,
            name,
            condition: entry.condition,
            icon: entry.icon,
        },
    }
}

// ---------------------------------------------------------------------------
// Timeline resolution
// ---------------------------------------------------------------------------

/// Resolves every timeline in a translated config, order-preserving and
/// independently per spec.
pub fn resolve(config: &Config, catalog: &Catalog) -> Vec<ResolvedTimelineSpec> {
    config
        .timelines
        .iter()
        .map(|spec| resolve_timeline(spec, config, catalog))
        .collect()
}

/// Resolves a single raw timeline spec against the translated config
/// header and the field catalog.
pub fn resolve_timeline(
    spec: &RawTimelineSpec,
    config: &Config,
    catalog: &Catalog,
) -> ResolvedTimelineSpec {
    let name = match spec.name.as_deref() {
        Some(suffix) if !suffix.is_empty() => format!("{}{}", config.name, suffix),
        _ => config.name.clone(),
    };

    let timestep = normalize_timestep(spec.timestep.as_deref(), &name);

    // The `current` literal reports a single observation regardless of any
    // requested count; everywhere else the count floors at 1.
    let forecast_observations = if timestep == TIMESTEP_CURRENT {
        1
    } else {
        spec.forecast_observations.unwrap_or(1).max(1)
    };

    let update = legacy_scalar(spec.update.as_deref()).unwrap_or(UpdateMode::Auto);

    let mut resolved = ResolvedTimelineSpec {
        name,
        fields: Vec::new(),
        forecast_observations,
        update,
        exclude_intervals: spec.exclude_interval.clone().unwrap_or_default(),
        scan_interval_secs: spec.scan_interval.unwrap_or(DEFAULT_SCAN_INTERVAL_SECS),
        timestep,
        start_time_hours: spec.start_time.unwrap_or(0),
    };

    for token in &spec.fields {
        match resolve_field(token, config.units, catalog) {
            FieldResolution::Resolved { key, meta } => resolved.set_field(key, meta),
            FieldResolution::Unknown { token, base_id } => {
                logging::error(
                    Stage::Resolve,
                    Some(token.as_str()),
                    &format!("Invalid field: {}", base_id),
                );
            }
        }
    }

    resolved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
