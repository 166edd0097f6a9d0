/// Per-observation naming for the entity-registration collaborator.
///
/// One record is registered per resolved field per forecast observation
/// index. Multi-observation timelines distinguish their records with a
/// timestep-offset label (`05m`, `3h`, `2d`); `current` and
/// single-observation timelines carry no label.

use crate::model::{ResolvedTimelineSpec, TIMESTEP_CURRENT};

/// Offset label for one observation index: timestep value × index with the
/// timestep's unit, zero-filled to two digits for minutes.
///
/// Returns `None` for `current` timesteps and for single-observation
/// timelines (`observation` of `None`).
pub fn observation_label(timestep: &str, observation: Option<u32>) -> Option<String> {
    if timestep == TIMESTEP_CURRENT {
        return None;
    }
    let observation = observation?;
    let unit = timestep.chars().last()?;
    // u64 arithmetic: grammar-valid timestep values can exceed u32 when
    // multiplied by the observation index.
    let value: u64 = timestep[..timestep.len() - 1].parse().ok()?;
    let offset = value.checked_mul(u64::from(observation))?;
    let width = if unit == 'm' { 2 } else { 1 };
    Some(format!("{:0width$}{}", offset, unit, width = width))
}

/// Friendly name for one record: the integration prefix, the resolved
/// timeline name, the field display name, and the offset label if any.
pub fn record_name(
    spec: &ResolvedTimelineSpec,
    field_name: &str,
    observation: Option<u32>,
) -> String {
    let mut name = format!("cc {} {}", spec.name, field_name);
    if let Some(label) = observation_label(&spec.timestep, observation) {
        name.push(' ');
        name.push_str(&label);
    }
    name
}

/// All record names for a resolved timeline, one per field per observation
/// index, in resolution order.
pub fn record_names(spec: &ResolvedTimelineSpec) -> Vec<String> {
    let mut names = Vec::new();
    for (_, meta) in &spec.fields {
        for index in 0..spec.forecast_observations {
            let observation = if spec.forecast_observations == 1 {
                None
            } else {
                Some(index)
            };
            names.push(record_name(spec, &meta.name, observation));
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
