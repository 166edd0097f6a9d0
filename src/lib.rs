//! Configuration normalization and field resolution for a ClimaCell v4
//! timeline integration.
//!
//! The pipeline runs in two synchronous stages before any data is fetched:
//!
//!   1. `translate` — rewrites legacy "monitored conditions" configuration
//!      into new-style timeline specs and fills host defaults.
//!   2. `resolve` — normalizes each timeline spec and resolves its field
//!      tokens against the immutable field catalog.
//!
//! Malformed entries degrade with a log line (fallback timestep, dropped
//! field token); the integration starts with whatever valid timelines and
//! fields remain. The HTTP client and the host entity lifecycle are
//! collaborators, not part of this crate.

pub mod catalog;
pub mod display;
pub mod loader;
pub mod logging;
pub mod model;
pub mod request;
pub mod resolve;
pub mod translate;

pub use catalog::Catalog;
pub use model::{
    Config, FieldMetadata, HostDefaults, PreparedConfig, RawConfig, RawTimelineSpec,
    ResolvedTimelineSpec, UnitOfMeasure, UnitSystem, UpdateMode,
};

use crate::logging::Stage;

/// Runs the full translate → resolve pipeline on a raw configuration.
///
/// This is the single entry point hosts call at startup; the result is
/// immutable for the lifetime of the integration's session.
pub fn prepare_config(
    raw: RawConfig,
    defaults: &HostDefaults,
    catalog: &Catalog,
) -> PreparedConfig {
    logging::debug(
        Stage::Translate,
        None,
        &format!("config before prepare_config: {:?}", raw),
    );

    let config = translate::translate(raw, defaults);
    let timelines = resolve::resolve(&config, catalog);

    let prepared = PreparedConfig {
        api_key: config.api_key,
        name: config.name,
        latitude: config.latitude,
        longitude: config.longitude,
        units: config.units,
        timelines,
    };

    logging::debug(
        Stage::Resolve,
        None,
        &format!("config after prepare_config: {:?}", prepared),
    );

    prepared
}
