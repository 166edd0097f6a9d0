/// Field catalog for the ClimaCell v4 timeline API.
///
/// Defines the canonical list of API fields this integration can resolve,
/// along with their display metadata and per-unit-system units. This is the
/// single source of truth for field ids — translation and resolution both
/// reference fields from here rather than hardcoding ids.
///
/// The catalog is static and immutable; a `Catalog` handle is constructed
/// once at startup and passed into the resolver, so there is no hidden
/// process-wide mutable state. Read-only concurrent access is safe.

use crate::model::{UnitOfMeasure, UnitSystem, ValueMap};

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Token prefix requesting a field's unmapped value. A raw-marked field
/// whose unit would be a value map gets no unit and no label translation.
pub const RAW_PREFIX: &str = "raw_";

/// Display-name marker prepended when a raw marker suppressed a value map.
pub const RAW_NAME_MARKER: &str = "Raw";

// ---------------------------------------------------------------------------
// Value maps
// ---------------------------------------------------------------------------

/// ClimaCell v4 `precipitationType` codes.
pub static PRECIPITATION_TYPES: ValueMap = ValueMap(&[
    ("0", "N/A"),
    ("1", "Rain"),
    ("2", "Snow"),
    ("3", "Freezing Rain"),
    ("4", "Ice Pellets"),
]);

/// ClimaCell v4 `weatherCode` values.
pub static WEATHER_CODES: ValueMap = ValueMap(&[
    ("0", "Unknown"),
    ("1000", "Clear"),
    ("1001", "Cloudy"),
    ("1100", "Mostly Clear"),
    ("1101", "Partly Cloudy"),
    ("1102", "Mostly Cloudy"),
    ("2000", "Fog"),
    ("2100", "Light Fog"),
    ("3000", "Light Wind"),
    ("3001", "Wind"),
    ("3002", "Strong Wind"),
    ("4000", "Drizzle"),
    ("4001", "Rain"),
    ("4200", "Light Rain"),
    ("4201", "Heavy Rain"),
    ("5000", "Snow"),
    ("5001", "Flurries"),
    ("5100", "Light Snow"),
    ("5101", "Heavy Snow"),
    ("6000", "Freezing Drizzle"),
    ("6001", "Freezing Rain"),
    ("6200", "Light Freezing Rain"),
    ("6201", "Heavy Freezing Rain"),
    ("7000", "Ice Pellets"),
    ("7101", "Heavy Ice Pellets"),
    ("7102", "Light Ice Pellets"),
    ("8000", "Thunderstorm"),
]);

/// ClimaCell v4 `moonPhase` codes.
pub static MOON_PHASES: ValueMap = ValueMap(&[
    ("0", "New"),
    ("1", "Waxing Crescent"),
    ("2", "First Quarter"),
    ("3", "Waxing Gibbous"),
    ("4", "Full"),
    ("5", "Waning Gibbous"),
    ("6", "Third Quarter"),
    ("7", "Waning Crescent"),
]);

/// EPA health concern levels reported with `epaHealthConcern`.
pub static HEALTH_CONCERNS: ValueMap = ValueMap(&[
    ("0", "Good"),
    ("1", "Moderate"),
    ("2", "Unhealthy for Sensitive Groups"),
    ("3", "Unhealthy"),
    ("4", "Very Unhealthy"),
    ("5", "Hazardous"),
]);

// ---------------------------------------------------------------------------
// Field metadata
// ---------------------------------------------------------------------------

/// Catalog entry for a single API field.
pub struct FieldEntry {
    /// Canonical v4 field id, as sent to the API.
    pub id: &'static str,
    /// Base display name; suffix labels are appended during resolution.
    pub name: &'static str,
    /// Host UI indicator key.
    pub condition: &'static str,
    pub icon: &'static str,
    pub metric_unit: UnitOfMeasure,
    pub imperial_unit: UnitOfMeasure,
}

use UnitOfMeasure::{Map, None as NoUnit, Symbol};

/// All fields this integration can resolve.
///
/// Sources: ClimaCell v4 timeline API field vocabulary (core, air quality,
/// and pollen layers). Enumerated fields carry the same value map under
/// both unit systems.
pub static FIELD_CATALOG: &[FieldEntry] = &[
    FieldEntry {
        id: "temperature",
        name: "Temperature",
        condition: "temperature",
        icon: "mdi:thermometer",
        metric_unit: Symbol("°C"),
        imperial_unit: Symbol("°F"),
    },
    FieldEntry {
        id: "temperatureApparent",
        name: "Feels Like",
        condition: "temperature",
        icon: "mdi:thermometer",
        metric_unit: Symbol("°C"),
        imperial_unit: Symbol("°F"),
    },
    FieldEntry {
        id: "dewPoint",
        name: "Dew Point",
        condition: "temperature",
        icon: "mdi:thermometer-water",
        metric_unit: Symbol("°C"),
        imperial_unit: Symbol("°F"),
    },
    FieldEntry {
        id: "humidity",
        name: "Humidity",
        condition: "humidity",
        icon: "mdi:water-percent",
        metric_unit: Symbol("%"),
        imperial_unit: Symbol("%"),
    },
    FieldEntry {
        id: "windSpeed",
        name: "Wind Speed",
        condition: "wind_speed",
        icon: "mdi:weather-windy",
        metric_unit: Symbol("m/s"),
        imperial_unit: Symbol("mph"),
    },
    FieldEntry {
        id: "windGust",
        name: "Wind Gust",
        condition: "wind_speed",
        icon: "mdi:weather-windy",
        metric_unit: Symbol("m/s"),
        imperial_unit: Symbol("mph"),
    },
    FieldEntry {
        id: "windDirection",
        name: "Wind Direction",
        condition: "wind_direction",
        icon: "mdi:compass",
        metric_unit: Symbol("°"),
        imperial_unit: Symbol("°"),
    },
    FieldEntry {
        id: "pressureSeaLevel",
        name: "Sea Level Pressure",
        condition: "pressure",
        icon: "mdi:gauge",
        metric_unit: Symbol("hPa"),
        imperial_unit: Symbol("inHg"),
    },
    FieldEntry {
        id: "pressureSurfaceLevel",
        name: "Surface Pressure",
        condition: "pressure",
        icon: "mdi:gauge",
        metric_unit: Symbol("hPa"),
        imperial_unit: Symbol("inHg"),
    },
    FieldEntry {
        id: "precipitationIntensity",
        name: "Precipitation Intensity",
        condition: "precipitation",
        icon: "mdi:weather-pouring",
        metric_unit: Symbol("mm/hr"),
        imperial_unit: Symbol("in/hr"),
    },
    FieldEntry {
        id: "precipitationProbability",
        name: "Precipitation Probability",
        condition: "precipitation_probability",
        icon: "mdi:umbrella",
        metric_unit: Symbol("%"),
        imperial_unit: Symbol("%"),
    },
    FieldEntry {
        id: "precipitationType",
        name: "Precipitation Type",
        condition: "precipitation_type",
        icon: "mdi:weather-snowy-rainy",
        metric_unit: Map(&PRECIPITATION_TYPES),
        imperial_unit: Map(&PRECIPITATION_TYPES),
    },
    FieldEntry {
        id: "visibility",
        name: "Visibility",
        condition: "visibility",
        icon: "mdi:eye",
        metric_unit: Symbol("km"),
        imperial_unit: Symbol("mi"),
    },
    FieldEntry {
        id: "cloudCover",
        name: "Cloud Cover",
        condition: "cloud_cover",
        icon: "mdi:cloud",
        metric_unit: Symbol("%"),
        imperial_unit: Symbol("%"),
    },
    FieldEntry {
        id: "cloudBase",
        name: "Cloud Base",
        condition: "cloud_base",
        icon: "mdi:cloud",
        metric_unit: Symbol("km"),
        imperial_unit: Symbol("mi"),
    },
    FieldEntry {
        id: "cloudCeiling",
        name: "Cloud Ceiling",
        condition: "cloud_ceiling",
        icon: "mdi:cloud",
        metric_unit: Symbol("km"),
        imperial_unit: Symbol("mi"),
    },
    FieldEntry {
        id: "weatherCode",
        name: "Weather Condition",
        condition: "condition",
        icon: "mdi:weather-partly-cloudy",
        metric_unit: Map(&WEATHER_CODES),
        imperial_unit: Map(&WEATHER_CODES),
    },
    FieldEntry {
        id: "moonPhase",
        name: "Moon Phase",
        condition: "moon_phase",
        icon: "mdi:moon-waning-crescent",
        metric_unit: Map(&MOON_PHASES),
        imperial_unit: Map(&MOON_PHASES),
    },
    FieldEntry {
        id: "uvIndex",
        name: "UV Index",
        condition: "uv_index",
        icon: "mdi:weather-sunny-alert",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "sunriseTime",
        name: "Sunrise",
        condition: "sunrise",
        icon: "mdi:weather-sunset-up",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "sunsetTime",
        name: "Sunset",
        condition: "sunset",
        icon: "mdi:weather-sunset-down",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "epaIndex",
        name: "Air Quality Index",
        condition: "air_quality",
        icon: "mdi:air-filter",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "epaHealthConcern",
        name: "Health Concern",
        condition: "health_concern",
        icon: "mdi:hospital-box",
        metric_unit: Map(&HEALTH_CONCERNS),
        imperial_unit: Map(&HEALTH_CONCERNS),
    },
    FieldEntry {
        id: "particulateMatter25",
        name: "PM2.5",
        condition: "pm25",
        icon: "mdi:blur",
        metric_unit: Symbol("µg/m³"),
        imperial_unit: Symbol("µg/m³"),
    },
    FieldEntry {
        id: "particulateMatter10",
        name: "PM10",
        condition: "pm10",
        icon: "mdi:blur",
        metric_unit: Symbol("µg/m³"),
        imperial_unit: Symbol("µg/m³"),
    },
    FieldEntry {
        id: "pollutantO3",
        name: "Ozone",
        condition: "ozone",
        icon: "mdi:molecule",
        metric_unit: Symbol("ppb"),
        imperial_unit: Symbol("ppb"),
    },
    FieldEntry {
        id: "pollutantNO2",
        name: "Nitrogen Dioxide",
        condition: "nitrogen_dioxide",
        icon: "mdi:molecule",
        metric_unit: Symbol("ppb"),
        imperial_unit: Symbol("ppb"),
    },
    FieldEntry {
        id: "pollutantCO",
        name: "Carbon Monoxide",
        condition: "carbon_monoxide",
        icon: "mdi:molecule",
        metric_unit: Symbol("ppm"),
        imperial_unit: Symbol("ppm"),
    },
    FieldEntry {
        id: "pollutantSO2",
        name: "Sulfur Dioxide",
        condition: "sulphur_dioxide",
        icon: "mdi:molecule",
        metric_unit: Symbol("ppb"),
        imperial_unit: Symbol("ppb"),
    },
    FieldEntry {
        id: "grassIndex",
        name: "Grass Pollen",
        condition: "grass_pollen",
        icon: "mdi:flower",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "treeIndex",
        name: "Tree Pollen",
        condition: "tree_pollen",
        icon: "mdi:tree",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "weedIndex",
        name: "Weed Pollen",
        condition: "weed_pollen",
        icon: "mdi:flower",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
    FieldEntry {
        id: "fireIndex",
        name: "Fire Index",
        condition: "fire_index",
        icon: "mdi:fire",
        metric_unit: NoUnit,
        imperial_unit: NoUnit,
    },
];

// ---------------------------------------------------------------------------
// Legacy aliases
// ---------------------------------------------------------------------------

/// Old flat-config field names mapped to canonical v4 ids. Applied before
/// suffix and raw-prefix detection.
pub static LEGACY_FIELD_ALIASES: &[(&'static str, &'static str)] = &[
    ("temp", "temperature"),
    ("feels_like", "temperatureApparent"),
    ("dewpoint", "dewPoint"),
    ("humidity", "humidity"),
    ("wind_speed", "windSpeed"),
    ("wind_gust", "windGust"),
    ("wind_direction", "windDirection"),
    ("baro_pressure", "pressureSeaLevel"),
    ("precipitation", "precipitationIntensity"),
    ("precipitation_probability", "precipitationProbability"),
    ("precipitation_type", "precipitationType"),
    ("visibility", "visibility"),
    ("cloud_cover", "cloudCover"),
    ("cloud_base", "cloudBase"),
    ("cloud_ceiling", "cloudCeiling"),
    ("weather_condition", "weatherCode"),
    ("moon_phase", "moonPhase"),
    ("sunrise", "sunriseTime"),
    ("sunset", "sunsetTime"),
    ("epa_aqi", "epaIndex"),
    ("epa_health_concern", "epaHealthConcern"),
    ("pm25", "particulateMatter25"),
    ("pm10", "particulateMatter10"),
    ("o3", "pollutantO3"),
    ("no2", "pollutantNO2"),
    ("co", "pollutantCO"),
    ("so2", "pollutantSO2"),
    ("pollen_grass", "grassIndex"),
    ("pollen_tree", "treeIndex"),
    ("pollen_weed", "weedIndex"),
    ("fire_index", "fireIndex"),
];

// ---------------------------------------------------------------------------
// Variant suffixes
// ---------------------------------------------------------------------------

/// Variant-statistic suffixes, checked as trailing matches in this order;
/// the first match wins. The second element is the display label appended
/// to the field's base name.
pub static SUFFIXES: &[(&'static str, &'static str)] = &[
    ("Max", "Max"),
    ("Min", "Min"),
    ("Avg", "Average"),
];

// ---------------------------------------------------------------------------
// Catalog handle
// ---------------------------------------------------------------------------

/// Immutable lookup handle over the catalog tables, constructed once at
/// startup and passed into the resolver.
pub struct Catalog {
    fields: &'static [FieldEntry],
    aliases: &'static [(&'static str, &'static str)],
    suffixes: &'static [(&'static str, &'static str)],
    raw_prefix: &'static str,
}

impl Catalog {
    /// The built-in ClimaCell v4 catalog.
    pub fn builtin() -> Catalog {
        Catalog {
            fields: FIELD_CATALOG,
            aliases: LEGACY_FIELD_ALIASES,
            suffixes: SUFFIXES,
            raw_prefix: RAW_PREFIX,
        }
    }

    /// Maps a legacy field name to its canonical id; tokens without an
    /// alias pass through unchanged.
    pub fn canonical_id<'a>(&self, token: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(old, _)| *old == token)
            .map(|(_, id)| *id)
            .unwrap_or(token)
    }

    /// First suffix table entry matching the end of `id`, as
    /// `(suffix_token, display_label)`.
    pub fn match_suffix(&self, id: &str) -> Option<(&'static str, &'static str)> {
        self.suffixes
            .iter()
            .find(|(suffix, _)| id.ends_with(suffix))
            .copied()
    }

    pub fn raw_prefix(&self) -> &'static str {
        self.raw_prefix
    }

    /// Looks up a field entry by canonical id. Returns `None` if unknown.
    pub fn find_field(&self, id: &str) -> Option<&'static FieldEntry> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// The unit of measurement for a field under the given unit system.
    pub fn unit_for(&self, entry: &FieldEntry, units: UnitSystem) -> UnitOfMeasure {
        match units {
            UnitSystem::Metric => entry.metric_unit,
            UnitSystem::Imperial => entry.imperial_unit,
        }
    }

    /// All canonical field ids, mainly useful for diagnostics.
    pub fn field_ids(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.id).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
