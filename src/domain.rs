//! Core domain types: entity kinds, their per-entity configuration, and the
//! summary/detail records fetched from the API.
//!
//! Every screen in the application is driven by an [`EntityConfig`]; the
//! list and detail views never special-case an entity type themselves.

pub mod navigation;
pub mod screen;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for scalar fields the API did not return
pub const UNKNOWN_VALUE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Planets,
    Films,
    Starships,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Planets,
        EntityKind::Films,
        EntityKind::Starships,
    ];

    pub fn config(self) -> &'static EntityConfig {
        match self {
            EntityKind::Planets => &PLANETS,
            EntityKind::Films => &FILMS,
            EntityKind::Starships => &STARSHIPS,
        }
    }

    /// Next entity in tab order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous entity in tab order, wrapping around
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A labeled scalar field read from a record by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub key: &'static str,
}

impl FieldSpec {
    pub const fn new(label: &'static str, key: &'static str) -> Self {
        Self { label, key }
    }
}

/// A labeled array of related-resource URLs, with the text shown when empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub placeholder: &'static str,
}

impl ReferenceSpec {
    pub const fn new(label: &'static str, key: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            key,
            placeholder,
        }
    }
}

/// Everything that distinguishes one entity's screens from another's
#[derive(Debug, PartialEq, Eq)]
pub struct EntityConfig {
    pub kind: EntityKind,
    /// Heading shown on the list screen
    pub title: &'static str,
    /// Collection endpoint, relative to the API base URL
    pub collection_path: &'static str,
    pub list_route: &'static str,
    pub detail_route: &'static str,
    pub search_placeholder: &'static str,
    /// Field used for the row heading, the detail title, and search
    pub primary_field: &'static str,
    /// Secondary lines shown under each list row
    pub summary_fields: &'static [FieldSpec],
    /// Labeled scalar rows on the detail screen
    pub detail_fields: &'static [FieldSpec],
    /// Free-text blocks shown after the scalar rows
    pub text_sections: &'static [FieldSpec],
    pub reference_lists: &'static [ReferenceSpec],
}

pub static PLANETS: EntityConfig = EntityConfig {
    kind: EntityKind::Planets,
    title: "Planets",
    collection_path: "planets/",
    list_route: "Planets",
    detail_route: "PlanetDetail",
    search_placeholder: "Search Planets",
    primary_field: "name",
    summary_fields: &[
        FieldSpec::new("Population", "population"),
        FieldSpec::new("Climate", "climate"),
    ],
    detail_fields: &[
        FieldSpec::new("Climate", "climate"),
        FieldSpec::new("Population", "population"),
        FieldSpec::new("Terrain", "terrain"),
        FieldSpec::new("Diameter", "diameter"),
        FieldSpec::new("Rotation Period", "rotation_period"),
        FieldSpec::new("Orbital Period", "orbital_period"),
    ],
    text_sections: &[],
    reference_lists: &[
        ReferenceSpec::new("Residents", "residents", "No known residents."),
        ReferenceSpec::new("Films", "films", "No films available."),
    ],
};

pub static FILMS: EntityConfig = EntityConfig {
    kind: EntityKind::Films,
    title: "Films",
    collection_path: "films/",
    list_route: "Films",
    detail_route: "FilmDetail",
    search_placeholder: "Search Films",
    primary_field: "title",
    summary_fields: &[
        FieldSpec::new("Episode", "episode_id"),
        FieldSpec::new("Release Date", "release_date"),
    ],
    detail_fields: &[
        FieldSpec::new("Episode", "episode_id"),
        FieldSpec::new("Director", "director"),
        FieldSpec::new("Producer", "producer"),
        FieldSpec::new("Release Date", "release_date"),
    ],
    text_sections: &[FieldSpec::new("Opening Crawl", "opening_crawl")],
    reference_lists: &[
        ReferenceSpec::new("Characters", "characters", "No characters listed."),
        ReferenceSpec::new("Planets", "planets", "No planets listed."),
    ],
};

pub static STARSHIPS: EntityConfig = EntityConfig {
    kind: EntityKind::Starships,
    title: "Spaceships",
    collection_path: "starships/",
    list_route: "Spaceships",
    detail_route: "SpaceshipDetail",
    search_placeholder: "Search Spaceships",
    primary_field: "name",
    summary_fields: &[
        FieldSpec::new("Model", "model"),
        FieldSpec::new("Manufacturer", "manufacturer"),
    ],
    detail_fields: &[
        FieldSpec::new("Model", "model"),
        FieldSpec::new("Manufacturer", "manufacturer"),
        FieldSpec::new("Cost (credits)", "cost_in_credits"),
        FieldSpec::new("Length", "length"),
        FieldSpec::new("Crew", "crew"),
        FieldSpec::new("Passengers", "passengers"),
        FieldSpec::new("Hyperdrive Rating", "hyperdrive_rating"),
    ],
    text_sections: &[],
    reference_lists: &[ReferenceSpec::new("Films", "films", "No films listed.")],
};

/// Renders a JSON scalar for display.
///
/// Strings are shown verbatim, other values by their JSON text, and missing
/// or `null` values as [`UNKNOWN_VALUE`].
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One entry of a collection response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSummary(Map<String, Value>);

impl ResourceSummary {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn display(&self, key: &str) -> String {
        display_value(self.get(key))
    }

    /// URL of the full resource, if the record carries one
    pub fn url(&self) -> Option<&str> {
        self.get("url").and_then(Value::as_str)
    }

    /// Value of the entity's primary field, empty when absent
    pub fn primary_name(&self, config: &EntityConfig) -> String {
        match self.get(config.primary_field) {
            None | Some(Value::Null) => String::new(),
            value => display_value(value),
        }
    }

    /// Stable identity used to track a row across re-renders
    pub fn row_key(&self, config: &EntityConfig) -> String {
        self.url()
            .map(str::to_string)
            .unwrap_or_else(|| self.primary_name(config))
    }

    /// Case-insensitive substring match against the primary field
    pub fn matches(&self, config: &EntityConfig, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.primary_name(config)
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// The `properties` object of a single-resource response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceDetail {
    properties: Map<String, Value>,
}

impl ResourceDetail {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn display(&self, key: &str) -> String {
        display_value(self.get(key))
    }

    /// Entries of a reference list; absent or non-array fields yield nothing
    pub fn references(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().map(|v| display_value(Some(v))).collect(),
            _ => Vec::new(),
        }
    }
}

/// Filters summaries by the search query, preserving the received order.
pub fn filter_summaries<'a>(
    items: &'a [ResourceSummary],
    config: &EntityConfig,
    query: &str,
) -> Vec<&'a ResourceSummary> {
    items.iter().filter(|s| s.matches(config, query)).collect()
}
