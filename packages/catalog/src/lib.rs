#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Embedded, validated catalog of disaster events.
//!
//! Event records are written as one TOML file per event under
//! `packages/catalog/events/` (using the Spanish field names of the field
//! reports they come from) and baked into the binary by [`registry`].
//! [`Catalog::load`] parses and validates every record exactly once; the
//! rest of the system only ever sees typed [`DisasterEvent`]s.

pub mod registry;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use disaster_map_event_models::{
    Classified, Coordinates, DisasterEvent, EventId, PANAMA_BOUNDS,
};
use serde::Deserialize;

/// Errors raised while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An event record is not valid TOML or misses required fields.
    #[error("Failed to parse event record '{name}': {source}")]
    Parse {
        /// Registry name of the record.
        name: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Two records share the same identifier.
    #[error("Duplicate event id {0}")]
    DuplicateId(EventId),

    /// A record has a blank name.
    #[error("Event {0} has an empty name")]
    EmptyName(EventId),
}

/// One event as written in a catalog TOML file.
#[derive(Debug, Deserialize)]
struct EventRecord {
    id: EventId,
    evento: String,
    tipo: String,
    lat: f64,
    lng: f64,
    riesgo: String,
    fecha: NaiveDate,
    descripcion: String,
    imagen: String,
}

impl From<EventRecord> for DisasterEvent {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            name: record.evento,
            category: Classified::parse(record.tipo),
            coordinates: Coordinates::new(record.lat, record.lng),
            risk: Classified::parse(record.riesgo),
            date: record.fecha,
            description: record.descripcion,
            image_url: record.imagen,
        }
    }
}

/// Parses a single event record.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the TOML is malformed or a field is
/// missing or mistyped.
pub fn parse_event_toml(name: &str, text: &str) -> Result<DisasterEvent, CatalogError> {
    toml::de::from_str::<EventRecord>(text)
        .map(DisasterEvent::from)
        .map_err(|source| CatalogError::Parse {
            name: name.to_string(),
            source,
        })
}

/// The immutable, in-memory sequence of disaster events.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<DisasterEvent>,
    index: BTreeMap<EventId, usize>,
}

impl Catalog {
    /// Loads and validates every embedded event record.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any record fails to parse or validate.
    pub fn load() -> Result<Self, CatalogError> {
        let events = registry::EVENT_TOMLS
            .iter()
            .map(|(name, text)| parse_event_toml(name, text))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::from_records(events)?;
        log::debug!("Loaded {} events from the embedded catalog", catalog.len());
        Ok(catalog)
    }

    /// Builds a catalog from already-typed records, applying the same
    /// validation as [`Catalog::load`].
    ///
    /// Unrecognized risk or category labels are accepted (they fall back to
    /// neutral styling downstream). Records outside the Panama region are
    /// accepted with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] or [`CatalogError::EmptyName`].
    pub fn from_records(events: Vec<DisasterEvent>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();

        for (position, event) in events.iter().enumerate() {
            if index.insert(event.id, position).is_some() {
                return Err(CatalogError::DuplicateId(event.id));
            }
            if event.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(event.id));
            }
            if !event.risk.is_recognized() {
                log::warn!(
                    "Event {} has unrecognized risk level '{}'",
                    event.id,
                    event.risk.label()
                );
            }
            if !event.category.is_recognized() {
                log::warn!(
                    "Event {} has unrecognized category '{}'",
                    event.id,
                    event.category.label()
                );
            }
            if !PANAMA_BOUNDS.contains(event.coordinates) {
                log::warn!(
                    "Event {} lies outside the Panama region ({})",
                    event.id,
                    event.coordinates.display()
                );
            }
        }

        Ok(Self { events, index })
    }

    /// Looks up an event by identifier.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&DisasterEvent> {
        self.index.get(&id).map(|&position| &self.events[position])
    }

    /// Iterates over events in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisasterEvent> {
        self.events.iter()
    }

    /// Returns all identifiers in catalog order.
    #[must_use]
    pub fn ids(&self) -> Vec<EventId> {
        self.events.iter().map(|event| event.id).collect()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DisasterEvent;
    type IntoIter = std::slice::Iter<'a, DisasterEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
