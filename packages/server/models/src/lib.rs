#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the disaster map server.
//!
//! These types are serialized to JSON for the REST API. They are kept apart
//! from the event and panel types so the API contract can evolve on its own.

use chrono::NaiveDate;
use disaster_map_app::{DetailView, ImageSource, satellite_url};
use disaster_map_event_models::{DisasterEvent, EventId};
use disaster_map_map::style::{category_glyph, risk_color};
use serde::{Deserialize, Serialize};

/// A disaster event as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    /// Unique event ID.
    pub id: EventId,
    /// Event name.
    pub name: String,
    /// Category label as recorded.
    pub category: String,
    /// Risk level label as recorded.
    pub risk: String,
    /// Marker fill color for the risk level.
    pub risk_color: String,
    /// Marker glyph for the category.
    pub glyph: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Date of the event.
    pub date: NaiveDate,
}

impl From<&DisasterEvent> for ApiEvent {
    fn from(event: &DisasterEvent) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            category: event.category.label().to_string(),
            risk: event.risk.label().to_string(),
            risk_color: risk_color(event.risk_level()).to_string(),
            glyph: category_glyph(event.category_kind()).to_string(),
            lat: event.coordinates.lat,
            lng: event.coordinates.lng,
            date: event.date,
        }
    }
}

/// Everything the detail panel shows for one event, plus action links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventDetail {
    /// Unique event ID.
    pub id: EventId,
    /// Event name.
    pub title: String,
    /// Category label as recorded.
    pub category: String,
    /// Risk level label as recorded.
    pub risk: String,
    /// CSS classes of the risk badge.
    pub risk_class: String,
    /// Coordinates with four decimals.
    pub coordinates: String,
    /// Long-form Spanish date.
    pub date: String,
    /// Free-text description.
    pub description: String,
    /// Event image and its placeholder fallback.
    pub image: ImageSource,
    /// Where the PDF report can be downloaded.
    pub report_url: String,
    /// Copernicus Browser deep link.
    pub satellite_url: String,
}

impl ApiEventDetail {
    /// Builds the detail response for `event`.
    #[must_use]
    pub fn new(event: &DisasterEvent) -> Self {
        let view = DetailView::from_event(event);
        Self {
            id: view.event_id,
            title: view.title,
            category: view.category,
            risk: view.risk,
            risk_class: view.risk_class,
            coordinates: view.coordinates,
            date: view.date,
            description: view.description,
            image: view.image,
            report_url: format!("/api/events/{}/report", event.id),
            satellite_url: satellite_url(event.coordinates),
        }
    }
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Wraps an error message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of events in the catalog.
    pub event_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_catalog::Catalog;

    #[test]
    fn event_carries_styling() {
        let catalog = Catalog::load().unwrap();
        let event = ApiEvent::from(catalog.get(1).unwrap());

        assert_eq!(event.risk_color, "#dc2626");
        assert_eq!(event.glyph, "🌊");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["riskColor"], "#dc2626");
        assert_eq!(json["date"], "2024-01-15");
    }

    #[test]
    fn detail_links_to_report_and_satellite() {
        let catalog = Catalog::load().unwrap();
        let detail = ApiEventDetail::new(catalog.get(2).unwrap());

        assert_eq!(detail.report_url, "/api/events/2/report");
        assert!(detail.satellite_url.contains("lat=8.9872&lng=-79.5209"));
        assert_eq!(detail.date, "20 de enero de 2024");
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["riskClass"], "risk-badge risk-moderado");
    }
}
