#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Disaster event record, risk level and event category types.
//!
//! This crate defines the single domain entity of the disaster map,
//! [`DisasterEvent`], together with the closed taxonomies used to style it
//! on the map: [`RiskLevel`] and [`EventCategory`]. Catalog labels are kept
//! verbatim inside a [`Classified`] wrapper so that unrecognized values still
//! display, while recognized values get their dedicated styling.

pub mod locale;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Unique identifier of an event within the catalog.
pub type EventId = u32;

/// Coarse severity classification driving marker color and badge styling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Immediate danger to people or infrastructure ("Alto").
    High,
    /// Localized damage, monitoring required ("Moderado").
    Moderate,
    /// Slow-moving or contained phenomenon ("Bajo").
    Low,
}

impl RiskLevel {
    /// Returns the Spanish display label used by the catalog and the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Alto",
            Self::Moderate => "Moderado",
            Self::Low => "Bajo",
        }
    }

    /// Returns all variants of this enum, from most to least severe.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Moderate, Self::Low]
    }
}

impl Classify for RiskLevel {
    fn classify(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "alto" | "high" => Some(Self::High),
            "moderado" | "moderate" => Some(Self::Moderate),
            "bajo" | "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Kind of natural-disaster event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    /// River, urban or flash flooding ("Inundación")
    Flood,
    /// Landslide or mudslide ("Deslizamiento")
    Landslide,
    /// Partial or total collapse of a dwelling ("Colapso de Vivienda")
    HousingCollapse,
    /// Coastal or riverbank erosion ("Erosión")
    Erosion,
}

impl EventCategory {
    /// Returns the Spanish display label used by the catalog and the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flood => "Inundación",
            Self::Landslide => "Deslizamiento",
            Self::HousingCollapse => "Colapso de Vivienda",
            Self::Erosion => "Erosión",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Landslide,
            Self::HousingCollapse,
            Self::Erosion,
        ]
    }
}

impl Classify for EventCategory {
    fn classify(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "inundación" | "inundacion" | "flood" => Some(Self::Flood),
            "deslizamiento" | "landslide" => Some(Self::Landslide),
            "colapso de vivienda" | "structural-collapse" | "housing-collapse" => {
                Some(Self::HousingCollapse)
            }
            "erosión" | "erosion" => Some(Self::Erosion),
            _ => None,
        }
    }
}

/// Maps a free-text catalog label onto a closed taxonomy.
pub trait Classify: Sized + Copy {
    /// Returns the variant named by `label`, or `None` when the label is not
    /// part of the taxonomy. Matching ignores case and surrounding
    /// whitespace.
    fn classify(label: &str) -> Option<Self>;
}

/// A catalog label together with its parsed taxonomy value.
///
/// The original label is always preserved for display. `kind` is `None`
/// when the label did not match any variant of `T`; such values fall back to
/// neutral styling instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classified<T> {
    label: String,
    kind: Option<T>,
}

impl<T: Classify> Classified<T> {
    /// Classifies `label` once and keeps both the label and the result.
    #[must_use]
    pub fn parse(label: impl Into<String>) -> Self {
        let label = label.into();
        let kind = T::classify(&label);
        Self { label, kind }
    }

    /// The label exactly as written in the catalog.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The recognized taxonomy value, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<T> {
        self.kind
    }

    /// Whether the label matched a taxonomy value.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.kind.is_some()
    }

    /// The label lowercased, as used for CSS classes and file names.
    #[must_use]
    pub fn slug(&self) -> String {
        self.label.to_lowercase()
    }
}

impl<T> Serialize for Classified<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl<'de, T: Classify> Deserialize<'de> for Classified<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(label))
    }
}

/// Rough bounding region of the Republic of Panama, in decimal degrees.
pub const PANAMA_BOUNDS: GeoBounds = GeoBounds {
    south: 7.0,
    west: -83.1,
    north: 9.7,
    east: -77.1,
};

/// An axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl GeoBounds {
    /// Whether `point` lies inside (or on the edge of) this rectangle.
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinates {
    /// Creates a new point.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this is a usable lat/lng pair (finite and within range).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Formats the pair with four decimal places, e.g. `"8.9937, -79.5197"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// A single recorded disaster occurrence.
///
/// Events are seeded from the catalog and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterEvent {
    /// Unique identifier within the catalog.
    pub id: EventId,
    /// Human-readable event name.
    pub name: String,
    /// Event category label.
    pub category: Classified<EventCategory>,
    /// Location of the event.
    pub coordinates: Coordinates,
    /// Risk level label.
    pub risk: Classified<RiskLevel>,
    /// Calendar date the event occurred.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// URL of a representative (satellite) image.
    pub image_url: String,
}

impl DisasterEvent {
    /// The recognized risk level, if the label is part of the taxonomy.
    #[must_use]
    pub const fn risk_level(&self) -> Option<RiskLevel> {
        self.risk.kind()
    }

    /// The recognized category, if the label is part of the taxonomy.
    #[must_use]
    pub const fn category_kind(&self) -> Option<EventCategory> {
        self.category.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_labels_classify_case_insensitively() {
        assert_eq!(RiskLevel::classify("Alto"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::classify("MODERADO"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::classify(" bajo "), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::classify("Extremo"), None);
    }

    #[test]
    fn every_label_classifies_back_to_its_variant() {
        for risk in RiskLevel::all() {
            assert_eq!(RiskLevel::classify(risk.label()), Some(*risk));
        }
        for category in EventCategory::all() {
            assert_eq!(EventCategory::classify(category.label()), Some(*category));
        }
    }

    #[test]
    fn accented_category_labels_classify() {
        assert_eq!(
            EventCategory::classify("INUNDACIÓN"),
            Some(EventCategory::Flood)
        );
        assert_eq!(
            EventCategory::classify("Colapso de Vivienda"),
            Some(EventCategory::HousingCollapse)
        );
        assert_eq!(EventCategory::classify("Tsunami"), None);
    }

    #[test]
    fn unrecognized_label_is_preserved() {
        let risk: Classified<RiskLevel> = Classified::parse("Extremo");
        assert!(!risk.is_recognized());
        assert_eq!(risk.label(), "Extremo");
        assert_eq!(risk.slug(), "extremo");
    }

    #[test]
    fn classified_serializes_as_its_label() {
        let category: Classified<EventCategory> = Classified::parse("Inundación");
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"Inundación\"");

        let back: Classified<EventCategory> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), Some(EventCategory::Flood));
    }

    #[test]
    fn coordinates_display_uses_four_decimals() {
        assert_eq!(
            Coordinates::new(8.9937, -79.5197).display(),
            "8.9937, -79.5197"
        );
        assert_eq!(Coordinates::new(8.99, -79.518).display(), "8.9900, -79.5180");
    }

    #[test]
    fn coordinates_validity() {
        assert!(Coordinates::new(8.9937, -79.5197).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn panama_bounds_contain_panama_city() {
        assert!(PANAMA_BOUNDS.contains(Coordinates::new(8.9937, -79.5197)));
        assert!(!PANAMA_BOUNDS.contains(Coordinates::new(40.7, -74.0)));
    }
}
