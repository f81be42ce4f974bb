//! The map widget abstraction.
//!
//! [`MapWidget`] is the surface the renderer draws on: a view, tile layers,
//! overlay controls and markers. [`MapLibrary`] is the factory that may or
//! may not be available when the application starts.

use disaster_map_event_models::{Coordinates, EventId};
use serde::{Deserialize, Serialize};

/// Errors raised by a map widget or library.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The map library could not be found or loaded.
    #[error("Map library not loaded: {0}")]
    LibraryUnavailable(String),

    /// A marker was requested at an unusable position.
    #[error("Invalid coordinates for event {event_id}: {lat}, {lng}")]
    InvalidCoordinates {
        /// Event the marker belongs to.
        event_id: EventId,
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },

    /// Any other failure reported by the widget.
    #[error("Map widget error: {0}")]
    Widget(String),
}

/// Identifier of a marker within one widget, in insertion order.
pub type MarkerId = usize;

/// Centre and zoom level of the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Viewport centre.
    pub center: Coordinates,
    /// Zoom level.
    pub zoom: u8,
}

/// A raster tile source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Attribution shown in the map corner.
    pub attribution: String,
    /// Highest zoom level the source serves.
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution:
                "© OpenStreetMap contributors | Datos satelitales: Copernicus Programme"
                    .to_string(),
            max_zoom: 18,
        }
    }
}

/// Corner of the map an overlay control is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// A static HTML overlay pinned to a corner of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    /// Where the control is pinned.
    pub position: ControlPosition,
    /// Rendered HTML of the control.
    pub html: String,
}

/// A marker icon made of arbitrary HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivIcon {
    /// CSS class applied to the icon container.
    pub class_name: String,
    /// Icon markup.
    pub html: String,
    /// Icon size in pixels.
    pub size: [u16; 2],
    /// Pixel offset of the anchor point from the icon's top-left corner.
    pub anchor: [u16; 2],
}

/// What happens when a marker, or the action button in its popup, is
/// activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarkerAction {
    /// Open the detail panel for the event with this identifier.
    #[serde(rename_all = "camelCase")]
    ShowDetails {
        /// Event to show.
        event_id: EventId,
    },
}

/// Everything needed to place one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    /// Event the marker represents.
    pub event_id: EventId,
    /// Anchor position.
    pub position: Coordinates,
    /// Marker icon.
    pub icon: DivIcon,
    /// HTML shown in the marker's popup.
    pub popup_html: String,
    /// Action bound to both the marker click and the popup button.
    pub action: MarkerAction,
}

/// A drawable map surface.
pub trait MapWidget {
    /// Moves the viewport.
    fn set_view(&mut self, view: MapView);

    /// Returns the current viewport, if one was set.
    fn view(&self) -> Option<MapView>;

    /// Adds a tile layer.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the widget rejects the layer.
    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<(), MapError>;

    /// Adds an overlay control.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the widget rejects the control.
    fn add_control(&mut self, control: Control) -> Result<(), MapError>;

    /// Places a marker.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the marker cannot be placed.
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<MarkerId, MapError>;

    /// Number of markers currently placed.
    fn marker_count(&self) -> usize;
}

/// Factory for map widgets.
pub trait MapLibrary {
    /// Widget type produced by this library.
    type Widget: MapWidget;

    /// Human-readable library name, for logs.
    fn name(&self) -> &str;

    /// Creates an empty widget.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::LibraryUnavailable`] when the library is missing,
    /// or another [`MapError`] if construction fails.
    fn create_widget(&self) -> Result<Self::Widget, MapError>;
}
