#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map renderer for the disaster map.
//!
//! [`MapRenderer`] places one marker per event on a [`MapWidget`], with the
//! fill color chosen by risk level and the glyph chosen by category (see
//! [`style`]). Each marker carries a popup and a [`MarkerAction`] keyed by
//! event identifier, so the marker click and the popup button end up in the
//! same "show details" operation.
//!
//! The widget is abstract. [`SceneWidget`] records a serializable [`Scene`]
//! that the web page replays onto Leaflet.

pub mod html;
pub mod scene;
pub mod style;
pub mod templates;
pub mod widget;

use disaster_map_event_models::{Coordinates, DisasterEvent, EventId};
use serde::{Deserialize, Serialize};

pub use scene::{Scene, SceneLibrary, SceneWidget};
pub use widget::{
    Control, ControlPosition, DivIcon, MapError, MapLibrary, MapView, MapWidget, MarkerAction,
    MarkerId, MarkerSpec, TileLayer,
};

/// Viewport and tile settings for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MapSettings {
    /// Centre of the initial viewport.
    pub initial_center: Coordinates,
    /// Zoom of the initial viewport (wide enough to show the whole country).
    pub initial_zoom: u8,
    /// Zoom used when focusing a selected event.
    pub focus_zoom: u8,
    /// Base tile layer.
    pub tiles: TileLayer,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            initial_center: Coordinates::new(8.5, -80.0),
            initial_zoom: 7,
            focus_zoom: 15,
            tiles: TileLayer::default(),
        }
    }
}

/// Outcome of rendering a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSummary {
    /// Events whose marker was placed, in placement order.
    pub placed: Vec<EventId>,
    /// Events skipped because their marker could not be placed.
    pub skipped: Vec<EventId>,
}

/// Places catalog events onto a map widget.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    settings: MapSettings,
}

impl MapRenderer {
    /// Creates a renderer with the given settings.
    #[must_use]
    pub const fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    /// The renderer's settings.
    #[must_use]
    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Creates a widget from `library` and prepares it: initial view, base
    /// tiles and the risk legend.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the library is unavailable or the widget
    /// rejects the base layer or legend.
    pub fn initialize<L: MapLibrary>(&self, library: &L) -> Result<L::Widget, MapError> {
        let mut widget = library.create_widget()?;

        widget.set_view(MapView {
            center: self.settings.initial_center,
            zoom: self.settings.initial_zoom,
        });
        widget.add_tile_layer(self.settings.tiles.clone())?;
        widget.add_control(templates::legend())?;

        log::info!("Map initialized with library '{}'", library.name());
        Ok(widget)
    }

    /// Builds the marker for one event.
    #[must_use]
    pub fn marker_spec(event: &DisasterEvent) -> MarkerSpec {
        MarkerSpec {
            event_id: event.id,
            position: event.coordinates,
            icon: templates::marker_icon(event),
            popup_html: templates::popup(event),
            action: MarkerAction::ShowDetails { event_id: event.id },
        }
    }

    /// Places one marker per event.
    ///
    /// A marker that fails to place is logged and skipped; it never aborts
    /// the rest of the batch.
    pub fn render_events<'a, W>(
        &self,
        widget: &mut W,
        events: impl IntoIterator<Item = &'a DisasterEvent>,
    ) -> RenderSummary
    where
        W: MapWidget + ?Sized,
    {
        let mut summary = RenderSummary::default();

        for event in events {
            match widget.add_marker(Self::marker_spec(event)) {
                Ok(_) => summary.placed.push(event.id),
                Err(e) => {
                    log::error!("Failed to create marker for event {}: {e}", event.id);
                    summary.skipped.push(event.id);
                }
            }
        }

        log::info!(
            "{} events loaded on the map ({} skipped)",
            summary.placed.len(),
            summary.skipped.len()
        );
        summary
    }

    /// Re-centres the map on an event at the focus zoom level.
    pub fn focus<W: MapWidget + ?Sized>(&self, widget: &mut W, event: &DisasterEvent) {
        widget.set_view(MapView {
            center: event.coordinates,
            zoom: self.settings.focus_zoom,
        });
    }
}
