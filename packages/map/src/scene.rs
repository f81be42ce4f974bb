//! In-process [`MapWidget`] that records everything placed on it.
//!
//! The recorded [`Scene`] is serialized to JSON and replayed onto Leaflet by
//! the page script, so all marker, popup and legend markup is decided here
//! rather than in the browser.

use disaster_map_event_models::EventId;
use serde::{Deserialize, Serialize};

use crate::widget::{
    Control, MapError, MapLibrary, MapView, MapWidget, MarkerId, MarkerSpec, TileLayer,
};

/// Serializable description of a map: viewport, layers, controls, markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Current viewport.
    pub view: Option<MapView>,
    /// Tile layers, bottom first.
    pub tile_layers: Vec<TileLayer>,
    /// Overlay controls.
    pub controls: Vec<Control>,
    /// Placed markers, in insertion order.
    pub markers: Vec<MarkerSpec>,
}

impl Scene {
    /// Serializes the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Finds the marker placed for an event.
    #[must_use]
    pub fn marker_for(&self, event_id: EventId) -> Option<&MarkerSpec> {
        self.markers.iter().find(|marker| marker.event_id == event_id)
    }
}

/// A widget that builds a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct SceneWidget {
    scene: Scene,
}

impl SceneWidget {
    /// Creates an empty widget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene recorded so far.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Consumes the widget, returning its scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl MapWidget for SceneWidget {
    fn set_view(&mut self, view: MapView) {
        self.scene.view = Some(view);
    }

    fn view(&self) -> Option<MapView> {
        self.scene.view
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<(), MapError> {
        if layer.url_template.is_empty() {
            return Err(MapError::Widget("tile layer has an empty URL".to_string()));
        }
        self.scene.tile_layers.push(layer);
        Ok(())
    }

    fn add_control(&mut self, control: Control) -> Result<(), MapError> {
        self.scene.controls.push(control);
        Ok(())
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<MarkerId, MapError> {
        if !marker.position.is_valid() {
            return Err(MapError::InvalidCoordinates {
                event_id: marker.event_id,
                lat: marker.position.lat,
                lng: marker.position.lng,
            });
        }
        self.scene.markers.push(marker);
        Ok(self.scene.markers.len() - 1)
    }

    fn marker_count(&self) -> usize {
        self.scene.markers.len()
    }
}

/// Library producing [`SceneWidget`]s.
///
/// A library built with [`SceneLibrary::unavailable`] behaves like a map
/// library whose assets failed to load.
#[derive(Debug, Clone)]
pub struct SceneLibrary {
    missing_reason: Option<String>,
}

impl SceneLibrary {
    /// A library that is present and working.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            missing_reason: None,
        }
    }

    /// A library that failed to load for the given reason.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            missing_reason: Some(reason.into()),
        }
    }
}

impl Default for SceneLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MapLibrary for SceneLibrary {
    type Widget = SceneWidget;

    fn name(&self) -> &str {
        "scene"
    }

    fn create_widget(&self) -> Result<Self::Widget, MapError> {
        match &self.missing_reason {
            Some(reason) => Err(MapError::LibraryUnavailable(reason.clone())),
            None => Ok(SceneWidget::new()),
        }
    }
}
