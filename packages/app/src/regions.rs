//! Named UI regions used to decide whether a click landed "outside" the
//! detail panel.

use std::collections::BTreeMap;

use disaster_map_event_models::EventId;

/// Element id of the detail panel.
pub const PANEL_ID: &str = "event-details";
/// Element id of the map container.
pub const MAP_ID: &str = "map";
/// Element id of the risk legend.
pub const LEGEND_ID: &str = "legend";
/// Element id of the panel's close button.
pub const CLOSE_BUTTON_ID: &str = "btn-close";
/// Element id of the report download button.
pub const DOWNLOAD_BUTTON_ID: &str = "btn-download";
/// Element id of the satellite viewer button.
pub const SATELLITE_BUTTON_ID: &str = "btn-eo-browser";

/// What a registered element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRegion {
    /// The detail panel or one of its buttons.
    DetailPanel,
    /// The marker icon of an event.
    Marker(EventId),
    /// The popup content of an event.
    Popup(EventId),
    /// The map container.
    Map,
    /// An overlay control such as the legend.
    Control,
}

impl UiRegion {
    /// Clicks inside these regions never dismiss the detail panel.
    #[must_use]
    pub const fn keeps_panel_open(self) -> bool {
        matches!(self, Self::DetailPanel | Self::Marker(_) | Self::Popup(_))
    }
}

/// Errors raised while registering UI regions.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The element id is already registered as another region.
    #[error("Element '{id}' is already registered as {existing:?}, not {requested:?}")]
    Conflict {
        /// Element id.
        id: String,
        /// Region the id already maps to.
        existing: UiRegion,
        /// Region that was rejected.
        requested: UiRegion,
    },
}

/// Element id to region lookup.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: BTreeMap<String, UiRegion>,
}

impl RegionRegistry {
    /// Registers `id` as `region`. Registering the same pair twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Conflict`] if `id` is already registered as a
    /// different region.
    pub fn register(&mut self, id: impl Into<String>, region: UiRegion) -> Result<(), RegionError> {
        let id = id.into();
        match self.regions.get(&id) {
            Some(existing) if *existing != region => Err(RegionError::Conflict {
                id,
                existing: *existing,
                requested: region,
            }),
            Some(_) => Ok(()),
            None => {
                self.regions.insert(id, region);
                Ok(())
            }
        }
    }

    /// The region registered for `id`.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<UiRegion> {
        self.regions.get(id).copied()
    }

    /// Number of registered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether a click on the element path (target first, ancestors after)
    /// lands inside the panel, a marker or a popup. Unregistered ids are
    /// ignored.
    #[must_use]
    pub fn path_keeps_panel_open<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.iter()
            .filter_map(|id| self.resolve(id.as_ref()))
            .any(UiRegion::keeps_panel_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RegionRegistry {
        let mut registry = RegionRegistry::default();
        registry.register(PANEL_ID, UiRegion::DetailPanel).unwrap();
        registry.register(MAP_ID, UiRegion::Map).unwrap();
        registry.register(LEGEND_ID, UiRegion::Control).unwrap();
        registry.register("marker-1", UiRegion::Marker(1)).unwrap();
        registry.register("popup-1", UiRegion::Popup(1)).unwrap();
        registry
    }

    #[test]
    fn panel_marker_and_popup_keep_panel_open() {
        let registry = registry();
        assert!(registry.path_keeps_panel_open(&["event-title", PANEL_ID]));
        assert!(registry.path_keeps_panel_open(&["marker-1", MAP_ID]));
        assert!(registry.path_keeps_panel_open(&["popup-1", MAP_ID]));
    }

    #[test]
    fn map_legend_and_unknown_elements_are_outside() {
        let registry = registry();
        assert!(!registry.path_keeps_panel_open(&[MAP_ID]));
        assert!(!registry.path_keeps_panel_open(&[LEGEND_ID, MAP_ID]));
        assert!(!registry.path_keeps_panel_open(&["header"]));
        assert!(!registry.path_keeps_panel_open::<&str>(&[]));
    }

    #[test]
    fn conflicting_registration_is_rejected() {
        let mut registry = registry();
        registry.register("marker-1", UiRegion::Marker(1)).unwrap();
        let err = registry.register("marker-1", UiRegion::Popup(1)).unwrap_err();
        assert!(matches!(err, RegionError::Conflict { .. }));
        assert_eq!(registry.resolve("marker-1"), Some(UiRegion::Marker(1)));
        assert_eq!(registry.len(), 5);
    }
}
