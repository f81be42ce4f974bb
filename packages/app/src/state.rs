//! UI state owned by the application controller.

use disaster_map_event_models::{DisasterEvent, EventId};

use crate::panel::{DetailPanel, DetailView};
use crate::regions::RegionRegistry;

/// Selection, detail panel, clickable regions and start-up indicators.
///
/// Starts with the loading indicator shown and nothing selected.
#[derive(Debug, Clone)]
pub struct UiState {
    current: Option<EventId>,
    panel: DetailPanel,
    regions: RegionRegistry,
    loading_visible: bool,
    map_fallback: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current: None,
            panel: DetailPanel::default(),
            regions: RegionRegistry::default(),
            loading_visible: true,
            map_fallback: None,
        }
    }
}

impl UiState {
    /// The most recently selected event.
    #[must_use]
    pub const fn current(&self) -> Option<EventId> {
        self.current
    }

    /// The detail panel.
    #[must_use]
    pub const fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    /// Mutable access to the detail panel.
    pub const fn panel_mut(&mut self) -> &mut DetailPanel {
        &mut self.panel
    }

    /// Registered clickable regions.
    #[must_use]
    pub const fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    /// Mutable access to the region registry.
    pub const fn regions_mut(&mut self) -> &mut RegionRegistry {
        &mut self.regions
    }

    /// Whether the loading indicator is still shown.
    #[must_use]
    pub const fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    /// Hides the loading indicator.
    pub const fn hide_loading(&mut self) {
        self.loading_visible = false;
    }

    /// Markup replacing the map area after a failed start-up.
    #[must_use]
    pub fn map_fallback(&self) -> Option<&str> {
        self.map_fallback.as_deref()
    }

    /// Replaces the map area with `html`.
    pub fn set_map_fallback(&mut self, html: String) {
        self.map_fallback = Some(html);
    }

    /// Makes `event` current and shows its details.
    pub fn select(&mut self, event: &DisasterEvent) {
        self.panel.show(DetailView::from_event(event));
        self.current = Some(event.id);
    }

    /// Handles a click on the element path (target first, ancestors after).
    ///
    /// Hides the visible panel unless the path touches the panel, a marker
    /// or a popup. Returns whether the panel was hidden.
    pub fn handle_click<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        if !self.panel.is_visible() || self.regions.path_keeps_panel_open(path) {
            return false;
        }
        self.panel.close()
    }
}
