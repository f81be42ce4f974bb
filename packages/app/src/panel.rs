//! The event detail panel.

use disaster_map_event_models::{DisasterEvent, EventId, locale};
use serde::{Deserialize, Serialize};

/// Image shown when an event's own image fails to load.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300/e2e8f0/64748b?text=Imagen+No+Disponible";

/// An image with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    /// The event's own image.
    pub primary: String,
    /// Placeholder used when the primary image fails.
    pub fallback: String,
    /// The source currently displayed.
    pub displayed: String,
}

impl ImageSource {
    /// Shows `primary`, with the placeholder as fallback.
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        Self {
            displayed: primary.clone(),
            primary,
            fallback: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    /// Whether the fallback is being displayed.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.displayed == self.fallback
    }
}

/// Everything the detail panel displays for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    /// Event shown.
    pub event_id: EventId,
    /// Event name.
    pub title: String,
    /// Category label as recorded.
    pub category: String,
    /// Risk level label as recorded.
    pub risk: String,
    /// CSS classes of the risk badge, e.g. `risk-badge risk-alto`.
    pub risk_class: String,
    /// Coordinates with four decimals.
    pub coordinates: String,
    /// Long-form Spanish date, e.g. `15 de enero de 2024`.
    pub date: String,
    /// Free-text description.
    pub description: String,
    /// Event image with its placeholder fallback.
    pub image: ImageSource,
}

impl DetailView {
    /// Formats every field of `event` for display.
    #[must_use]
    pub fn from_event(event: &DisasterEvent) -> Self {
        Self {
            event_id: event.id,
            title: event.name.clone(),
            category: event.category.label().to_string(),
            risk: event.risk.label().to_string(),
            risk_class: format!("risk-badge risk-{}", event.risk.slug()),
            coordinates: event.coordinates.display(),
            date: locale::long_date(event.date),
            description: event.description.clone(),
            image: ImageSource::new(&event.image_url),
        }
    }
}

/// The detail panel: its content and visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPanel {
    view: Option<DetailView>,
    visible: bool,
}

impl DetailPanel {
    /// The content shown last. Kept after the panel is closed.
    #[must_use]
    pub const fn view(&self) -> Option<&DetailView> {
        self.view.as_ref()
    }

    /// Whether the panel is on screen.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replaces the whole content with `view` and shows the panel.
    pub fn show(&mut self, view: DetailView) {
        self.view = Some(view);
        self.visible = true;
    }

    /// Hides the panel. Returns whether it was visible.
    pub fn close(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }

    /// Swaps the displayed image for the placeholder. Returns whether
    /// anything changed.
    pub fn image_failed(&mut self) -> bool {
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        if view.image.is_fallback() {
            return false;
        }
        log::debug!(
            "Image for event {} failed to load, showing placeholder",
            view.event_id
        );
        view.image.displayed = view.image.fallback.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_catalog::Catalog;

    #[test]
    fn view_formats_every_field() {
        let catalog = Catalog::load().unwrap();
        let view = DetailView::from_event(catalog.get(1).unwrap());

        assert_eq!(view.event_id, 1);
        assert_eq!(view.title, "Inundación Severa");
        assert_eq!(view.category, "Inundación");
        assert_eq!(view.risk, "Alto");
        assert_eq!(view.risk_class, "risk-badge risk-alto");
        assert_eq!(view.coordinates, "8.9937, -79.5197");
        assert_eq!(view.date, "15 de enero de 2024");
        assert_eq!(view.image.displayed, view.image.primary);
    }

    #[test]
    fn show_replaces_previous_content() {
        let catalog = Catalog::load().unwrap();
        let mut panel = DetailPanel::default();

        panel.show(DetailView::from_event(catalog.get(1).unwrap()));
        panel.show(DetailView::from_event(catalog.get(4).unwrap()));

        assert!(panel.is_visible());
        assert_eq!(
            panel.view(),
            Some(&DetailView::from_event(catalog.get(4).unwrap()))
        );
    }

    #[test]
    fn close_is_idempotent() {
        let catalog = Catalog::load().unwrap();
        let mut panel = DetailPanel::default();
        panel.show(DetailView::from_event(catalog.get(2).unwrap()));

        assert!(panel.close());
        assert!(!panel.close());
        assert!(!panel.is_visible());
        assert!(panel.view().is_some());
    }

    #[test]
    fn failed_image_falls_back_once() {
        let catalog = Catalog::load().unwrap();
        let mut panel = DetailPanel::default();
        assert!(!panel.image_failed());

        panel.show(DetailView::from_event(catalog.get(3).unwrap()));
        assert!(panel.image_failed());
        assert!(!panel.image_failed());

        let image = &panel.view().unwrap().image;
        assert_eq!(image.displayed, PLACEHOLDER_IMAGE_URL);
        assert!(image.is_fallback());
    }
}
