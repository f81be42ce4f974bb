//! Fixed lookup tables for marker appearance.

use disaster_map_event_models::{EventCategory, RiskLevel};

/// Neutral grey used for unrecognized risk levels.
pub const DEFAULT_RISK_COLOR: &str = "#6b7280";

/// Glyph used for unrecognized categories.
pub const DEFAULT_GLYPH: &str = "⚠️";

/// Accent blue shared by action buttons.
pub const ACCENT_COLOR: &str = "#0080FF";

/// Slate used for headings.
pub const HEADING_COLOR: &str = "#1e293b";

/// Marker fill and badge color for a risk level.
#[must_use]
pub const fn risk_color(risk: Option<RiskLevel>) -> &'static str {
    match risk {
        Some(RiskLevel::High) => "#dc2626",
        Some(RiskLevel::Moderate) => "#d97706",
        Some(RiskLevel::Low) => "#16a34a",
        None => DEFAULT_RISK_COLOR,
    }
}

/// Marker glyph for an event category.
#[must_use]
pub const fn category_glyph(category: Option<EventCategory>) -> &'static str {
    match category {
        Some(EventCategory::Flood | EventCategory::Erosion) => "🌊",
        Some(EventCategory::Landslide) => "⛰️",
        Some(EventCategory::HousingCollapse) => "🏠",
        None => DEFAULT_GLYPH,
    }
}
