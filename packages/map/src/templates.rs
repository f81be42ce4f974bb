//! Markup for marker icons, popups, the risk legend and the fallback panel.

use disaster_map_event_models::{DisasterEvent, EventId, RiskLevel};

use crate::html::Element;
use crate::style::{ACCENT_COLOR, HEADING_COLOR, category_glyph, risk_color};
use crate::widget::{Control, ControlPosition, DivIcon};

/// Marker icon diameter in pixels.
pub const ICON_SIZE: u16 = 30;

/// Value of the `data-action` attribute on popup buttons that open the
/// detail panel.
pub const SHOW_DETAILS_ACTION: &str = "show-details";

/// Element id of an event's marker icon.
#[must_use]
pub fn marker_element_id(event_id: EventId) -> String {
    format!("marker-{event_id}")
}

/// Element id of the root of an event's popup content.
#[must_use]
pub fn popup_element_id(event_id: EventId) -> String {
    format!("popup-{event_id}")
}

/// Round, colored marker icon showing the category glyph.
#[must_use]
pub fn marker_icon(event: &DisasterEvent) -> DivIcon {
    let html = Element::new("div")
        .id(marker_element_id(event.id))
        .style("background-color", risk_color(event.risk_level()))
        .style("width", format!("{ICON_SIZE}px"))
        .style("height", format!("{ICON_SIZE}px"))
        .style("border-radius", "50%")
        .style("border", "4px solid white")
        .style("box-shadow", "0 4px 12px rgba(0,0,0,0.4)")
        .style("cursor", "pointer")
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "center")
        .style("font-weight", "bold")
        .style("color", "white")
        .style("font-size", "12px")
        .text(category_glyph(event.category_kind()))
        .render();

    DivIcon {
        class_name: "custom-marker".to_string(),
        html,
        size: [ICON_SIZE, ICON_SIZE],
        anchor: [ICON_SIZE / 2, ICON_SIZE / 2],
    }
}

/// Popup with name, category, risk and the "view details" button.
///
/// The button carries the event identifier in `data-event-id`, so the page
/// script can route it without holding on to the popup element.
#[must_use]
pub fn popup(event: &DisasterEvent) -> String {
    let color = risk_color(event.risk_level());

    Element::new("div")
        .id(popup_element_id(event.id))
        .style("font-family", "Inter, sans-serif")
        .style("min-width", "200px")
        .child(
            Element::new("h3")
                .style("margin", "0 0 8px 0")
                .style("color", HEADING_COLOR)
                .style("font-size", "14px")
                .text(&event.name),
        )
        .child(
            Element::new("p")
                .style("margin", "0 0 4px 0")
                .style("font-size", "12px")
                .child(Element::new("strong").text("Tipo:"))
                .text(format!(" {}", event.category.label())),
        )
        .child(
            Element::new("p")
                .style("margin", "0 0 8px 0")
                .style("font-size", "12px")
                .child(Element::new("strong").text("Riesgo:"))
                .text(" ")
                .child(
                    Element::new("span")
                        .style("color", color)
                        .style("font-weight", "bold")
                        .text(event.risk.label()),
                ),
        )
        .child(
            Element::new("button")
                .attr("type", "button")
                .attr("data-action", SHOW_DETAILS_ACTION)
                .attr("data-event-id", event.id.to_string())
                .style("background", ACCENT_COLOR)
                .style("color", "white")
                .style("border", "none")
                .style("padding", "6px 12px")
                .style("border-radius", "4px")
                .style("font-size", "11px")
                .style("cursor", "pointer")
                .style("width", "100%")
                .text("Ver Detalles Completos"),
        )
        .render()
}

/// Bottom-left legend listing the three risk colors.
#[must_use]
pub fn legend() -> Control {
    let rows = RiskLevel::all().iter().map(|risk| {
        Element::new("div")
            .child(
                Element::new("span")
                    .style("color", risk_color(Some(*risk)))
                    .text("●"),
            )
            .text(format!(" {}", risk.label()))
    });

    let html = Element::new("div")
        .class("legend")
        .style("background", "white")
        .style("padding", "10px")
        .style("border-radius", "8px")
        .style("box-shadow", "0 2px 10px rgba(0,0,0,0.1)")
        .style("font-size", "12px")
        .style("line-height", "1.4")
        .child(
            Element::new("h4")
                .style("margin", "0 0 8px 0")
                .style("color", HEADING_COLOR)
                .text("Nivel de Riesgo"),
        )
        .children(rows)
        .render();

    Control {
        position: ControlPosition::BottomLeft,
        html,
    }
}

/// Static panel shown in place of the map when the map cannot start.
#[must_use]
pub fn fallback_panel() -> String {
    Element::new("div")
        .class("map-fallback")
        .style("padding", "50px")
        .style("text-align", "center")
        .style("background", "#f8fafc")
        .child(
            Element::new("h3")
                .style("color", "#dc2626")
                .text("Error al cargar el mapa"),
        )
        .child(Element::new("p").text(
            "No se pudieron cargar las librerías necesarias. Por favor, verifique su \
             conexión a internet y recargue la página.",
        ))
        .child(
            Element::new("button")
                .attr("type", "button")
                .attr("data-action", "reload")
                .style("background", ACCENT_COLOR)
                .style("color", "white")
                .style("border", "none")
                .style("padding", "10px 20px")
                .style("border-radius", "5px")
                .style("cursor", "pointer")
                .text("Recargar Página"),
        )
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_catalog::Catalog;

    #[test]
    fn icon_uses_risk_color_and_glyph() {
        let catalog = Catalog::load().unwrap();
        let icon = marker_icon(catalog.get(1).unwrap());
        assert!(icon.html.contains("background-color: #dc2626;"));
        assert!(icon.html.contains("🌊"));
        assert_eq!(icon.size, [30, 30]);
        assert_eq!(icon.anchor, [15, 15]);
    }

    #[test]
    fn popup_routes_by_event_id() {
        let catalog = Catalog::load().unwrap();
        let html = popup(catalog.get(2).unwrap());
        assert!(html.contains("Deslizamiento de Tierra"));
        assert!(html.contains("data-action=\"show-details\""));
        assert!(html.contains("data-event-id=\"2\""));
        assert!(html.contains("color: #d97706;"));
    }

    #[test]
    fn legend_lists_three_levels() {
        let control = legend();
        assert_eq!(control.position, ControlPosition::BottomLeft);
        assert!(control.html.contains("Nivel de Riesgo"));
        for label in ["Alto", "Moderado", "Bajo"] {
            assert!(control.html.contains(label), "legend misses {label}");
        }
    }

    #[test]
    fn fallback_offers_reload() {
        let html = fallback_panel();
        assert!(html.contains("Error al cargar el mapa"));
        assert!(html.contains("Recargar Página"));
    }
}
