//! Plain-text rendering of events and the detail panel.

use disaster_map_app::DetailView;
use disaster_map_catalog::Catalog;
use disaster_map_map::style::category_glyph;

/// One line per event, under a header.
#[must_use]
pub fn event_table(catalog: &Catalog) -> String {
    let mut out = format!(
        "{:<4} {:<28} {:<22} {:<10} {:<12}\n",
        "ID", "EVENTO", "TIPO", "RIESGO", "FECHA"
    );
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for event in catalog {
        out.push_str(&format!(
            "{:<4} {:<28} {:<22} {:<10} {:<12}\n",
            event.id,
            event.name,
            format!("{} {}", category_glyph(event.category_kind()), event.category.label()),
            event.risk.label(),
            event.date.format("%Y-%m-%d").to_string(),
        ));
    }

    out.push_str(&format!("\n{} evento(s)", catalog.len()));
    out
}

/// The detail panel as text.
#[must_use]
pub fn detail(view: &DetailView) -> String {
    format!(
        "{title}\n{underline}\nTipo:        {category}\nRiesgo:      {risk}\nCoordenadas: {coordinates}\nFecha:       {date}\nImagen:      {image}\n\n{description}",
        title = view.title,
        underline = "=".repeat(view.title.chars().count()),
        category = view.category,
        risk = view.risk,
        coordinates = view.coordinates,
        date = view.date,
        image = view.image.displayed,
        description = view.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_event() {
        let catalog = Catalog::load().unwrap();
        let table = event_table(&catalog);

        assert!(table.starts_with("ID"));
        assert!(table.contains("Inundación Severa"));
        assert!(table.contains("Erosión Costera"));
        assert!(table.ends_with("5 evento(s)"));
    }

    #[test]
    fn detail_shows_formatted_fields() {
        let catalog = Catalog::load().unwrap();
        let text = detail(&DetailView::from_event(catalog.get(1).unwrap()));

        assert!(text.starts_with("Inundación Severa\n================="));
        assert!(text.contains("Coordenadas: 8.9937, -79.5197"));
        assert!(text.contains("Fecha:       15 de enero de 2024"));
    }
}
