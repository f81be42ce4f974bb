//! Fixed single-page layout of an event report.
//!
//! Positions are in millimetres from the top-left corner of an A4 page,
//! matching how the report is specified; the PDF backend flips the y axis.

use chrono::NaiveDate;
use disaster_map_event_models::{DisasterEvent, locale};

use crate::wrap::wrap_text;

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left margin of every text run.
pub const MARGIN_LEFT_MM: f32 = 20.0;
/// Lowest baseline allowed on the page.
pub const MARGIN_BOTTOM_MM: f32 = 287.0;
/// Width the description is wrapped to.
pub const DESCRIPTION_WIDTH_MM: f32 = 170.0;

const TITLE: &str = "REPORTE DE DESASTRE NATURAL";
const TITLE_SIZE: f32 = 20.0;
const TITLE_Y_MM: f32 = 30.0;
const BODY_SIZE: f32 = 12.0;
const BODY_START_Y_MM: f32 = 50.0;
const LINE_HEIGHT_MM: f32 = 8.0;
/// Spacing between wrapped description lines (font size times 1.15).
const WRAPPED_LINE_HEIGHT_MM: f32 = BODY_SIZE * 1.15 * 25.4 / 72.0;
const FOOTER_SIZE: f32 = 10.0;
const FOOTER_GAP_MM: f32 = 10.0;
const FOOTER_OFFSETS_MM: [f32; 3] = [20.0, 30.0, 40.0];

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Report title blue.
    pub const ACCENT: Self = Self(0, 128, 255);
    /// Body text.
    pub const BLACK: Self = Self(0, 0, 0);
    /// Footer text.
    pub const GREY: Self = Self(100, 100, 100);
}

/// One line of text placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Distance from the left edge, in millimetres.
    pub x_mm: f32,
    /// Baseline distance from the top edge, in millimetres.
    pub y_mm: f32,
    /// Font size in points.
    pub font_size: f32,
    /// Fill color.
    pub color: RgbColor,
}

/// Every text run of a report, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    /// Document title (also used as PDF metadata title).
    pub title: String,
    /// Placed text runs.
    pub runs: Vec<TextRun>,
    /// Whether the description had to be cut to fit on one page.
    pub truncated: bool,
}

impl ReportLayout {
    /// Lays out the report for `event`, stamped with `generated_on`.
    #[must_use]
    pub fn build(event: &DisasterEvent, generated_on: NaiveDate) -> Self {
        let mut runs = Vec::new();
        let mut place = |text: String, y_mm: f32, font_size: f32, color: RgbColor| {
            runs.push(TextRun {
                text,
                x_mm: MARGIN_LEFT_MM,
                y_mm,
                font_size,
                color,
            });
        };

        place(TITLE.to_string(), TITLE_Y_MM, TITLE_SIZE, RgbColor::ACCENT);

        let mut y = BODY_START_Y_MM;
        let fields = [
            format!("Evento: {}", event.name),
            format!("Tipo: {}", event.category.label()),
            format!("Nivel de Riesgo: {}", event.risk.label()),
            format!("Fecha: {}", locale::long_date(event.date)),
            format!("Coordenadas: {}", event.coordinates.display()),
        ];
        for field in fields {
            place(field, y, BODY_SIZE, RgbColor::BLACK);
            y += LINE_HEIGHT_MM;
        }
        y += LINE_HEIGHT_MM;

        place("Descripción:".to_string(), y, BODY_SIZE, RgbColor::BLACK);
        y += LINE_HEIGHT_MM;

        let mut description = wrap_text(&event.description, DESCRIPTION_WIDTH_MM, BODY_SIZE);
        let max_lines = max_description_lines(y);
        let truncated = description.len() > max_lines;
        if truncated {
            description.truncate(max_lines);
            if let Some(last) = description.last_mut() {
                last.push_str(" …");
            }
        }

        for (i, line) in description.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f32 * WRAPPED_LINE_HEIGHT_MM;
            place(line.clone(), y + offset, BODY_SIZE, RgbColor::BLACK);
        }
        #[allow(clippy::cast_precision_loss)]
        let block = description.len() as f32 * LINE_HEIGHT_MM;
        y += block + FOOTER_GAP_MM;

        let footer = [
            "Generado por Sistema de Monitoreo de Desastres Naturales".to_string(),
            format!("Fecha de generación: {}", locale::short_date(generated_on)),
            "Fuente: Imágenes satelitales Copernicus Programme".to_string(),
        ];
        for (line, offset) in footer.into_iter().zip(FOOTER_OFFSETS_MM) {
            place(line, y + offset, FOOTER_SIZE, RgbColor::GREY);
        }

        Self {
            title: TITLE.to_string(),
            runs,
            truncated,
        }
    }

    /// Lowest baseline used by any run.
    #[must_use]
    pub fn bottom_mm(&self) -> f32 {
        self.runs.iter().map(|run| run.y_mm).fold(0.0, f32::max)
    }
}

/// How many description lines fit above the footer when the description
/// starts at `start_y`.
fn max_description_lines(start_y: f32) -> usize {
    let last_footer = FOOTER_OFFSETS_MM[FOOTER_OFFSETS_MM.len() - 1];
    let available = MARGIN_BOTTOM_MM - start_y - FOOTER_GAP_MM - last_footer;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lines = (available / LINE_HEIGHT_MM).floor().max(0.0) as usize;
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_catalog::Catalog;

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn texts(layout: &ReportLayout) -> Vec<&str> {
        layout.runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn header_and_fields_in_order() {
        let catalog = Catalog::load().unwrap();
        let layout = ReportLayout::build(catalog.get(1).unwrap(), generated_on());
        let texts = texts(&layout);

        assert_eq!(texts[0], "REPORTE DE DESASTRE NATURAL");
        assert_eq!(texts[1], "Evento: Inundación Severa");
        assert_eq!(texts[2], "Tipo: Inundación");
        assert_eq!(texts[3], "Nivel de Riesgo: Alto");
        assert_eq!(texts[4], "Fecha: 15 de enero de 2024");
        assert_eq!(texts[5], "Coordenadas: 8.9937, -79.5197");
        assert_eq!(texts[6], "Descripción:");
        assert!(!layout.truncated);
    }

    #[test]
    fn title_and_field_positions() {
        let catalog = Catalog::load().unwrap();
        let layout = ReportLayout::build(catalog.get(1).unwrap(), generated_on());

        let title = &layout.runs[0];
        assert!((title.y_mm - 30.0).abs() < f32::EPSILON);
        assert!((title.font_size - 20.0).abs() < f32::EPSILON);
        assert_eq!(title.color, RgbColor::ACCENT);

        let first_field = &layout.runs[1];
        assert!((first_field.y_mm - 50.0).abs() < f32::EPSILON);
        let description_label = &layout.runs[6];
        assert!((description_label.y_mm - 98.0).abs() < f32::EPSILON);
    }

    #[test]
    fn footer_is_last_and_grey() {
        let catalog = Catalog::load().unwrap();
        let layout = ReportLayout::build(catalog.get(2).unwrap(), generated_on());
        let footer: Vec<&TextRun> = layout.runs.iter().rev().take(3).collect();

        assert!(footer.iter().all(|run| run.color == RgbColor::GREY));
        assert_eq!(
            footer[1].text,
            "Fecha de generación: 18/10/2026"
        );
        assert!(layout.bottom_mm() <= MARGIN_BOTTOM_MM);
    }

    #[test]
    fn overlong_description_is_cut_to_one_page() {
        let catalog = Catalog::load().unwrap();
        let mut event = catalog.get(3).unwrap().clone();
        event.description = "palabra ".repeat(2_000);

        let layout = ReportLayout::build(&event, generated_on());

        assert!(layout.truncated);
        assert!(layout.bottom_mm() <= MARGIN_BOTTOM_MM);
        assert!(layout.runs.iter().any(|run| run.text.ends_with('…')));
    }
}
