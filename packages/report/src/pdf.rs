//! `printpdf` rendering of a [`ReportLayout`].

use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};

use crate::layout::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, ReportLayout, RgbColor};
use crate::{DocumentBackend, ReportError};

/// Renders reports as single-page A4 PDFs using the built-in Helvetica font.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPdfBackend;

impl PrintPdfBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn fill(color: RgbColor) -> Color {
    let RgbColor(r, g, b) = color;
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

impl DocumentBackend for PrintPdfBackend {
    fn name(&self) -> &'static str {
        "printpdf"
    }

    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            layout.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Reporte",
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Generation(format!("failed to load font: {e}")))?;

        let layer = doc.get_page(page).get_layer(layer);
        for run in &layout.runs {
            layer.set_fill_color(fill(run.color));
            layer.use_text(
                run.text.as_str(),
                run.font_size,
                Mm(run.x_mm),
                Mm(PAGE_HEIGHT_MM - run.y_mm),
                &font,
            );
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ReportError::Generation(format!("failed to serialize PDF: {e}")))?;

        log::debug!("Rendered {} text runs into {} bytes", layout.runs.len(), bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use disaster_map_catalog::Catalog;

    #[test]
    fn renders_a_pdf_document() {
        let catalog = Catalog::load().unwrap();
        let layout = ReportLayout::build(
            catalog.get(1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        );

        let bytes = PrintPdfBackend::new().render(&layout).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 500);
    }
}
