#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-page PDF report export for disaster events.
//!
//! A report is produced in three steps: [`ReportLayout::build`] places every
//! line of text (title, event fields, the word-wrapped description and the
//! footer), a [`DocumentBackend`] turns the layout into document bytes, and
//! a [`FileSink`] stores the bytes under the name given by [`file_name`].
//!
//! The whole document is generated in memory before anything is written, so
//! a failing backend never leaves a partial file behind.

pub mod layout;
pub mod pdf;
pub mod sink;
pub mod wrap;

use std::path::PathBuf;

use chrono::NaiveDate;
use disaster_map_event_models::DisasterEvent;

pub use layout::{ReportLayout, RgbColor, TextRun};
pub use pdf::PrintPdfBackend;
pub use sink::{DirectorySink, FileSink};

/// Errors raised while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No event is selected.
    #[error("No event selected")]
    NoCurrentEvent,

    /// No document-generation backend is available.
    #[error("Document generation library not available")]
    BackendUnavailable,

    /// The backend failed while producing the document.
    #[error("Report generation failed: {0}")]
    Generation(String),

    /// Writing the finished file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a [`ReportLayout`] into document bytes.
pub trait DocumentBackend: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &'static str;

    /// Renders the layout.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Generation`] if rendering fails.
    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, ReportError>;
}

/// File name of an event's report: `reporte_<category>_<YYYY-MM-DD>.pdf`,
/// with the category label lowercased.
#[must_use]
pub fn file_name(event: &DisasterEvent) -> String {
    format!(
        "reporte_{}_{}.pdf",
        event.category.slug(),
        event.date.format("%Y-%m-%d")
    )
}

/// ASCII-only variant of a file name, for clients that cannot decode an
/// encoded one. Accented letters lose their accent; any other non-ASCII
/// character becomes `_`.
#[must_use]
pub fn ascii_file_name(name: &str) -> String {
    name.chars()
        .map(wrap::base_letter)
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}

/// A finished, in-memory report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Download file name.
    pub file_name: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Produces report documents for the current event.
pub struct ReportExporter {
    backend: Option<Box<dyn DocumentBackend>>,
}

impl std::fmt::Debug for ReportExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportExporter")
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(PrintPdfBackend::new())
    }
}

impl ReportExporter {
    /// Creates an exporter backed by `backend`.
    #[must_use]
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// Creates an exporter with no document-generation capability. Every
    /// export fails with [`ReportError::BackendUnavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Whether a backend is configured.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Renders the report for `event` in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoCurrentEvent`] when `event` is `None`,
    /// [`ReportError::BackendUnavailable`] when no backend is configured, or
    /// the backend's error.
    pub fn render(
        &self,
        event: Option<&DisasterEvent>,
        generated_on: NaiveDate,
    ) -> Result<RenderedReport, ReportError> {
        let event = event.ok_or(ReportError::NoCurrentEvent)?;
        let backend = self
            .backend
            .as_deref()
            .ok_or(ReportError::BackendUnavailable)?;

        let layout = ReportLayout::build(event, generated_on);
        if layout.truncated {
            log::warn!("Description of event {} truncated to fit one page", event.id);
        }
        let bytes = backend.render(&layout)?;

        Ok(RenderedReport {
            file_name: file_name(event),
            bytes,
        })
    }

    /// Renders the report for `event` and writes it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ReportExporter::render`], plus
    /// [`ReportError::Io`] if the sink fails. Nothing is written unless
    /// rendering succeeded.
    pub fn export(
        &self,
        event: Option<&DisasterEvent>,
        generated_on: NaiveDate,
        sink: &dyn FileSink,
    ) -> Result<PathBuf, ReportError> {
        let report = self.render(event, generated_on)?;
        let path = sink.write(&report.file_name, &report.bytes)?;
        log::info!("PDF generated: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_catalog::Catalog;

    struct FailingBackend;

    impl DocumentBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn render(&self, _layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
            Err(ReportError::Generation("font table corrupted".to_string()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map_or(0, Iterator::count)
    }

    #[test]
    fn ascii_file_name_drops_accents() {
        assert_eq!(
            ascii_file_name("reporte_inundación_2024-01-15.pdf"),
            "reporte_inundacion_2024-01-15.pdf"
        );
        assert_eq!(
            ascii_file_name("reporte_erosión ñ_€.pdf"),
            "reporte_erosion n__.pdf"
        );
    }

    #[test]
    fn file_name_uses_lowercased_category_and_date() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(
            file_name(catalog.get(1).unwrap()),
            "reporte_inundación_2024-01-15.pdf"
        );
        assert_eq!(
            file_name(catalog.get(3).unwrap()),
            "reporte_colapso de vivienda_2024-01-25.pdf"
        );
    }

    #[test]
    fn export_without_current_event_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = ReportExporter::default().export(None, today(), &sink);

        assert!(matches!(result, Err(ReportError::NoCurrentEvent)));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn export_without_backend_writes_nothing() {
        let catalog = Catalog::load().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = ReportExporter::unavailable().export(catalog.get(1), today(), &sink);

        assert!(matches!(result, Err(ReportError::BackendUnavailable)));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn failing_backend_leaves_no_partial_file() {
        let catalog = Catalog::load().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = ReportExporter::new(FailingBackend).export(catalog.get(2), today(), &sink);

        assert!(matches!(result, Err(ReportError::Generation(_))));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn export_writes_exactly_one_named_file() {
        let catalog = Catalog::load().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = ReportExporter::default()
            .export(catalog.get(1), today(), &sink)
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "reporte_inundación_2024-01-15.pdf"
        );
        assert_eq!(file_count(dir.path()), 1);
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }
}
