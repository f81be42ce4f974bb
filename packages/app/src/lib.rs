#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Application controller for the disaster map.
//!
//! [`App`] owns the catalog, the map widget, the UI state and a logical
//! timer queue. It is driven by [`App::start`], [`App::advance_to`] and the
//! UI operations (marker clicks, popup buttons, panel buttons, clicks
//! elsewhere on the page). Each operation handles its own failures: lookup
//! misses are logged, export and link failures go to the [`Notifier`], and
//! only a start-up failure moves the app to [`AppPhase::Failed`].

pub mod config;
pub mod links;
pub mod notify;
pub mod panel;
pub mod regions;
pub mod state;
pub mod timers;

use std::path::PathBuf;
use std::time::Duration;

use disaster_map_catalog::Catalog;
use disaster_map_event_models::{DisasterEvent, EventId};
use disaster_map_map::templates::{marker_element_id, popup_element_id};
use disaster_map_map::{MapError, MapLibrary, MapRenderer, MarkerAction, RenderSummary, templates};
use disaster_map_report::{DirectorySink, FileSink, ReportError, ReportExporter};

pub use config::AppConfig;
pub use links::{LinkOpener, SystemBrowser, satellite_url};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use panel::{DetailPanel, DetailView, ImageSource};
pub use regions::{RegionError, RegionRegistry, UiRegion};
pub use state::UiState;
pub use timers::{EventLoop, ScheduledAction};

use config::TimingConfig;
use regions::{
    CLOSE_BUTTON_ID, DOWNLOAD_BUTTON_ID, LEGEND_ID, MAP_ID, PANEL_ID, SATELLITE_BUTTON_ID,
};

/// Message shown when an action needs a selected event.
pub const NO_EVENT_SELECTED_MESSAGE: &str = "Seleccione un evento primero.";

/// Errors raised while starting the application or loading its config.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The map library is missing or the map could not be prepared.
    #[error(transparent)]
    Map(#[from] MapError),

    /// Two UI elements were registered under the same id.
    #[error("Failed to attach UI handlers: {0}")]
    Handlers(#[from] RegionError),

    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has mistyped values.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Start-up state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppPhase {
    /// Bootstrap has not run yet.
    Uninitialized,
    /// The map is up; holds which markers were placed and skipped.
    Ready(RenderSummary),
    /// Bootstrap failed. The fallback panel is showing.
    Failed {
        /// Error message of the failure.
        reason: String,
    },
}

/// A click-driven UI interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A marker was clicked.
    MarkerClicked(EventId),
    /// A button inside a marker popup was pressed.
    Popup(MarkerAction),
    /// The panel's close button.
    ClosePanel,
    /// The panel's report download button.
    DownloadReport,
    /// The panel's satellite viewer button.
    OpenSatelliteView,
    /// The panel image failed to load.
    ImageFailed,
    /// A click anywhere on the page, as an element id path from the target
    /// up to the root.
    Click(Vec<String>),
}

/// The disaster map application.
pub struct App<L: MapLibrary> {
    catalog: Catalog,
    library: L,
    renderer: MapRenderer,
    widget: Option<L::Widget>,
    phase: AppPhase,
    ui: UiState,
    timers: EventLoop,
    timing: TimingConfig,
    exporter: ReportExporter,
    sink: Box<dyn FileSink>,
    opener: Box<dyn LinkOpener>,
    notifier: Box<dyn Notifier>,
}

impl<L: MapLibrary> App<L> {
    /// Creates an app over `catalog` that will draw with `library`.
    ///
    /// Reports are written to the configured output directory, links open
    /// in the system browser and notifications go to the log until
    /// replaced with the `with_*` methods.
    #[must_use]
    pub fn new(catalog: Catalog, library: L, config: &AppConfig) -> Self {
        Self {
            catalog,
            library,
            renderer: MapRenderer::new(config.map.clone()),
            widget: None,
            phase: AppPhase::Uninitialized,
            ui: UiState::default(),
            timers: EventLoop::default(),
            timing: config.timing,
            exporter: ReportExporter::default(),
            sink: Box::new(DirectorySink::new(&config.report.output_dir)),
            opener: Box::new(SystemBrowser),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Replaces the report exporter.
    #[must_use]
    pub fn with_exporter(mut self, exporter: ReportExporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// Replaces where reports are written.
    #[must_use]
    pub fn with_sink(mut self, sink: impl FileSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replaces how satellite links are opened.
    #[must_use]
    pub fn with_opener(mut self, opener: impl LinkOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Replaces where error messages go.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// The event catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Where start-up stands.
    #[must_use]
    pub const fn phase(&self) -> &AppPhase {
        &self.phase
    }

    /// Panel, selection and region state.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The map widget, once bootstrap got far enough to create it.
    #[must_use]
    pub const fn widget(&self) -> Option<&L::Widget> {
        self.widget.as_ref()
    }

    /// Logical time since the app was created.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of scheduled actions not yet run.
    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.timers.pending()
    }

    /// The selected event, if any.
    #[must_use]
    pub fn current_event(&self) -> Option<&DisasterEvent> {
        self.ui.current().and_then(|id| self.catalog.get(id))
    }

    /// Schedules bootstrap after the start-up delay.
    pub fn start(&mut self) {
        if self.phase != AppPhase::Uninitialized {
            log::warn!("Application already started");
            return;
        }
        self.timers
            .schedule(self.timing.startup_delay(), ScheduledAction::Bootstrap);
    }

    /// Moves logical time forward to `now`, running every action that
    /// falls due on the way.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(action) = self.timers.pop_due(now) {
            self.run(action);
        }
        self.timers.settle_at(now);
    }

    /// Moves logical time forward by `delta`.
    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.now() + delta);
    }

    /// Runs every scheduled action, advancing time as far as needed.
    pub fn settle(&mut self) {
        while let Some(due) = self.timers.next_due() {
            self.advance_to(due);
        }
    }

    fn run(&mut self, action: ScheduledAction) {
        match action {
            ScheduledAction::Bootstrap => {
                self.bootstrap();
            }
            ScheduledAction::ShowDetails(id) => {
                self.show_details(id);
            }
        }
    }

    /// Initializes the map, places the markers and attaches the UI
    /// handlers.
    ///
    /// On failure the app ends in [`AppPhase::Failed`]: the loading
    /// indicator stays up, the map area shows the fallback panel and the
    /// user is notified. Bootstrapping an app that is not
    /// [`AppPhase::Uninitialized`] does nothing.
    pub fn bootstrap(&mut self) -> &AppPhase {
        if self.phase != AppPhase::Uninitialized {
            log::debug!("Bootstrap skipped, phase is {:?}", self.phase);
            return &self.phase;
        }

        log::info!("Starting application...");
        match self.try_bootstrap() {
            Ok(summary) => {
                self.ui.hide_loading();
                log::info!("Application initialized");
                self.phase = AppPhase::Ready(summary);
            }
            Err(e) => {
                log::error!("Application failed to initialize: {e}");
                self.ui.set_map_fallback(templates::fallback_panel());
                self.notifier
                    .error(&format!("Error al cargar la aplicación: {e}"));
                self.phase = AppPhase::Failed {
                    reason: e.to_string(),
                };
            }
        }
        &self.phase
    }

    fn try_bootstrap(&mut self) -> Result<RenderSummary, AppError> {
        let mut widget = self.renderer.initialize(&self.library)?;
        let summary = self.renderer.render_events(&mut widget, &self.catalog);
        self.widget = Some(widget);
        self.attach_handlers(&summary)?;
        Ok(summary)
    }

    fn attach_handlers(&mut self, summary: &RenderSummary) -> Result<(), RegionError> {
        let regions = self.ui.regions_mut();
        regions.register(PANEL_ID, UiRegion::DetailPanel)?;
        for button in [CLOSE_BUTTON_ID, DOWNLOAD_BUTTON_ID, SATELLITE_BUTTON_ID] {
            regions.register(button, UiRegion::DetailPanel)?;
        }
        regions.register(MAP_ID, UiRegion::Map)?;
        regions.register(LEGEND_ID, UiRegion::Control)?;
        for id in &summary.placed {
            regions.register(marker_element_id(*id), UiRegion::Marker(*id))?;
            regions.register(popup_element_id(*id), UiRegion::Popup(*id))?;
        }
        log::debug!("UI handlers attached ({} regions)", regions.len());
        Ok(())
    }

    /// Dispatches one UI interaction.
    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::MarkerClicked(id) => self.marker_clicked(id),
            UiEvent::Popup(action) => self.popup_action(action),
            UiEvent::ClosePanel => self.close_panel(),
            UiEvent::DownloadReport => {
                self.download_report();
            }
            UiEvent::OpenSatelliteView => {
                self.open_satellite_view();
            }
            UiEvent::ImageFailed => {
                self.ui.panel_mut().image_failed();
            }
            UiEvent::Click(path) => {
                self.click(&path);
            }
        }
    }

    /// A marker was clicked: its popup opens and the details follow after
    /// the popup delay.
    pub fn marker_clicked(&mut self, id: EventId) {
        self.timers
            .schedule(self.timing.popup_delay(), ScheduledAction::ShowDetails(id));
    }

    /// A popup button was pressed.
    pub fn popup_action(&mut self, action: MarkerAction) {
        match action {
            MarkerAction::ShowDetails { event_id } => {
                self.show_details(event_id);
            }
        }
    }

    /// Shows the details of event `id`, makes it current and re-centres the
    /// map on it. Unknown ids are logged and change nothing.
    pub fn show_details(&mut self, id: EventId) -> bool {
        let Some(event) = self.catalog.get(id) else {
            log::error!("Event not found: {id}");
            return false;
        };

        self.ui.select(event);
        if let Some(widget) = self.widget.as_mut() {
            self.renderer.focus(widget, event);
        }
        log::info!("Details shown for event: {}", event.name);
        true
    }

    /// Hides the detail panel. Closing a hidden panel does nothing.
    pub fn close_panel(&mut self) {
        self.ui.panel_mut().close();
    }

    /// A click on the page; hides the panel when it landed outside the
    /// panel, markers and popups.
    pub fn click<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        self.ui.handle_click(path)
    }

    /// Exports the report of the current event. Failures are reported
    /// through the notifier and leave no file behind.
    pub fn download_report(&self) -> Option<PathBuf> {
        let today = chrono::Local::now().date_naive();
        let event = self.ui.current().and_then(|id| self.catalog.get(id));

        match self.exporter.export(event, today, self.sink.as_ref()) {
            Ok(path) => Some(path),
            Err(e) => {
                log::error!("Error generating PDF: {e}");
                let message = match e {
                    ReportError::NoCurrentEvent => NO_EVENT_SELECTED_MESSAGE,
                    ReportError::BackendUnavailable => "Error: Librería PDF no disponible.",
                    ReportError::Generation(_) | ReportError::Io(_) => {
                        "Error al generar el reporte PDF."
                    }
                };
                self.notifier.error(message);
                None
            }
        }
    }

    /// Opens the satellite viewer at the current event. Returns the URL
    /// handed to the opener.
    pub fn open_satellite_view(&self) -> Option<String> {
        let Some(event) = self.current_event() else {
            self.notifier.error(NO_EVENT_SELECTED_MESSAGE);
            return None;
        };
        let url = satellite_url(event.coordinates);

        match self.opener.open(&url) {
            Ok(()) => {
                log::info!("Satellite view opened for event: {}", event.name);
                Some(url)
            }
            Err(e) => {
                log::error!("Error opening satellite view: {e}");
                self.notifier.error("Error al abrir EO Browser.");
                None
            }
        }
    }
}
