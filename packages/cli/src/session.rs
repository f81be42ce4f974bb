//! Builds a started application for the terminal front end.

use std::path::PathBuf;

use disaster_map_app::links::PrintOpener;
use disaster_map_app::{App, AppConfig, AppPhase, Notifier, SystemBrowser};
use disaster_map_catalog::Catalog;
use disaster_map_map::SceneLibrary;
use disaster_map_report::DirectorySink;

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}

/// How a session should be wired.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Overrides the configured report directory.
    pub report_dir: Option<PathBuf>,
    /// Open links in the system browser instead of printing them.
    pub open_browser: bool,
}

/// `config` with the listener overridden from `BIND_ADDR` and `PORT`.
#[must_use]
pub fn server_config(config: &AppConfig) -> AppConfig {
    server_config_with(config, |key| std::env::var(key).ok())
}

fn server_config_with(config: &AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let mut config = config.clone();
    config.server.apply_vars(lookup);
    config
}

/// Loads the catalog, builds the app and runs it through bootstrap.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the app fails to
/// start.
pub fn start(
    config: &AppConfig,
    options: SessionOptions,
) -> Result<App<SceneLibrary>, Box<dyn std::error::Error>> {
    let catalog = Catalog::load()?;
    let report_dir = options
        .report_dir
        .unwrap_or_else(|| config.report.output_dir.clone());

    let app = App::new(catalog, SceneLibrary::new(), config)
        .with_sink(DirectorySink::new(report_dir))
        .with_notifier(ConsoleNotifier);
    let mut app = if options.open_browser {
        app.with_opener(SystemBrowser)
    } else {
        app.with_opener(PrintOpener)
    };

    app.start();
    app.settle();

    if let AppPhase::Failed { reason } = app.phase() {
        return Err(reason.clone().into());
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_is_ready_after_start() {
        let app = start(&AppConfig::default(), SessionOptions::default()).unwrap();
        assert!(matches!(app.phase(), AppPhase::Ready(_)));
        assert!(!app.ui().loading_visible());
    }

    #[test]
    fn server_config_applies_listener_overrides() {
        let config = AppConfig::default();

        let served = server_config_with(&config, |key| {
            (key == "PORT").then(|| "9191".to_string())
        });

        assert_eq!(served.server.port, 9191);
        assert_eq!(served.server.bind_addr, config.server.bind_addr);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn report_goes_to_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = start(
            &AppConfig::default(),
            SessionOptions {
                report_dir: Some(dir.path().to_path_buf()),
                open_browser: false,
            },
        )
        .unwrap();

        assert!(app.show_details(3));
        let path = app.download_report().unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());
        assert!(path.exists());
    }
}
