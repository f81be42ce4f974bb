//! Menu-driven session over the disaster map.
//!
//! Mirrors the map page: pick an event as if clicking its marker, read the
//! detail panel, then export the report or open the satellite viewer.

use dialoguer::{Confirm, Select};
use disaster_map_app::{App, AppConfig, UiEvent};
use disaster_map_map::SceneLibrary;

use crate::format;
use crate::session::{self, SessionOptions};

/// Top-level actions in the interactive menu.
enum Action {
    List,
    Select,
    Download,
    Satellite,
    Close,
    Serve,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::List,
        Self::Select,
        Self::Download,
        Self::Satellite,
        Self::Close,
        Self::Serve,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::List => "List events",
            Self::Select => "Select an event",
            Self::Download => "Download PDF report",
            Self::Satellite => "Open in EO Browser",
            Self::Close => "Close detail panel",
            Self::Serve => "Start web server",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error if the app fails to start or a prompt fails.
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let open_browser = Confirm::new()
        .with_prompt("Open satellite links in the browser?")
        .default(true)
        .interact()?;

    let mut app = session::start(
        config,
        SessionOptions {
            report_dir: None,
            open_browser,
        },
    )?;

    println!("Sistema de Monitoreo de Desastres Naturales");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(1)
            .interact()?;

        match Action::ALL[idx] {
            Action::List => println!("{}\n", format::event_table(app.catalog())),
            Action::Select => select_event(&mut app)?,
            Action::Download => {
                if let Some(path) = app.download_report() {
                    println!("Report written to {}\n", path.display());
                }
            }
            Action::Satellite => {
                app.dispatch(UiEvent::OpenSatelliteView);
            }
            Action::Close => {
                app.dispatch(UiEvent::ClosePanel);
                println!("Panel closed.\n");
            }
            Action::Serve => {
                return actix_web::rt::System::new()
                    .block_on(disaster_map_server::interactive::run(
                        session::server_config(config),
                    ))
                    .map_err(Into::into);
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn select_event(app: &mut App<SceneLibrary>) -> Result<(), Box<dyn std::error::Error>> {
    let ids = app.catalog().ids();
    let names: Vec<String> = app
        .catalog()
        .iter()
        .map(|event| format!("{} · {} ({})", event.id, event.name, event.risk.label()))
        .collect();

    let idx = Select::new()
        .with_prompt("Event")
        .items(&names)
        .default(0)
        .interact()?;

    app.dispatch(UiEvent::MarkerClicked(ids[idx]));
    app.settle();

    if let Some(view) = app.ui().panel().view().filter(|_| app.ui().panel().is_visible()) {
        println!("\n{}\n", format::detail(view));
    }
    Ok(())
}
