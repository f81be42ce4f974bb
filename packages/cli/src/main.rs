#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the disaster map.
//!
//! ```text
//! disaster_map list
//! disaster_map show <id>
//! disaster_map report <id> [--out <dir>]
//! disaster_map satellite <id> [--open]
//! disaster_map page [--out <file>]
//! disaster_map serve
//! disaster_map interactive
//! ```
//!
//! Running with no subcommand enters interactive mode. Every command reads
//! `disaster_map.toml` from the working directory when present, or the file
//! given with `--config`.

mod format;
mod interactive;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use disaster_map_app::{App, AppConfig, UiEvent};
use disaster_map_catalog::Catalog;
use disaster_map_event_models::EventId;
use disaster_map_map::SceneLibrary;
use session::SessionOptions;

#[derive(Parser)]
#[command(
    name = "disaster_map",
    about = "Natural disaster monitoring map for Panama"
)]
struct Cli {
    /// Configuration file (defaults to ./disaster_map.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every event in the catalog
    List,
    /// Show the detail panel for an event
    Show {
        /// Event ID
        id: EventId,
    },
    /// Export an event's PDF report
    Report {
        /// Event ID
        id: EventId,
        /// Output directory (overrides the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print (or open) the Copernicus Browser link for an event
    Satellite {
        /// Event ID
        id: EventId,
        /// Open the link in the system browser
        #[arg(long)]
        open: bool,
    },
    /// Render the map page as static HTML
    Page {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Start the web server
    Serve,
    /// Interactive menu
    Interactive,
}

fn select_or_exit(app: &mut App<SceneLibrary>, id: EventId) {
    if !app.show_details(id) {
        eprintln!("Event not found: {id}");
        std::process::exit(1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        return interactive::run(&config);
    };

    match command {
        Commands::List => {
            let catalog = Catalog::load()?;
            println!("{}", format::event_table(&catalog));
        }
        Commands::Show { id } => {
            let mut app = session::start(&config, SessionOptions::default())?;
            select_or_exit(&mut app, id);
            if let Some(view) = app.ui().panel().view() {
                println!("{}", format::detail(view));
            }
        }
        Commands::Report { id, out } => {
            let mut app = session::start(
                &config,
                SessionOptions {
                    report_dir: out,
                    open_browser: false,
                },
            )?;
            select_or_exit(&mut app, id);
            match app.download_report() {
                Some(path) => println!("{}", path.display()),
                None => std::process::exit(1),
            }
        }
        Commands::Satellite { id, open } => {
            let mut app = session::start(
                &config,
                SessionOptions {
                    report_dir: None,
                    open_browser: open,
                },
            )?;
            select_or_exit(&mut app, id);
            app.dispatch(UiEvent::OpenSatelliteView);
        }
        Commands::Page { out } => {
            let state = disaster_map_server::AppState::new(Catalog::load()?, &config)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &state.page)?;
                    log::info!("Page written to {}", path.display());
                }
                None => println!("{}", state.page),
            }
        }
        Commands::Serve => {
            let config = session::server_config(&config);
            actix_web::rt::System::new().block_on(disaster_map_server::run_server(config))?;
        }
        Commands::Interactive => interactive::run(&config)?,
    }

    Ok(())
}
