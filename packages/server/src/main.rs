#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone binary for the disaster map server.
//!
//! Reads `disaster_map.toml` when present, then `BIND_ADDR` and `PORT`.

use disaster_map_app::AppConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let mut config = AppConfig::load(None)?;
    config.server.apply_env();

    disaster_map_server::run_server(config).await?;
    Ok(())
}
