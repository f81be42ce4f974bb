#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the disaster map.
//!
//! Serves the map page, the event API, PDF reports and satellite viewer
//! redirects. The catalog, scene and page are built once at start-up and
//! shared read-only between workers.

mod handlers;
pub mod interactive;
pub mod page;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use disaster_map_app::AppConfig;
use disaster_map_catalog::{Catalog, CatalogError};
use disaster_map_map::{MapError, MapRenderer, MapSettings, Scene, SceneLibrary};
use disaster_map_report::ReportExporter;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("Failed to serialize scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The event catalog.
    pub catalog: Catalog,
    /// PDF report generation.
    pub exporter: ReportExporter,
    /// Everything placed on the map.
    pub scene: Scene,
    /// `scene` as JSON.
    pub scene_json: String,
    /// The rendered map page.
    pub page: String,
}

/// Places every catalog event on a fresh [`Scene`].
///
/// # Errors
///
/// Returns a [`MapError`] if the map cannot be initialized.
pub fn build_scene(catalog: &Catalog, settings: &MapSettings) -> Result<Scene, MapError> {
    let renderer = MapRenderer::new(settings.clone());
    let mut widget = renderer.initialize(&SceneLibrary::new())?;
    renderer.render_events(&mut widget, catalog);
    Ok(widget.into_scene())
}

impl AppState {
    /// Builds the scene and page for `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServerError`] if the scene cannot be built or serialized.
    pub fn new(catalog: Catalog, config: &AppConfig) -> Result<Self, ServerError> {
        let scene = build_scene(&catalog, &config.map)?;
        let scene_json = scene.to_json()?;
        let page = page::render(&scene_json, config)?;

        Ok(Self {
            catalog,
            exporter: ReportExporter::default(),
            scene,
            scene_json,
            page,
        })
    }
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/scene", web::get().to(handlers::scene))
            .route("/events", web::get().to(handlers::events))
            .route("/events/{id}", web::get().to(handlers::event_detail))
            .route("/events/{id}/report", web::get().to(handlers::event_report))
            .route(
                "/events/{id}/satellite",
                web::get().to(handlers::event_satellite),
            ),
    );
}

/// Starts the disaster map server.
///
/// Loads the catalog, builds the shared state and runs the Actix-Web HTTP
/// server on the configured address. The caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns a [`ServerError`] if the catalog or scene cannot be built, or if
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: AppConfig) -> Result<(), ServerError> {
    log::info!("Loading event catalog...");
    let catalog = Catalog::load()?;
    log::info!("{} events loaded", catalog.len());

    let state = web::Data::new(AppState::new(catalog, &config)?);
    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use disaster_map_server_models::{ApiEvent, ApiEventDetail, ApiHealth};

    use super::*;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Catalog::load().unwrap(), &AppConfig::default()).unwrap())
    }

    #[actix_web::test]
    async fn health_reports_event_count() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();

        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;

        assert!(body.healthy);
        assert_eq!(body.event_count, 5);
    }

    #[actix_web::test]
    async fn lists_every_event() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/events").to_request();

        let events: Vec<ApiEvent> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(events.len(), 5);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].risk_color, "#dc2626");
    }

    #[actix_web::test]
    async fn detail_for_known_and_unknown_ids() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/events/1").to_request();
        let detail: ApiEventDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail.coordinates, "8.9937, -79.5197");
        assert_eq!(detail.date, "15 de enero de 2024");

        let req = test::TestRequest::get().uri("/api/events/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn report_is_a_named_pdf_attachment() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/events/1/report")
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let value = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert!(value.to_str().is_ok(), "header must be plain ASCII");
        let disposition = header::ContentDisposition::from_raw(value).unwrap();
        assert!(disposition.is_attachment());
        assert_eq!(
            disposition.get_filename(),
            Some("reporte_inundacion_2024-01-15.pdf")
        );
        let encoded = disposition.get_filename_ext().unwrap();
        assert_eq!(
            String::from_utf8(encoded.value.clone()).unwrap(),
            "reporte_inundación_2024-01-15.pdf"
        );
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF-"));
    }

    #[actix_web::test]
    async fn satellite_redirects_to_viewer() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/events/5/satellite")
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("https://browser.dataspace.copernicus.eu/?zoom=14&lat=8.995&lng=-79.516&"));
    }

    #[actix_web::test]
    async fn page_and_scene_are_served() {
        let app =
            test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let page = test::call_and_read_body(&app, req).await;
        assert!(page.starts_with(b"<!DOCTYPE html>"));

        let req = test::TestRequest::get().uri("/api/scene").to_request();
        let scene: Scene = test::call_and_read_body_json(&app, req).await;
        assert_eq!(scene.markers.len(), 5);
        assert!(scene.marker_for(3).is_some());
    }
}
