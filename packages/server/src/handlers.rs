//! HTTP handler functions for the disaster map API.

use actix_web::http::header::{
    self, Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpResponse, web};
use disaster_map_app::satellite_url;
use disaster_map_event_models::EventId;
use disaster_map_report::{ReportError, ascii_file_name};
use disaster_map_server_models::{ApiError, ApiEvent, ApiEventDetail, ApiHealth};

use crate::AppState;

fn not_found(id: EventId) -> HttpResponse {
    log::debug!("Event not found: {id}");
    HttpResponse::NotFound().json(ApiError::new(format!("Event {id} not found")))
}

/// `Content-Disposition` for a download, with an ASCII `filename` and the
/// exact UTF-8 name in `filename*`.
pub fn attachment(file_name: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename(ascii_file_name(file_name)),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: file_name.as_bytes().to_vec(),
            }),
        ],
    }
}

/// `GET /`
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.page.clone())
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        event_count: state.catalog.len(),
    })
}

/// `GET /api/scene`
///
/// The serialized map scene the page replays onto Leaflet.
pub async fn scene(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(state.scene_json.clone())
}

/// `GET /api/events`
pub async fn events(state: web::Data<AppState>) -> HttpResponse {
    let events: Vec<ApiEvent> = state.catalog.iter().map(ApiEvent::from).collect();
    HttpResponse::Ok().json(events)
}

/// `GET /api/events/{id}`
pub async fn event_detail(state: web::Data<AppState>, path: web::Path<EventId>) -> HttpResponse {
    let id = path.into_inner();
    state.catalog.get(id).map_or_else(
        || not_found(id),
        |event| HttpResponse::Ok().json(ApiEventDetail::new(event)),
    )
}

/// `GET /api/events/{id}/report`
///
/// Renders the one-page PDF report as an attachment.
pub async fn event_report(state: web::Data<AppState>, path: web::Path<EventId>) -> HttpResponse {
    let id = path.into_inner();
    let Some(event) = state.catalog.get(id) else {
        return not_found(id);
    };

    let today = chrono::Local::now().date_naive();
    match state.exporter.render(Some(event), today) {
        Ok(report) => {
            log::info!("PDF generated: {}", report.file_name);
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(attachment(&report.file_name))
                .body(report.bytes)
        }
        Err(ReportError::BackendUnavailable) => HttpResponse::ServiceUnavailable()
            .json(ApiError::new("Error: Librería PDF no disponible.")),
        Err(e) => {
            log::error!("Failed to generate report for event {id}: {e}");
            HttpResponse::InternalServerError()
                .json(ApiError::new("Error al generar el reporte PDF."))
        }
    }
}

/// `GET /api/events/{id}/satellite`
///
/// Redirects to the Copernicus Browser centred on the event.
pub async fn event_satellite(
    state: web::Data<AppState>,
    path: web::Path<EventId>,
) -> HttpResponse {
    let id = path.into_inner();
    state.catalog.get(id).map_or_else(
        || not_found(id),
        |event| {
            HttpResponse::Found()
                .insert_header((header::LOCATION, satellite_url(event.coordinates)))
                .finish()
        },
    )
}
