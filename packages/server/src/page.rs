//! The single-page map UI.
//!
//! The page embeds the serialized scene and a small script that replays it
//! onto Leaflet. Detail data, reports and satellite links come from the API.

use disaster_map_app::AppConfig;
use disaster_map_app::regions::{
    CLOSE_BUTTON_ID, DOWNLOAD_BUTTON_ID, LEGEND_ID, MAP_ID, PANEL_ID, SATELLITE_BUTTON_ID,
};
use disaster_map_map::html::Element;
use disaster_map_map::templates;
use serde::Serialize;

const TITLE: &str = "Sistema de Monitoreo de Desastres Naturales";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLES: &str = r"
* { box-sizing: border-box; }
body { margin: 0; font-family: Inter, sans-serif; color: #1e293b; background: #f1f5f9; }
header { padding: 12px 24px; background: #0f172a; color: white; }
header h1 { margin: 0; font-size: 20px; }
header p { margin: 4px 0 0; font-size: 13px; color: #94a3b8; }
main { position: relative; height: calc(100vh - 72px); }
#map { height: 100%; width: 100%; }
.loading { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(248,250,252,0.9); z-index: 1000; font-size: 16px; }
.hidden { display: none !important; }
#event-details { position: absolute; top: 16px; right: 16px; width: 360px; max-height: calc(100% - 32px); overflow-y: auto; background: white; border-radius: 12px; box-shadow: 0 8px 24px rgba(0,0,0,0.2); padding: 16px; z-index: 1100; }
#event-details img { width: 100%; height: 200px; object-fit: cover; border-radius: 8px; }
#btn-close { float: right; border: none; background: none; font-size: 22px; cursor: pointer; }
.detail-row { margin: 6px 0; font-size: 14px; }
.risk-badge { padding: 2px 8px; border-radius: 9999px; color: white; font-weight: bold; font-size: 12px; background: #6b7280; }
.risk-alto { background: #dc2626; }
.risk-moderado { background: #d97706; }
.risk-bajo { background: #16a34a; }
.actions button { width: 100%; margin-top: 8px; padding: 10px; border: none; border-radius: 6px; color: white; background: #0080FF; cursor: pointer; font-size: 14px; }
.actions button.secondary { background: #0f172a; }
";

const SCRIPT: &str = r"
(function () {
  const scene = JSON.parse(document.getElementById('scene-data').textContent);
  const settings = JSON.parse(document.getElementById('app-settings').textContent);
  const panel = document.getElementById('event-details');
  const loading = document.getElementById('loading');
  let map = null;
  let currentEvent = null;

  function notify(message) {
    console.error(message);
    alert(message);
  }

  function showFallback() {
    document.getElementById('map').innerHTML =
      document.getElementById('map-fallback').innerHTML;
  }

  async function showDetails(id) {
    const response = await fetch('/api/events/' + id);
    if (!response.ok) {
      console.error('Event not found:', id);
      return;
    }
    const detail = await response.json();
    currentEvent = detail;

    document.getElementById('event-title').textContent = detail.title;
    document.getElementById('event-type').textContent = detail.category;
    const risk = document.getElementById('event-risk');
    risk.textContent = detail.risk;
    risk.className = detail.riskClass;
    document.getElementById('event-coordinates').textContent = detail.coordinates;
    document.getElementById('event-date').textContent = detail.date;
    document.getElementById('event-description').textContent = detail.description;
    const image = document.getElementById('event-image');
    image.onerror = function () {
      image.onerror = null;
      image.src = detail.image.fallback;
    };
    image.src = detail.image.primary;
    image.alt = detail.title;
    panel.classList.remove('hidden');

    const marker = scene.markers.find(function (m) { return m.eventId === id; });
    if (map && marker) {
      map.setView([marker.position.lat, marker.position.lng], settings.focusZoom);
    }
  }

  function start() {
    if (typeof L === 'undefined') {
      showFallback();
      notify('Error al cargar la aplicación: Leaflet library not loaded');
      return;
    }

    map = L.map('map').setView([scene.view.center.lat, scene.view.center.lng], scene.view.zoom);
    scene.tileLayers.forEach(function (t) {
      L.tileLayer(t.urlTemplate, { attribution: t.attribution, maxZoom: t.maxZoom }).addTo(map);
    });
    scene.controls.forEach(function (c) {
      const control = L.control({ position: c.position });
      control.onAdd = function () {
        const div = L.DomUtil.create('div');
        div.id = settings.legendId;
        div.innerHTML = c.html;
        return div;
      };
      control.addTo(map);
    });
    scene.markers.forEach(function (m) {
      const icon = L.divIcon({
        className: m.icon.className,
        html: m.icon.html,
        iconSize: m.icon.size,
        iconAnchor: m.icon.anchor,
      });
      const marker = L.marker([m.position.lat, m.position.lng], { icon: icon }).addTo(map);
      marker.bindPopup(m.popupHtml);
      marker.on('click', function () {
        setTimeout(function () { showDetails(m.action.eventId); }, settings.popupDelayMs);
      });
    });

    loading.classList.add('hidden');
  }

  document.getElementById(settings.closeButtonId).addEventListener('click', function () {
    panel.classList.add('hidden');
  });
  document.getElementById(settings.downloadButtonId).addEventListener('click', function () {
    if (!currentEvent) {
      notify('Seleccione un evento primero.');
      return;
    }
    window.location.href = currentEvent.reportUrl;
  });
  document.getElementById(settings.satelliteButtonId).addEventListener('click', function () {
    if (!currentEvent) {
      notify('Seleccione un evento primero.');
      return;
    }
    window.open(currentEvent.satelliteUrl, '_blank');
  });

  document.addEventListener('click', function (e) {
    const action = e.target.closest('[data-action]');
    if (action && action.dataset.action === 'show-details') {
      showDetails(Number(action.dataset.eventId));
      return;
    }
    if (action && action.dataset.action === 'reload') {
      location.reload();
      return;
    }

    const inside = panel.contains(e.target)
      || e.target.closest('.leaflet-marker-icon')
      || e.target.closest('.leaflet-popup');
    if (!inside) {
      panel.classList.add('hidden');
    }
  });

  setTimeout(start, settings.startupDelayMs);
})();
";

/// Values the page script reads at start-up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageSettings<'a> {
    focus_zoom: u8,
    startup_delay_ms: u64,
    popup_delay_ms: u64,
    legend_id: &'a str,
    close_button_id: &'a str,
    download_button_id: &'a str,
    satellite_button_id: &'a str,
}

/// Makes JSON safe to embed in a `<script>` element.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn detail_row(label: &str, id: &'static str) -> Element {
    Element::new("div")
        .class("detail-row")
        .child(Element::new("strong").text(format!("{label}:")))
        .text(" ")
        .child(Element::new("span").id(id))
}

fn detail_panel() -> Element {
    Element::new("aside")
        .id(PANEL_ID)
        .class("hidden")
        .child(
            Element::new("button")
                .id(CLOSE_BUTTON_ID)
                .attr("type", "button")
                .attr("aria-label", "Cerrar")
                .text("×"),
        )
        .child(Element::new("img").id("event-image").attr("alt", ""))
        .child(Element::new("h2").id("event-title"))
        .child(detail_row("Tipo", "event-type"))
        .child(
            Element::new("div")
                .class("detail-row")
                .child(Element::new("strong").text("Riesgo:"))
                .text(" ")
                .child(Element::new("span").id("event-risk").class("risk-badge")),
        )
        .child(detail_row("Coordenadas", "event-coordinates"))
        .child(detail_row("Fecha", "event-date"))
        .child(Element::new("p").id("event-description"))
        .child(
            Element::new("div")
                .class("actions")
                .child(
                    Element::new("button")
                        .id(DOWNLOAD_BUTTON_ID)
                        .attr("type", "button")
                        .text("Descargar Reporte PDF"),
                )
                .child(
                    Element::new("button")
                        .id(SATELLITE_BUTTON_ID)
                        .class("secondary")
                        .attr("type", "button")
                        .text("Ver en EO Browser"),
                ),
        )
}

/// Renders the full HTML document.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the page settings fail to serialize.
pub fn render(scene_json: &str, config: &AppConfig) -> Result<String, serde_json::Error> {
    let settings = serde_json::to_string(&PageSettings {
        focus_zoom: config.map.focus_zoom,
        startup_delay_ms: config.timing.startup_delay_ms,
        popup_delay_ms: config.timing.popup_delay_ms,
        legend_id: LEGEND_ID,
        close_button_id: CLOSE_BUTTON_ID,
        download_button_id: DOWNLOAD_BUTTON_ID,
        satellite_button_id: SATELLITE_BUTTON_ID,
    })?;

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(TITLE))
        .child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", LEAFLET_CSS),
        )
        .child(Element::new("style").raw(STYLES));

    let body = Element::new("body")
        .child(
            Element::new("header")
                .child(Element::new("h1").text(TITLE))
                .child(Element::new("p").text("Panamá · Imágenes satelitales Copernicus Programme")),
        )
        .child(
            Element::new("main")
                .child(
                    Element::new("div").id(MAP_ID).child(
                        Element::new("div")
                            .id("loading")
                            .class("loading")
                            .text("Cargando mapa..."),
                    ),
                )
                .child(detail_panel()),
        )
        .child(
            Element::new("template")
                .id("map-fallback")
                .raw(templates::fallback_panel()),
        )
        .child(
            Element::new("script")
                .id("scene-data")
                .attr("type", "application/json")
                .raw(embed_json(scene_json)),
        )
        .child(
            Element::new("script")
                .id("app-settings")
                .attr("type", "application/json")
                .raw(embed_json(&settings)),
        )
        .child(Element::new("script").attr("src", LEAFLET_JS))
        .child(Element::new("script").raw(SCRIPT));

    let html = Element::new("html")
        .attr("lang", "es")
        .child(head)
        .child(body)
        .render();

    Ok(format!("<!DOCTYPE html>\n{html}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_json_cannot_close_the_script() {
        assert_eq!(
            embed_json(r#"{"html":"<div></div>"}"#),
            r#"{"html":"<div><\/div>"}"#
        );
    }

    #[test]
    fn page_has_map_panel_and_assets() {
        let html = render(r#"{"markers":[]}"#, &AppConfig::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"map\""));
        assert!(html.contains("id=\"event-details\""));
        assert!(html.contains("id=\"btn-download\""));
        assert!(html.contains("id=\"btn-eo-browser\""));
        assert!(html.contains(LEAFLET_JS));
        assert!(html.contains("Error al cargar el mapa"));
        assert!(html.contains("\"popupDelayMs\":100"));
        assert!(html.contains("\"focusZoom\":15"));
    }
}
