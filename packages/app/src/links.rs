//! Deep links into the Copernicus satellite imagery browser.

use disaster_map_event_models::Coordinates;

const BROWSER_BASE_URL: &str = "https://browser.dataspace.copernicus.eu/";
const BROWSER_ZOOM: u8 = 14;
const BROWSER_FIXED_PARAMS: &str = "themeId=DEFAULT-THEME\
    &visualizationUrl=https%3A%2F%2Fservices.sentinel-hub.com%2Fogc%2Fwms%2Fbd86bcc0-f318-402b-a145-015f85b9427e\
    &datasetId=S2_L2A_CDAS\
    &fromTime=2024-01-01T00%3A00%3A00.000Z\
    &toTime=2024-02-29T23%3A59%3A59.999Z\
    &layerId=1_TRUE_COLOR";

/// Copernicus Browser URL centred on `coordinates`, showing Sentinel-2
/// true color imagery.
#[must_use]
pub fn satellite_url(coordinates: Coordinates) -> String {
    format!(
        "{BROWSER_BASE_URL}?zoom={BROWSER_ZOOM}&lat={}&lng={}&{BROWSER_FIXED_PARAMS}",
        coordinates.lat, coordinates.lng
    )
}

/// Opens URLs outside the application.
pub trait LinkOpener {
    /// # Errors
    ///
    /// Returns an error if the URL could not be handed off.
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs in the system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// Prints URLs instead of opening them, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        println!("{url}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_embeds_shortest_coordinates() {
        let url = satellite_url(Coordinates::new(8.9937, -79.518));
        assert_eq!(
            url,
            "https://browser.dataspace.copernicus.eu/?zoom=14&lat=8.9937&lng=-79.518\
             &themeId=DEFAULT-THEME\
             &visualizationUrl=https%3A%2F%2Fservices.sentinel-hub.com%2Fogc%2Fwms%2Fbd86bcc0-f318-402b-a145-015f85b9427e\
             &datasetId=S2_L2A_CDAS\
             &fromTime=2024-01-01T00%3A00%3A00.000Z\
             &toTime=2024-02-29T23%3A59%3A59.999Z\
             &layerId=1_TRUE_COLOR"
        );
    }

    #[test]
    fn only_coordinates_vary() {
        let a = satellite_url(Coordinates::new(8.9937, -79.5197));
        let b = satellite_url(Coordinates::new(8.995, -79.516));
        assert_ne!(a, b);
        assert_eq!(a.split("&themeId").nth(1), b.split("&themeId").nth(1));
    }
}
