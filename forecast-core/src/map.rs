use serde::{Deserialize, Serialize};

use crate::model::WeatherSnapshot;

const DEFAULT_ZOOM: u8 = 11;
const OSM_BASE_URL: &str = "https://www.openstreetmap.org";

/// A pin on a map at the queried coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub zoom: u8,
}

impl MapMarker {
    pub fn for_snapshot(label: &str, snapshot: &WeatherSnapshot) -> Self {
        Self {
            latitude: snapshot.latitude,
            longitude: snapshot.longitude,
            label: label.to_string(),
            zoom: DEFAULT_ZOOM,
        }
    }

    /// OpenStreetMap link with a marker, centred on the coordinates.
    pub fn openstreetmap_url(&self) -> String {
        let (lat, lon) = (self.latitude, self.longitude);
        format!(
            "{OSM_BASE_URL}/?mlat={lat:.4}&mlon={lon:.4}#map={}/{lat:.4}/{lon:.4}",
            self.zoom
        )
    }
}
