use super::filter::View;
use super::model::Record;

// ---------------------------------------------------------------------------
// Geocoding collaborator
// ---------------------------------------------------------------------------

/// Geographic center of LA County, the fallback for unresolvable zip codes.
pub const LA_COUNTY_CENTER: (f64, f64) = (34.0522, -118.2437);

/// External collaborator resolving a zip code to `(latitude, longitude)`.
pub trait Geocoder {
    fn locate(&self, zip_code: &str) -> Option<(f64, f64)>;
}

/// A geocoder that knows nothing; every record falls back to the regional
/// center unless the source file carried coordinates.
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn locate(&self, _zip_code: &str) -> Option<(f64, f64)> {
        None
    }
}

// ---------------------------------------------------------------------------
// Map-ready coordinates
// ---------------------------------------------------------------------------

/// A record's resolved position. Coordinates are always concrete: the
/// source file's values, the geocoder's answer, or the regional center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    /// Row index into the base dataset.
    pub row: usize,
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolve one record. A geocoder miss is not an error; the fallback applies.
pub fn resolve(record: &Record, geocoder: &dyn Geocoder) -> (f64, f64) {
    match (record.latitude, record.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => geocoder
            .locate(&record.zip_code)
            .unwrap_or(LA_COUNTY_CENTER),
    }
}

/// Map-ready positions for every row of the view, in view order.
pub fn map_points(view: &View<'_>, geocoder: &dyn Geocoder) -> Vec<MapPoint> {
    let dataset = view.dataset();
    view.rows()
        .iter()
        .map(|&row| {
            let (latitude, longitude) = resolve(&dataset.records[row], geocoder);
            MapPoint {
                row,
                latitude,
                longitude,
            }
        })
        .collect()
}
