pub mod geojson;
pub mod kml;

use geo::{LineString, Polygon};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to read boundary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no polygon found in boundary file")]
    NoPolygon,
    #[error("invalid coordinate tuple: {0:?}")]
    BadCoordinate(String),
    #[error("polygon needs at least 3 vertices, found {0}")]
    TooFewVertices(usize),
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported geometry type: {0:?}")]
    UnsupportedGeometry(String),
    #[error("unsupported boundary format: {0:?} (expected .kml, .json or .geojson)")]
    UnsupportedFormat(String),
}

/// Reads a boundary polygon from a KML or GeoJSON file, chosen by extension.
pub fn read_polygon(path: &Path) -> Result<Polygon<f64>, BoundaryError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "kml" => kml::parse_polygon(&std::fs::read_to_string(path)?),
        "json" | "geojson" => geojson::parse_polygon(&std::fs::read_to_string(path)?),
        other => Err(BoundaryError::UnsupportedFormat(other.to_string())),
    }
}

/// Builds a polygon from (lon, lat) rings, dropping an explicit closing
/// vertex so the count check sees distinct vertices only.
pub(crate) fn polygon_from_rings(
    exterior: Vec<(f64, f64)>,
    interiors: Vec<Vec<(f64, f64)>>,
) -> Result<Polygon<f64>, BoundaryError> {
    let exterior = open_ring(exterior);
    if exterior.len() < 3 {
        return Err(BoundaryError::TooFewVertices(exterior.len()));
    }

    let interiors = interiors
        .into_iter()
        .map(|ring| LineString::from(open_ring(ring)))
        .collect();

    Ok(Polygon::new(LineString::from(exterior), interiors))
}

fn open_ring(mut ring: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}
