use geo::Polygon;
use serde::Deserialize;
use serde_json::Value;

use super::BoundaryError;

/// GeoJSON polygon rings: outer ring first, then holes. Positions carry an
/// optional altitude that is dropped.
type PolygonCoords = Vec<Vec<Vec<f64>>>;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    features: Option<Vec<Feature>>,
    #[serde(default)]
    geometry: Option<Geometry>,
    /// Left untyped until the geometry type is known; a Point's coordinates
    /// would otherwise fail polygon-shaped parsing up front
    #[serde(default)]
    coordinates: Value,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parses a boundary polygon from a GeoJSON document.
///
/// Accepts a bare `Polygon` geometry, a `Feature` wrapping one, or a
/// `FeatureCollection`, in which case the first polygon feature wins.
pub fn parse_polygon(input: &str) -> Result<Polygon<f64>, BoundaryError> {
    let doc: Document = serde_json::from_str(input)?;

    let geometry = match doc.type_.as_str() {
        "Polygon" => Geometry {
            type_: doc.type_,
            coordinates: doc.coordinates,
        },
        "Feature" => doc.geometry.ok_or(BoundaryError::NoPolygon)?,
        "FeatureCollection" => doc
            .features
            .unwrap_or_default()
            .into_iter()
            .filter_map(|f| f.geometry)
            .find(|g| g.type_ == "Polygon")
            .ok_or(BoundaryError::NoPolygon)?,
        other => return Err(BoundaryError::UnsupportedGeometry(other.to_string())),
    };

    if geometry.type_ != "Polygon" {
        return Err(BoundaryError::UnsupportedGeometry(geometry.type_));
    }
    if geometry.coordinates.is_null() {
        return Err(BoundaryError::NoPolygon);
    }

    let mut rings = serde_json::from_value::<PolygonCoords>(geometry.coordinates)?.into_iter();
    let exterior = ring_vertices(rings.next().ok_or(BoundaryError::NoPolygon)?)?;
    let interiors = rings.map(ring_vertices).collect::<Result<Vec<_>, _>>()?;

    super::polygon_from_rings(exterior, interiors)
}

fn ring_vertices(ring: Vec<Vec<f64>>) -> Result<Vec<(f64, f64)>, BoundaryError> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(BoundaryError::BadCoordinate(format!("{position:?}"))),
        })
        .collect()
}
