use geo::Polygon;

use super::BoundaryError;

/// Pulls the first `<Polygon>` ring out of a KML document.
///
/// KML stores ring coordinates as whitespace-separated `lon,lat[,altitude]`
/// tuples inside a `<coordinates>` element; the first one following a
/// `<Polygon>` tag is the outer boundary. Only that ring is used, so inner
/// boundaries (holes) drawn in the source file are ignored here.
pub fn parse_polygon(kml: &str) -> Result<Polygon<f64>, BoundaryError> {
    let polygon_body = find_open_tag(kml, "Polygon")
        .map(|at| &kml[at..])
        .ok_or(BoundaryError::NoPolygon)?;
    let coords_body = find_open_tag(polygon_body, "coordinates")
        .map(|at| &polygon_body[at..])
        .ok_or(BoundaryError::NoPolygon)?;
    let text = coords_body
        .split('<')
        .next()
        .ok_or(BoundaryError::NoPolygon)?;

    let vertices = parse_coordinates(text)?;
    super::polygon_from_rings(vertices, Vec::new())
}

/// Byte offset just past the first opening tag with the given local name,
/// tolerating a namespace prefix and attributes.
fn find_open_tag(doc: &str, name: &str) -> Option<usize> {
    let mut at = 0;
    while let Some(offset) = doc[at..].find('<') {
        let tag_start = at + offset + 1;
        let tag_end = doc[tag_start..]
            .find(|c: char| c == '>' || c == '/' || c.is_ascii_whitespace())
            .map(|e| tag_start + e)?;

        let tag = &doc[tag_start..tag_end];
        let local = tag.rsplit(':').next().unwrap_or(tag);
        if local == name {
            let gt = doc[tag_start..].find('>')? + tag_start;
            return Some(gt + 1);
        }

        at = tag_end;
    }
    None
}

fn parse_coordinates(text: &str) -> Result<Vec<(f64, f64)>, BoundaryError> {
    let mut vertices = Vec::new();

    for tuple in text.split_whitespace() {
        let mut parts = tuple.split(',');
        let lon = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
        let lat = parts.next().and_then(|v| v.trim().parse::<f64>().ok());

        match (lon, lat) {
            (Some(lon), Some(lat)) => vertices.push((lon, lat)),
            _ => return Err(BoundaryError::BadCoordinate(tuple.to_string())),
        }
    }

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Test Region</name>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>
              -122.5,37.7,0 -122.3,37.7,0 -122.3,37.9,0 -122.5,37.9,0 -122.5,37.7,0
            </coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#;

    #[test]
    fn test_parse_polygon() {
        let polygon = parse_polygon(SAMPLE).unwrap();
        // 4 distinct vertices; geo closes the ring with a 5th coordinate
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.exterior().0[0].x, -122.5);
        assert_eq!(polygon.exterior().0[0].y, 37.7);
    }

    #[test]
    fn test_namespaced_tags() {
        let kml = "<kml:Polygon><kml:coordinates>0,0 1,0 1,1</kml:coordinates></kml:Polygon>";
        let polygon = parse_polygon(kml).unwrap();
        assert_eq!(polygon.exterior().0.len(), 4);
    }

    #[test]
    fn test_altitude_component_is_ignored() {
        let kml = "<Polygon><coordinates>0,0,250 1,0,250 1,1,250</coordinates></Polygon>";
        let polygon = parse_polygon(kml).unwrap();
        assert_eq!(polygon.exterior().0[1].x, 1.0);
        assert_eq!(polygon.exterior().0[1].y, 0.0);
    }

    #[test]
    fn test_no_polygon() {
        let kml = "<kml><Document><Placemark><Point><coordinates>0,0</coordinates></Point></Placemark></Document></kml>";
        assert!(matches!(
            parse_polygon(kml).unwrap_err(),
            BoundaryError::NoPolygon
        ));
    }

    #[test]
    fn test_bad_tuple() {
        let kml = "<Polygon><coordinates>0,0 1,abc 1,1</coordinates></Polygon>";
        assert!(matches!(
            parse_polygon(kml).unwrap_err(),
            BoundaryError::BadCoordinate(t) if t == "1,abc"
        ));
    }

    #[test]
    fn test_too_few_vertices() {
        let kml = "<Polygon><coordinates>0,0 1,1</coordinates></Polygon>";
        assert!(matches!(
            parse_polygon(kml).unwrap_err(),
            BoundaryError::TooFewVertices(2)
        ));
    }
}
