use anyhow::{Context, Result, bail, ensure};
use geo::{BoundingRect, Contains, Point, Polygon};
use rand::Rng;

use crate::domain::GeoPoint;

/// Kilometers per degree of latitude (and of longitude at the equator)
const KM_PER_DEGREE: f64 = 111.0;

/// Rejection-sampling draw budget per requested point. A polygon whose
/// interior fills even 0.1% of its bounding box stays well under this.
const DRAWS_PER_POINT: usize = 10_000;

/// Scatters `count` viewpoints uniformly in a degree-approximated square
/// around `center`.
///
/// Offsets are drawn in km and converted at ~111 km per degree, with the
/// longitude axis widened by 1/cos(lat). Not a true geodesic disk: corner
/// points can exceed `radius_km` along the diagonal.
pub fn sample_around(
    center: GeoPoint,
    radius_km: f64,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<GeoPoint> {
    let cos_lat = center.lat.to_radians().cos().abs();

    (0..count)
        .map(|_| {
            let lat = center.lat + rng.gen_range(-radius_km..radius_km) / KM_PER_DEGREE;
            let lon =
                center.lon + rng.gen_range(-radius_km..radius_km) / (KM_PER_DEGREE * cos_lat);
            GeoPoint::new(lat, lon)
        })
        .collect()
}

/// Scatters `count` viewpoints uniformly inside `polygon` by rejection
/// sampling over its bounding rectangle.
///
/// Candidates landing in a hole are rejected along with everything else
/// outside the interior. Fails instead of spinning forever when the draw
/// budget runs out, which only happens for degenerate or sliver polygons.
pub fn sample_within(
    polygon: &Polygon<f64>,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<GeoPoint>> {
    let bounds = polygon
        .bounding_rect()
        .context("boundary polygon has no extent")?;
    ensure!(
        bounds.width() > 0.0 && bounds.height() > 0.0,
        "boundary polygon has a degenerate bounding box ({} x {} degrees)",
        bounds.width(),
        bounds.height()
    );

    let budget = count.saturating_mul(DRAWS_PER_POINT);
    let mut points = Vec::with_capacity(count);
    let mut draws = 0usize;

    while points.len() < count {
        if draws >= budget {
            bail!(
                "gave up after {draws} draws with {} of {count} points found: \
                 polygon interior is too small relative to its bounding box",
                points.len()
            );
        }
        draws += 1;

        let candidate = Point::new(
            rng.gen_range(bounds.min().x..bounds.max().x),
            rng.gen_range(bounds.min().y..bounds.max().y),
        );
        if polygon.contains(&candidate) {
            points.push(GeoPoint::from(candidate));
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            vec![],
        )
    }

    #[test]
    fn test_radius_points_stay_in_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = GeoPoint::new(37.7749, -122.4194);
        let radius_km = 10.0;

        let points = sample_around(center, radius_km, 200, &mut rng);
        assert_eq!(points.len(), 200);

        let max_lat_offset = radius_km / KM_PER_DEGREE;
        let max_lon_offset = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());
        for p in &points {
            assert!((p.lat - center.lat).abs() <= max_lat_offset + 1e-9);
            assert!((p.lon - center.lon).abs() <= max_lon_offset + 1e-9);
        }
    }

    #[test]
    fn test_radius_seed_reproducible() {
        let center = GeoPoint::new(51.5074, -0.1278);
        let a = sample_around(center, 5.0, 20, &mut StdRng::seed_from_u64(42));
        let b = sample_around(center, 5.0, 20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_polygon_points_inside() {
        let polygon = unit_square();
        let mut rng = StdRng::seed_from_u64(3);

        let points = sample_within(&polygon, 50, &mut rng).unwrap();
        assert_eq!(points.len(), 50);
        for p in &points {
            assert!(polygon.contains(&Point::from(*p)));
        }
    }

    #[test]
    fn test_polygon_hole_is_avoided() {
        let polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            vec![LineString::from(vec![
                (0.25, 0.25),
                (0.75, 0.25),
                (0.75, 0.75),
                (0.25, 0.75),
            ])],
        );
        let mut rng = StdRng::seed_from_u64(11);

        let points = sample_within(&polygon, 30, &mut rng).unwrap();
        for p in &points {
            let in_hole = p.lon > 0.25 && p.lon < 0.75 && p.lat > 0.25 && p.lat < 0.75;
            assert!(!in_hole, "point {:?} landed in the hole", p);
        }
    }

    #[test]
    fn test_flat_polygon_is_rejected() {
        // All vertices collinear along the equator: zero-height bounding box
        let flat = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(1);

        let err = sample_within(&flat, 5, &mut rng).unwrap_err();
        assert!(err.to_string().contains("degenerate"));
    }

    #[test]
    fn test_zero_area_polygon_exhausts_budget() {
        // Collinear diagonal: bounding box has area but the interior is empty
        let sliver = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(1);

        let err = sample_within(&sliver, 1, &mut rng).unwrap_err();
        assert!(err.to_string().contains("gave up"));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = sample_within(&unit_square(), 0, &mut rng).unwrap();
        assert!(points.is_empty());
    }
}
