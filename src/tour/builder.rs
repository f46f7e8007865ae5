use anyhow::{Result, ensure};

use crate::config::camera::FIRST_DURATION_SECS;
use crate::domain::{GeoPoint, Tour, TourSegment};
use crate::geometry::haversine_km;

/// Builds a timed tour from sampled viewpoints.
///
/// The first stop has no predecessor to derive a duration from and gets the
/// fixed lead-in; each later stop is timed from the great-circle distance to
/// its predecessor at `speed_kmh`.
pub fn build_tour(name: impl Into<String>, points: &[GeoPoint], speed_kmh: f64) -> Result<Tour> {
    ensure!(!points.is_empty(), "tour needs at least one viewpoint");
    ensure!(
        speed_kmh > 0.0,
        "speed must be positive, got {speed_kmh} km/h"
    );

    let mut segments = Vec::with_capacity(points.len());
    segments.push(TourSegment {
        point: points[0],
        duration_secs: FIRST_DURATION_SECS,
    });

    for pair in points.windows(2) {
        let distance_km = haversine_km(pair[0], pair[1]);
        segments.push(TourSegment {
            point: pair[1],
            duration_secs: distance_km / speed_kmh * 3600.0,
        });
    }

    Ok(Tour::new(name, segments))
}
