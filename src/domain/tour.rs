use super::GeoPoint;

/// One camera stop: the viewpoint and how long the fly-to takes
#[derive(Debug, Clone, Copy)]
pub struct TourSegment {
    pub point: GeoPoint,
    /// Seconds the camera spends flying to this viewpoint
    pub duration_secs: f64,
}

/// An ordered camera path for a 3D-earth viewer
#[derive(Debug, Clone)]
pub struct Tour {
    pub name: String,
    pub segments: Vec<TourSegment>,
}

impl Tour {
    pub fn new(name: impl Into<String>, segments: Vec<TourSegment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    /// Sum of all fly-to durations in seconds
    pub fn total_duration_secs(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}
