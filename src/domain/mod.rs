pub mod point;
pub mod tour;

pub use point::GeoPoint;
pub use tour::{Tour, TourSegment};
