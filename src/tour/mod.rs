pub mod builder;
pub mod kml;

pub use builder::build_tour;
pub use kml::{render_kml, write_kml};
