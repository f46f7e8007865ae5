use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::CameraConfig;
use crate::domain::Tour;

/// Renders a tour as a Google Earth KML document.
///
/// Layout: one `<gx:Tour>` holding a `<gx:Playlist>` of `<gx:FlyTo>` stops,
/// each aiming a `<LookAt>` camera at the viewpoint. Durations keep full
/// float precision; Google Earth accepts fractional seconds.
pub fn render_kml(tour: &Tour, altitude_m: f64, camera: &CameraConfig) -> String {
    let mut doc = String::new();

    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    doc.push_str(
        "<kml xmlns=\"http://www.opengis.net/kml/2.2\" \
         xmlns:gx=\"http://www.google.com/kml/ext/2.2\">\n",
    );
    doc.push_str("<Document>\n");
    doc.push_str("    <name>Random Flythrough</name>\n");
    doc.push_str("    <gx:Tour>\n");
    doc.push_str(&format!("        <name>{}</name>\n", escape(&tour.name)));
    doc.push_str("        <gx:Playlist>\n");

    for segment in &tour.segments {
        doc.push_str(&format!(
            r#"            <gx:FlyTo>
                <gx:duration>{duration}</gx:duration>
                <gx:flyToMode>{fly_to_mode}</gx:flyToMode>
                <LookAt>
                    <longitude>{lon}</longitude>
                    <latitude>{lat}</latitude>
                    <altitude>{altitude}</altitude>
                    <heading>{heading}</heading>
                    <tilt>{tilt}</tilt>
                    <range>{range}</range>
                    <altitudeMode>{altitude_mode}</altitudeMode>
                </LookAt>
            </gx:FlyTo>
"#,
            duration = segment.duration_secs,
            fly_to_mode = escape(&camera.fly_to_mode),
            lon = segment.point.lon,
            lat = segment.point.lat,
            altitude = altitude_m,
            heading = camera.heading,
            tilt = camera.tilt,
            range = camera.range,
            altitude_mode = escape(&camera.altitude_mode),
        ));
    }

    doc.push_str("        </gx:Playlist>\n");
    doc.push_str("    </gx:Tour>\n");
    doc.push_str("</Document>\n");
    doc.push_str("</kml>\n");

    doc
}

/// Writes the rendered tour to `path`, returning the byte count.
pub fn write_kml(path: &Path, tour: &Tour, altitude_m: f64, camera: &CameraConfig) -> Result<usize> {
    let rendered = render_kml(tour, altitude_m, camera);

    let file = File::create(path)
        .with_context(|| format!("Failed to create KML file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;

    Ok(rendered.len())
}

/// Minimal XML text escaping for user-supplied strings (tour names)
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
