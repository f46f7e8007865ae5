use serde::Deserialize;
use std::path::PathBuf;

/// Camera template constants for the generated `gx:Tour`.
///
/// These match the fixed `<LookAt>` values a flythrough viewer expects:
/// a smooth fly-to aimed 45 degrees down from 2000 m out, altitude measured
/// relative to the ground. The first stop of a tour has no predecessor to
/// derive a duration from, so it gets a fixed lead-in.
pub mod camera {
    /// Seconds allotted to the first fly-to of every tour
    pub const FIRST_DURATION_SECS: f64 = 5.0;

    pub const DEFAULT_HEADING: f64 = 0.0;
    pub const DEFAULT_TILT: f64 = 45.0;
    pub const DEFAULT_RANGE: f64 = 2000.0;
    pub const DEFAULT_ALTITUDE_MODE: &str = "relativeToGround";
    pub const DEFAULT_FLY_TO_MODE: &str = "smooth";
}

fn default_points() -> usize {
    10
}
fn default_altitude() -> f64 {
    1000.0
}
fn default_speed() -> f64 {
    100.0
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default = "default_altitude")]
    pub altitude: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub camera: Option<CameraConfig>,
}

fn default_heading() -> f64 {
    camera::DEFAULT_HEADING
}
fn default_tilt() -> f64 {
    camera::DEFAULT_TILT
}
fn default_range() -> f64 {
    camera::DEFAULT_RANGE
}
fn default_altitude_mode() -> String {
    camera::DEFAULT_ALTITUDE_MODE.to_string()
}
fn default_fly_to_mode() -> String {
    camera::DEFAULT_FLY_TO_MODE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    #[serde(default = "default_heading")]
    pub heading: f64,
    #[serde(default = "default_tilt")]
    pub tilt: f64,
    #[serde(default = "default_range")]
    pub range: f64,
    #[serde(default = "default_altitude_mode")]
    pub altitude_mode: String,
    #[serde(default = "default_fly_to_mode")]
    pub fly_to_mode: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            heading: default_heading(),
            tilt: default_tilt(),
            range: default_range(),
            altitude_mode: default_altitude_mode(),
            fly_to_mode: default_fly_to_mode(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("flyover.toml"));
    paths.push(PathBuf::from(".flyover.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("flyover").join("config.toml"));
        paths.push(config_dir.join("flyover.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".flyover.toml"));
        paths.push(home.join(".config").join("flyover").join("config.toml"));
    }

    paths
}
