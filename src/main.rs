use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

use flyover::boundary;
use flyover::config::{CameraConfig, FileConfig};
use flyover::domain::GeoPoint;
use flyover::geometry::{sample_around, sample_within};
use flyover::tour::{build_tour, write_kml};

/// Generate randomized Google Earth KML camera flythrough tours
///
/// Examples:
///   # Ten viewpoints within 10 km of downtown San Francisco
///   flyover radius --lat 37.7749 --lon -122.4194 --radius 10
///
///   # Scatter 25 viewpoints inside a polygon drawn in Google Earth
///   flyover polygon boundary.kml -n 25 -a 1500 -s 120
///
///   # Reproducible tour with file-based defaults
///   flyover radius --lat 35.6762 --lon 139.6503 -r 8 --seed 42 --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "flyover")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scatter viewpoints in a degree-approximated box around a center
    Radius {
        /// Center latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Center longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Scatter radius in kilometers
        #[arg(short = 'r', long)]
        radius: f64,

        #[command(flatten)]
        opts: TourOpts,
    },

    /// Scatter viewpoints inside a polygon read from a boundary file
    Polygon {
        /// Boundary file (.kml, .json or .geojson)
        boundary: PathBuf,

        #[command(flatten)]
        opts: TourOpts,
    },
}

#[derive(Args, Debug)]
struct TourOpts {
    /// Path to config file (optional, auto-searches flyover.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of viewpoints to generate
    #[arg(short = 'n', long, default_value = "10")]
    points: usize,

    /// Camera altitude in meters above ground
    #[arg(short = 'a', long, default_value = "1000")]
    altitude: f64,

    /// Flyover speed in km/h
    #[arg(short = 's', long, default_value = "100")]
    speed: f64,

    /// Output KML file path (defaults to a name derived from the input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Tour name embedded in the KML
    #[arg(long)]
    name: Option<String>,

    /// RNG seed for reproducible tours
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// CLI options merged over file config and built-in defaults
struct Settings {
    points: usize,
    altitude: f64,
    speed: f64,
    output: Option<PathBuf>,
    name: String,
    seed: Option<u64>,
    verbose: bool,
    camera: CameraConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let total_start = Instant::now();

    println!("flyover - KML Flythrough Generator");
    println!("==================================");
    println!();

    match cli.command {
        Command::Radius {
            lat,
            lon,
            radius,
            opts,
        } => run_radius(lat, lon, radius, &opts)?,
        Command::Polygon { boundary, opts } => run_polygon(&boundary, &opts)?,
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn run_radius(lat: f64, lon: f64, radius: f64, opts: &TourOpts) -> Result<()> {
    let settings = resolve_settings(opts)?;

    if !(-90.0..=90.0).contains(&lat) {
        bail!("Latitude must be between -90 and 90, got {lat}");
    }
    if !(-180.0..=180.0).contains(&lon) {
        bail!("Longitude must be between -180 and 180, got {lon}");
    }
    if radius <= 0.0 {
        bail!("Radius must be positive, got {radius} km");
    }

    if settings.verbose {
        print_settings(&settings);
        println!("  Center: ({:.4}, {:.4})", lat, lon);
        println!("  Radius: {} km", radius);
        println!();
    }

    let center = GeoPoint::new(lat, lon);
    let spinner = create_spinner("Sampling viewpoints...");
    let start = Instant::now();
    let mut rng = make_rng(settings.seed);
    let points = sample_around(center, radius, settings.points, &mut rng);
    spinner.finish_with_message(format!(
        "Sampled {} viewpoints within {} km of ({:.4}, {:.4}) [{:.1}s]",
        points.len(),
        radius,
        lat,
        lon,
        start.elapsed().as_secs_f32()
    ));

    let output = settings
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("flythrough_{lat}_{lon}_r{radius}.kml")));

    finish_tour(&points, &settings, &output)
}

fn run_polygon(boundary_path: &Path, opts: &TourOpts) -> Result<()> {
    let settings = resolve_settings(opts)?;

    if settings.verbose {
        print_settings(&settings);
        println!("  Boundary: {}", boundary_path.display());
        println!();
    }

    let spinner = create_spinner("Reading boundary polygon...");
    let polygon = boundary::read_polygon(boundary_path)
        .with_context(|| format!("Failed to read boundary from {}", boundary_path.display()))?;
    let vertex_count = polygon.exterior().0.len().saturating_sub(1);
    spinner.finish_with_message(format!("Boundary polygon: {} vertices", vertex_count));

    let spinner = create_spinner("Sampling viewpoints...");
    let start = Instant::now();
    let mut rng = make_rng(settings.seed);
    let points = sample_within(&polygon, settings.points, &mut rng)
        .context("Failed to sample points inside the boundary polygon")?;
    spinner.finish_with_message(format!(
        "Sampled {} viewpoints inside the boundary [{:.1}s]",
        points.len(),
        start.elapsed().as_secs_f32()
    ));

    let output = settings.output.clone().unwrap_or_else(|| {
        let stem = boundary_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("boundary");
        PathBuf::from(format!("flythrough_{stem}.kml"))
    });

    finish_tour(&points, &settings, &output)
}

fn finish_tour(points: &[GeoPoint], settings: &Settings, output: &Path) -> Result<()> {
    let tour = build_tour(settings.name.clone(), points, settings.speed)?;

    let spinner = create_spinner("Writing KML tour...");
    let bytes = write_kml(output, &tour, settings.altitude, &settings.camera)
        .context("Failed to write KML file")?;
    spinner.finish_with_message(format!(
        "Wrote {} fly-to stops ({:.1} KB)",
        tour.segments.len(),
        bytes as f64 / 1024.0
    ));

    println!();
    println!(
        "Tour duration: {:.1}s across {} viewpoints",
        tour.total_duration_secs(),
        tour.segments.len()
    );
    println!("Output: {}", output.display());

    Ok(())
}

fn resolve_settings(opts: &TourOpts) -> Result<Settings> {
    let file_config = if let Some(ref config_path) = opts.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str::<FileConfig>(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let points = if opts.points != 10 {
        opts.points
    } else {
        file_config.as_ref().map(|c| c.points).unwrap_or(10)
    };
    let altitude = if (opts.altitude - 1000.0).abs() > 0.01 {
        opts.altitude
    } else {
        file_config.as_ref().map(|c| c.altitude).unwrap_or(1000.0)
    };
    let speed = if (opts.speed - 100.0).abs() > 0.01 {
        opts.speed
    } else {
        file_config.as_ref().map(|c| c.speed).unwrap_or(100.0)
    };
    let verbose = opts.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let output = opts
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let name = opts
        .name
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.name.clone()))
        .unwrap_or_else(|| "Random Tour".to_string());
    let camera = file_config
        .as_ref()
        .and_then(|c| c.camera.clone())
        .unwrap_or_default();

    if points == 0 {
        bail!("Point count must be at least 1");
    }
    if speed <= 0.0 {
        bail!("Speed must be positive, got {speed} km/h");
    }
    if altitude < 0.0 {
        bail!("Altitude must be non-negative, got {altitude} m");
    }

    Ok(Settings {
        points,
        altitude,
        speed,
        output,
        name,
        seed: opts.seed,
        verbose,
        camera,
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_settings(settings: &Settings) {
    println!("Configuration:");
    println!("  Points: {}", settings.points);
    println!("  Altitude: {} m", settings.altitude);
    println!("  Speed: {} km/h", settings.speed);
    println!("  Tour name: {}", settings.name);
    if let Some(seed) = settings.seed {
        println!("  Seed: {}", seed);
    }
    println!(
        "  Camera: heading {}, tilt {}, range {}",
        settings.camera.heading, settings.camera.tilt, settings.camera.range
    );
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
