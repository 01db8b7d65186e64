//! Shimmer CLI
//!
//! Inspect shimmer geometry, preview sweeps headlessly and manage
//! `shimmer.toml` files.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use shimmer_core::Size;
use shimmer_view::{Direction, GradientProfile, MaskGeometry, ShimmerConfiguration};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod preview;

use config::ShimmerFile;
use preview::PreviewOptions;

#[derive(Parser)]
#[command(name = "shimmer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shimmer loading-placeholder tuning harness", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mask geometry for a content length
    Geometry {
        /// Content length along the sweep axis, in points
        #[arg(short, long)]
        length: f32,

        #[command(flatten)]
        settings: Settings,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Simulate a shimmer and print one line per frame
    Preview {
        /// Content width in points
        #[arg(long)]
        width: f32,

        /// Content height in points
        #[arg(long)]
        height: f32,

        #[command(flatten)]
        settings: Settings,

        /// Frames per simulated second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Seconds to simulate
        #[arg(long, default_value = "3.0")]
        duration: f64,

        /// Stop shimmering at this time (seconds)
        #[arg(long)]
        stop_at: Option<f64>,

        /// Start shimmering again at this time (seconds)
        #[arg(long)]
        restart_at: Option<f64>,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage shimmer configuration files
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a configuration file with the default values
    Init {
        /// Output path
        #[arg(default_value = config::CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Check {
        path: PathBuf,
    },
}

/// Configuration file plus per-field overrides
#[derive(Args)]
struct Settings {
    /// Configuration file (shimmer.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sweep speed in points per second
    #[arg(long)]
    speed: Option<f32>,

    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Highlight band length as a fraction of the content
    #[arg(long)]
    highlight_length: Option<f32>,

    /// Pause between sweeps in seconds
    #[arg(long)]
    pause: Option<f64>,

    #[arg(long)]
    animation_opacity: Option<f32>,

    #[arg(long)]
    base_opacity: Option<f32>,

    /// Begin fade duration in seconds
    #[arg(long)]
    begin_fade: Option<f64>,

    /// End fade duration in seconds
    #[arg(long)]
    end_fade: Option<f64>,

    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Right,
    Left,
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Right => Direction::Right,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    ThreeStop,
    Feathered,
}

impl From<ProfileArg> for GradientProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::ThreeStop => GradientProfile::ThreeStop,
            ProfileArg::Feathered => GradientProfile::Feathered,
        }
    }
}

impl Settings {
    /// Resolve the effective configuration and validate it
    fn resolve(&self) -> Result<ShimmerConfiguration> {
        let mut config = config::load_or_default(self.config.as_deref())?;

        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(direction) = self.direction {
            config.direction = direction.into();
        }
        if let Some(length) = self.highlight_length {
            config.highlight_length = length;
        }
        if let Some(pause) = self.pause {
            config.pause_duration = pause;
        }
        if let Some(opacity) = self.animation_opacity {
            config.animation_opacity = opacity;
        }
        if let Some(opacity) = self.base_opacity {
            config.base_opacity = opacity;
        }
        if let Some(duration) = self.begin_fade {
            config.begin_fade_duration = duration;
        }
        if let Some(duration) = self.end_fade {
            config.end_fade_duration = duration;
        }
        if let Some(profile) = self.profile {
            config.profile = profile.into();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so frame output stays pipeable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Geometry {
            length,
            settings,
            json,
        } => cmd_geometry(length, &settings, json),

        Commands::Preview {
            width,
            height,
            settings,
            fps,
            duration,
            stop_at,
            restart_at,
            json,
        } => {
            let options = PreviewOptions {
                size: Size::new(width, height),
                fps,
                duration,
                stop_at,
                restart_at,
            };
            cmd_preview(&settings, &options, json)
        }

        Commands::Config { command } => match command {
            ConfigCommands::Init { path, force } => cmd_config_init(&path, force),
            ConfigCommands::Check { path } => cmd_config_check(&path),
        },
    }
}

fn cmd_geometry(length: f32, settings: &Settings, json: bool) -> Result<()> {
    let config = settings.resolve()?;
    let content = config.direction.axis().size(length, 1.0);

    let Some(geometry) = MaskGeometry::compute(&config, content) else {
        anyhow::bail!("Content length must be positive (got {})", length);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&geometry)?);
        return Ok(());
    }

    println!("Axis:              {:?}", geometry.axis);
    println!("Content length:    {:.2}", geometry.content_length);
    println!("Highlight size:    {:.2}", geometry.highlight_size);
    println!("Extra distance:    {:.2}", geometry.extra_distance);
    println!("Full sweep extent: {:.2}", geometry.full_sweep_extent);
    println!("Travel distance:   {:.2}", geometry.travel_distance);
    println!("Start offset:      {:.2}", geometry.start_offset());
    println!("Cycle duration:    {:.3}s", geometry.cycle_duration);

    println!("Gradient stops:");
    for stop in geometry.gradient(&config).stops() {
        println!("  {:.3} alpha {:.3}", stop.offset, stop.color.a);
    }

    Ok(())
}

fn cmd_preview(settings: &Settings, options: &PreviewOptions, json: bool) -> Result<()> {
    let config = settings.resolve()?;
    info!(
        "Previewing {:?} sweep over {}x{} at {} fps",
        config.direction, options.size.width, options.size.height, options.fps
    );

    for frame in preview::run(config, options) {
        if json {
            println!("{}", serde_json::to_string(&frame)?);
            continue;
        }

        match (frame.offset, frame.effect_opacity) {
            (Some(offset), Some(opacity)) => println!(
                "{:>5} {:>8.3}s {:<10} offset {:>9.2} effect {:.3}",
                frame.frame, frame.time, frame.phase, offset, opacity
            ),
            _ => println!(
                "{:>5} {:>8.3}s {:<10} no mask",
                frame.frame, frame.time, frame.phase
            ),
        }
    }

    Ok(())
}

fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = ShimmerFile::default().to_toml()?;
    fs::write(path, content)?;

    info!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn cmd_config_check(path: &Path) -> Result<()> {
    let file = ShimmerFile::load(path)?;
    let config = file.shimmer;

    info!("{} is valid", path.display());
    info!("  speed: {} pt/s, direction: {:?}", config.speed, config.direction);
    info!(
        "  highlight: {}, pause: {}s, profile: {:?}",
        config.highlight_length, config.pause_duration, config.profile
    );
    info!(
        "  opacity: {} -> {}, fades: {}s in / {}s out",
        config.animation_opacity,
        config.base_opacity,
        config.begin_fade_duration,
        config.end_fade_duration
    );
    Ok(())
}
