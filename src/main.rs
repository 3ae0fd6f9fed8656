use anyhow::Context;
use clap::{Parser, Subcommand};
use cueline_cv::{PoolTracker, Result, TrackerConfig};
use std::path::{Path, PathBuf};

mod session;

#[derive(Parser)]
#[command(name = "cueline")]
#[command(about = "Pool table tracking and shot prediction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and print one report per frame.
    Replay {
        /// JSON array of {image, detections} frames.
        #[arg(long)]
        manifest: PathBuf,

        /// Tracker configuration (JSON). Defaults to the environment.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Table cloth preset, applied on top of the configuration.
        #[arg(long)]
        preset: Option<String>,

        /// Write reports here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            manifest,
            config,
            preset,
            out,
        } => run_replay(&manifest, config.as_deref(), preset.as_deref(), out.as_deref()),
    }
}

fn run_replay(
    manifest_path: &Path,
    config_path: Option<&Path>,
    preset: Option<&str>,
    out_path: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => TrackerConfig::from_json_file(path)?,
        None => TrackerConfig::from_env(),
    };

    let mut tracker = PoolTracker::new(config);
    if let Some(name) = preset {
        tracker.set_color_preset(name)?;
    }

    let manifest = session::Manifest::load(manifest_path)?;
    tracing::info!(
        "Replaying {} frames from {}",
        manifest.frames.len(),
        manifest_path.display()
    );

    let reports = session::replay(&mut tracker, &manifest)?;
    let pocketed = reports
        .iter()
        .filter(|r| r.prediction.as_ref().is_some_and(|p| p.prediction))
        .count();
    tracing::info!("{} frames reported a pocketed shot", pocketed);

    let json = serde_json::to_string_pretty(&reports)?;
    match out_path {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write reports: {:?}", path))?;
            tracing::info!("Reports written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
