use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sustained radiation event analysis.
#[derive(Parser)]
#[command(
    name = "sre",
    version,
    about = "Sustained radiation event analysis for daily climate-model output"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract the daily series nearest to a named location from every model.
    Extract(ExtractArgs),
    /// Detect sustained events in extracted series and summarise them.
    Analyze(AnalyzeArgs),
    /// Build per-grid-cell duration histograms for one model.
    Map(MapArgs),
    /// Convert extracted irradiance series to daily PV energy.
    Pv(PvArgs),
    /// Write a model's lat/lon mesh as JSON.
    Mesh(MeshArgs),
}

/// Arguments for the `extract` subcommand.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sre.toml")]
    pub config: PathBuf,

    /// Location name from the `[locations]` table.
    #[arg(short, long)]
    pub location: String,

    /// Restrict extraction to these models (repeatable).
    #[arg(short, long)]
    pub model: Vec<String>,

    /// Write all series into this single Parquet file instead of one file
    /// per model under the output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override `[io].output_dir` from config.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sre.toml")]
    pub config: PathBuf,

    /// Series Parquet file written by `extract`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Restrict analysis to these models (repeatable).
    #[arg(short, long)]
    pub model: Vec<String>,

    /// Override `[events].percentiles`, e.g. `5,95` or `all`.
    #[arg(short, long)]
    pub percentiles: Option<String>,

    /// Path for the JSON summary (default: `<output_dir>/<input stem>.analysis.json`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include every detected event with its mean value.
    #[arg(long)]
    pub events: bool,
}

/// Arguments for the `map` subcommand.
#[derive(clap::Args)]
pub struct MapArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sre.toml")]
    pub config: PathBuf,

    /// Model name from the `[[models]]` entries.
    #[arg(short, long)]
    pub model: String,

    /// Override `[events].percentiles`, e.g. `5,95` or `all`.
    #[arg(short, long)]
    pub percentiles: Option<String>,

    /// Path for the map Parquet file (default: `<output_dir>/map_<model>.parquet`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process grid points one at a time.
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the `pv` subcommand.
#[derive(clap::Args)]
pub struct PvArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sre.toml")]
    pub config: PathBuf,

    /// Irradiance series Parquet file written by `extract`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Location the series was extracted for, used as the PV site.
    #[arg(short, long)]
    pub location: String,

    /// Path for the PV energy Parquet file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override `[pv].tilt` (degrees).
    #[arg(long)]
    pub tilt: Option<f64>,

    /// Override `[pv].azimuth` (degrees clockwise from north).
    #[arg(long)]
    pub azimuth: Option<f64>,

    /// Override `[pv].tracking` (`fixed`, `single_axis`, `dual_axis` or 0/1/2).
    #[arg(long)]
    pub tracking: Option<String>,
}

/// Arguments for the `mesh` subcommand.
#[derive(clap::Args)]
pub struct MeshArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sre.toml")]
    pub config: PathBuf,

    /// Model name from the `[[models]]` entries.
    #[arg(short, long)]
    pub model: String,

    /// Path for the JSON mesh (default: `<output_dir>/mesh_<model>.json`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
