//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mola_common::{EdgePolicy, GridConfig, MolaResult};
use region_mapper::ReportFormat;
use renderer::overlay::DEFAULT_OVERLAY_ALPHA;

#[derive(Parser, Debug)]
#[command(name = "mola-mapper")]
#[command(about = "Map MOLA images onto MEGDR 128 pixel per degree tiles")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Overlay the MEGDR regions on an image and print the file mapping
    Overlay(OverlayArgs),

    /// Print the file mapping without an image
    Report(ReportArgs),

    /// Show the region and files covering a point
    Locate(LocateArgs),

    /// Describe a PDS label and optionally sample its tile
    InspectLabel(InspectLabelArgs),
}

/// Overlay grid settings shared by the mapping subcommands.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Nominal grid columns
    #[arg(long, default_value_t = 36)]
    pub grid_width: u32,

    /// Nominal grid rows
    #[arg(long, default_value_t = 14)]
    pub grid_height: u32,

    /// Fraction of the image width by which longitude 0 is shifted left
    #[arg(long, default_value_t = 0.25)]
    pub x_offset_ratio: f64,

    /// Region edge handling (tiling or reference)
    #[arg(long, default_value = "tiling")]
    pub edge_policy: EdgePolicy,
}

impl GridArgs {
    pub fn to_config(&self) -> MolaResult<GridConfig> {
        Ok(
            GridConfig::new(self.grid_width, self.grid_height, self.x_offset_ratio)?
                .with_edge_policy(self.edge_policy),
        )
    }
}

impl Default for GridArgs {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            grid_width: config.grid_width(),
            grid_height: config.grid_height(),
            x_offset_ratio: config.x_offset_ratio(),
            edge_policy: config.edge_policy(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OverlayArgs {
    /// Input MOLA image (JPEG, PNG, ...)
    pub image: PathBuf,

    /// Output PNG with the original and overlaid image side by side
    #[arg(short, long, default_value = "megdr_overlay.png")]
    pub output: PathBuf,

    /// TrueType font for the region labels (default: bundled DejaVu Sans Mono)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Opacity of the region colors
    #[arg(long, default_value_t = DEFAULT_OVERLAY_ALPHA)]
    pub alpha: f32,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// Latitude in degrees north
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees, east positive; wrapped into [0, 360)
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InspectLabelArgs {
    /// PDS label file (.LBL)
    pub label: PathBuf,

    /// Raw tile described by the label (.IMG)
    #[arg(long)]
    pub img: Option<PathBuf>,

    /// Keep every Nth row and column when sampling the tile
    #[arg(long, default_value_t = 16)]
    pub step: usize,
}
