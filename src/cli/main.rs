//! Photo Merge CLI Tool
//!
//! Command-line interface for compositing a background-removed overlay onto
//! a color-filtered base image.

use super::config::CliConfigBuilder;
use crate::{
    processor::MergeProcessor,
    segmentation::PassthroughSegmenter,
    services::{ImageIOService, OutputFormatHandler, DEFAULT_OUTPUT_NAME},
    tracing_config::init_cli_tracing,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Photo merge CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "photomerge")]
pub struct Cli {
    /// Background (base) image file
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Overlay image file whose background is removed before pasting
    #[arg(value_name = "OVERLAY")]
    pub overlay: PathBuf,

    /// Color filter for the base image; repeat to chain filters in order
    #[arg(short = 'F', long = "filter", value_enum, value_name = "FILTER")]
    pub filters: Vec<CliFilter>,

    /// Overlay scale factor (the interactive surface exposes 0.1-2.0)
    #[arg(short, long, default_value_t = 1.0)]
    pub scale: f32,

    /// Overlay horizontal position (top-left corner, pixels)
    #[arg(short = 'x', long = "pos-x", default_value_t = 0)]
    pub position_x: i64,

    /// Overlay vertical position (top-left corner, pixels)
    #[arg(short = 'y', long = "pos-y", default_value_t = 0)]
    pub position_y: i64,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Png)]
    pub format: CliOutputFormat,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 90)]
    pub jpeg_quality: u8,

    /// Print the effective merge configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliFilter {
    /// Single-channel luminance conversion
    Grayscale,
    /// Warm-tone recolor (R x1.1, G x0.9, B x0.7)
    Warm,
    /// Cool-tone full-array invert
    Cool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
}

pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_cli_tracing(cli.verbose).context("Failed to initialize tracing")?;

    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    OutputFormatHandler::validate_for_merge(config.output_format);

    info!("Starting photo merge CLI");
    info!(
        "Base: {}, Overlay: {}, Scale: {}, Position: {}",
        cli.base.display(),
        cli.overlay.display(),
        config.scale,
        config.position
    );

    let base = ImageIOService::load_image(&cli.base)
        .with_context(|| format!("Failed to load base image '{}'", cli.base.display()))?;
    let overlay = ImageIOService::load_image(&cli.overlay)
        .with_context(|| format!("Failed to load overlay image '{}'", cli.overlay.display()))?;

    // Real matting engines plug in through the library's Segmenter trait;
    // the CLI ships with the passthrough implementation for pre-matted overlays.
    let mut processor = MergeProcessor::new(config.clone(), Box::new(PassthroughSegmenter::new()))
        .context("Failed to create merge processor")?;

    let start_time = Instant::now();
    let result = processor
        .merge(&base, &overlay)
        .context("Failed to merge images")?;

    result
        .save(&cli.output, config.output_format, config.jpeg_quality)
        .with_context(|| format!("Failed to save merged image '{}'", cli.output.display()))?;

    info!(
        "Merged {} + {} -> {} in {:.2}s ({})",
        cli.base.display(),
        cli.overlay.display(),
        cli.output.display(),
        start_time.elapsed().as_secs_f64(),
        result.timings().summary()
    );

    Ok(())
}
