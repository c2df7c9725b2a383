//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, CliFilter, CliOutputFormat};
use crate::{
    config::{MergeConfig, OutputFormat, Position},
    filter::ColorFilter,
};
use anyhow::{Context, Result};

/// Convert CLI arguments to a `MergeConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build a `MergeConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<MergeConfig> {
        let filters = cli
            .filters
            .iter()
            .map(|filter| match filter {
                CliFilter::Grayscale => ColorFilter::Grayscale,
                CliFilter::Warm => ColorFilter::WarmTone,
                CliFilter::Cool => ColorFilter::CoolTone,
            })
            .collect();

        let output_format = match cli.format {
            CliOutputFormat::Png => OutputFormat::Png,
            CliOutputFormat::Jpeg => OutputFormat::Jpeg,
        };

        MergeConfig::builder()
            .filters(filters)
            .scale(cli.scale)
            .position(Position::new(cli.position_x, cli.position_y))
            .output_format(output_format)
            .jpeg_quality(cli.jpeg_quality)
            .debug(cli.verbose >= 2)
            .build()
            .context("Invalid configuration")
    }
}
