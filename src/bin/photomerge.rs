//! Photo Merge CLI Tool
//!
//! Command-line interface for compositing a background-removed overlay onto
//! a color-filtered base image using the photomerge library.

use photomerge::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}
