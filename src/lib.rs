#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

//! # Photomerge
//!
//! A photo-compositing library for pasting a background-removed overlay onto
//! a color-filtered base image.
//!
//! The pipeline is a single synchronous evaluation: the base image runs
//! through an ordered chain of color filters (grayscale, warm-tone,
//! cool-tone), the overlay's background is removed through a pluggable
//! [`Segmenter`] boundary, the result is rescaled and alpha-blended onto a
//! copy of the base at an integer position, and one merged image comes back.
//!
//! ## Features
//!
//! - **Color Filters**: grayscale, warm-tone recolor, cool-tone invert;
//!   combinable in an explicit application order
//! - **Pluggable Segmentation**: background removal behind a single-method
//!   trait, testable with deterministic stubs
//! - **Transparency-Aware Paste**: the overlay's alpha channel is the paste
//!   mask; out-of-bounds placements clip, zero-area rescales are a no-op
//! - **Format Support**: JPEG and PNG decode, PNG-by-default encode to keep
//!   the alpha channel
//! - **CLI Integration**: optional command-line interface (enable with the
//!   `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photomerge::{
//!     merge_images, ColorFilter, MergeConfig, PassthroughSegmenter, Position,
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let base = image::open("background.jpg")?;
//! let overlay = image::open("toy.png")?;
//!
//! let config = MergeConfig::builder()
//!     .filter(ColorFilter::WarmTone)
//!     .scale(0.8)
//!     .position(Position::new(40, 120))
//!     .build()?;
//!
//! let result = merge_images(&base, &overlay, &config, Box::new(PassthroughSegmenter::new()))?;
//! result.save_png("merged_image.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! All core functionality is available by default; the `cli` feature adds
//! the command-line interface and tracing subscriber setup:
//!
//! ```toml
//! [dependencies]
//! photomerge = { version = "0.2", default-features = false }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod filter;
pub mod processor;
pub mod segmentation;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Internal imports for lib functions
use std::time::Instant;
use tokio::io::AsyncRead;

// Public API exports
pub use compositor::composite;
pub use config::{MergeConfig, MergeConfigBuilder, OutputFormat, Position};
pub use error::{MergeError, Result};
pub use filter::{apply_filter, apply_filters, ColorFilter};
pub use processor::MergeProcessor;
pub use segmentation::{PassthroughSegmenter, Segmenter};
pub use services::{ImageIOService, OutputFormatHandler, DEFAULT_OUTPUT_NAME};
pub use types::{MergeMetadata, MergeResult, MergeTimings};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};

/// Merge two pre-loaded images
///
/// This is the most flexible API for in-memory processing: it accepts
/// decoded images and performs no file I/O.
///
/// # Arguments
///
/// * `base` - The background image (receives the filter chain)
/// * `overlay` - The foreground image (receives background removal)
/// * `config` - Filters, scale, position, and output options
/// * `segmenter` - Background removal implementation
///
/// # Errors
/// - Configuration validation failures
/// - Segmentation failures, propagated untransformed
pub fn merge_images(
    base: &image::DynamicImage,
    overlay: &image::DynamicImage,
    config: &MergeConfig,
    segmenter: Box<dyn Segmenter>,
) -> Result<MergeResult> {
    let mut processor = MergeProcessor::new(config.clone(), segmenter)?;
    processor.merge(base, overlay)
}

/// Merge two images provided as encoded bytes
///
/// Accepts raw image data (JPEG or PNG), making it suitable for web servers
/// and memory-based processing where files aren't available.
///
/// # Errors
/// - Decode failures for either input (no merge is attempted)
/// - Everything [`merge_images`] can fail with
pub async fn merge_images_from_bytes(
    base_bytes: &[u8],
    overlay_bytes: &[u8],
    config: &MergeConfig,
    segmenter: Box<dyn Segmenter>,
) -> Result<MergeResult> {
    let decode_start = Instant::now();
    let base = image::load_from_memory(base_bytes).map_err(|e| {
        MergeError::processing(format!("Failed to decode base image from bytes: {}", e))
    })?;
    let overlay = image::load_from_memory(overlay_bytes).map_err(|e| {
        MergeError::processing(format!("Failed to decode overlay image from bytes: {}", e))
    })?;
    let decode_ms = decode_start
        .elapsed()
        .as_millis()
        .try_into()
        .map_err(|_| MergeError::processing("Decode time too large for u64"))?;

    let mut result = merge_images(&base, &overlay, config, segmenter)?;
    result.metadata.timings.decode_ms = decode_ms;
    result.metadata.timings.total_ms += decode_ms;
    Ok(result)
}

/// Merge two images read from async streams
///
/// Accepts any async readable streams, making it suitable for network
/// sources or large files.
///
/// # Errors
/// - Stream read failures
/// - Everything [`merge_images_from_bytes`] can fail with
pub async fn merge_images_from_reader<B, O>(
    mut base_reader: B,
    mut overlay_reader: O,
    config: &MergeConfig,
    segmenter: Box<dyn Segmenter>,
) -> Result<MergeResult>
where
    B: AsyncRead + Unpin,
    O: AsyncRead + Unpin,
{
    let mut base_bytes = Vec::new();
    tokio::io::AsyncReadExt::read_to_end(&mut base_reader, &mut base_bytes)
        .await
        .map_err(|e| MergeError::processing(format!("Failed to read base stream: {}", e)))?;

    let mut overlay_bytes = Vec::new();
    tokio::io::AsyncReadExt::read_to_end(&mut overlay_reader, &mut overlay_bytes)
        .await
        .map_err(|e| MergeError::processing(format!("Failed to read overlay stream: {}", e)))?;

    merge_images_from_bytes(&base_bytes, &overlay_bytes, config, segmenter).await
}
