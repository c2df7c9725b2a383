//! Core types for merge operations

use crate::{config::OutputFormat, error::Result};
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The merged image (base with the overlay pasted on)
    pub image: DynamicImage,

    /// Base image dimensions; the merged image always matches these
    pub base_dimensions: (u32, u32),

    /// Overlay dimensions before rescaling
    pub overlay_dimensions: (u32, u32),

    /// Processing metadata
    pub metadata: MergeMetadata,
}

impl MergeResult {
    /// Create a new merge result
    #[must_use]
    pub fn new(
        image: DynamicImage,
        base_dimensions: (u32, u32),
        overlay_dimensions: (u32, u32),
        metadata: MergeMetadata,
    ) -> Self {
        Self {
            image,
            base_dimensions,
            overlay_dimensions,
            metadata,
        }
    }

    /// Save the result as PNG with alpha channel
    ///
    /// # Errors
    /// - File creation or encoding failures
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Save the result as JPEG, flattening the alpha channel
    ///
    /// # Errors
    /// - File creation or encoding failures
    pub fn save_jpeg<P: AsRef<Path>>(&self, path: P, quality: u8) -> Result<()> {
        let rgb_image = self.image.to_rgb8();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            std::fs::File::create(path)?,
            quality,
        );
        encoder.encode_image(&rgb_image)?;
        Ok(())
    }

    /// Save in the specified format
    ///
    /// # Errors
    /// - File creation or encoding failures
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat, quality: u8) -> Result<()> {
        match format {
            OutputFormat::Png => self.save_png(path),
            OutputFormat::Jpeg => self.save_jpeg(path, quality),
        }
    }

    /// Get the image as encoded bytes in the specified format
    ///
    /// # Errors
    /// - Encoding failures
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        match format {
            OutputFormat::Png => {
                self.image.write_to(&mut cursor, image::ImageFormat::Png)?;
            },
            OutputFormat::Jpeg => {
                let rgb_image = self.image.to_rgb8();
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
                encoder.encode_image(&rgb_image)?;
            },
        }
        Ok(buffer)
    }

    /// Get merged image dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Get detailed timing breakdown
    #[must_use]
    pub fn timings(&self) -> &MergeTimings {
        &self.metadata.timings
    }
}

/// Metadata recorded for one merge invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeMetadata {
    /// Name of the segmenter that produced the paste mask
    pub segmenter: String,

    /// Filters applied to the base image, in application order
    pub filters: Vec<String>,

    /// Per-stage timing breakdown
    pub timings: MergeTimings,
}

impl MergeMetadata {
    /// Create metadata for the given segmenter
    #[must_use]
    pub fn new(segmenter: &str) -> Self {
        Self {
            segmenter: segmenter.to_string(),
            filters: Vec::new(),
            timings: MergeTimings::default(),
        }
    }
}

/// Per-stage timings for one merge invocation, in milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeTimings {
    /// Image decode time (zero when inputs arrive pre-decoded)
    pub decode_ms: u64,

    /// Color filter chain time
    pub filter_ms: u64,

    /// Segmentation (background removal) time
    pub segmentation_ms: u64,

    /// Resize and paste time
    pub composite_ms: u64,

    /// End-to-end time
    pub total_ms: u64,
}

impl MergeTimings {
    /// Timing summary for display
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Total: {}ms | Decode: {}ms | Filter: {}ms | Segmentation: {}ms | Composite: {}ms",
            self.total_ms, self.decode_ms, self.filter_ms, self.segmentation_ms, self.composite_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_result() -> MergeResult {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            20,
            10,
            Rgba([1, 2, 3, 255]),
        ));
        MergeResult::new(image, (20, 10), (5, 5), MergeMetadata::new("passthrough"))
    }

    #[test]
    fn test_dimensions_match_image() {
        let result = sample_result();
        assert_eq!(result.dimensions(), (20, 10));
        assert_eq!(result.base_dimensions, (20, 10));
    }

    #[test]
    fn test_to_bytes_png_round_trip() {
        let result = sample_result();
        let bytes = result.to_bytes(OutputFormat::Png, 90).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 20);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn test_timing_summary_mentions_all_stages() {
        let timings = MergeTimings {
            decode_ms: 1,
            filter_ms: 2,
            segmentation_ms: 3,
            composite_ms: 4,
            total_ms: 10,
        };
        let summary = timings.summary();
        assert!(summary.contains("Filter: 2ms"));
        assert!(summary.contains("Segmentation: 3ms"));
    }
}
