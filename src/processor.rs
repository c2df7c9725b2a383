//! Unified merge processor
//!
//! This module provides the main `MergeProcessor` that consolidates the
//! filter-then-composite business logic. Each invocation re-derives its
//! output from freshly supplied inputs; the processor holds no image state
//! between calls.

use crate::{
    compositor,
    config::MergeConfig,
    error::{MergeError, Result},
    filter,
    segmentation::Segmenter,
    types::{MergeMetadata, MergeResult, MergeTimings},
};
use image::{DynamicImage, GenericImageView};
use log::{debug, info};
use std::time::Instant;

/// Merge processor that applies the filter chain and the compositor
pub struct MergeProcessor {
    config: MergeConfig,
    segmenter: Box<dyn Segmenter>,
}

impl MergeProcessor {
    /// Create a new processor with the given configuration and segmenter
    ///
    /// # Errors
    /// - Configuration validation failures
    pub fn new(config: MergeConfig, segmenter: Box<dyn Segmenter>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, segmenter })
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge the overlay onto the base image
    ///
    /// Applies the configured filter chain to the base, removes the overlay
    /// background through the segmenter, rescales, and pastes. The caller's
    /// images are never mutated.
    ///
    /// # Errors
    /// - Segmentation failures, propagated untransformed
    /// - Segmenter output with mismatched dimensions
    pub fn merge(&mut self, base: &DynamicImage, overlay: &DynamicImage) -> Result<MergeResult> {
        let total_start = Instant::now();
        let mut timings = MergeTimings::default();

        let base_dimensions = base.dimensions();
        let overlay_dimensions = overlay.dimensions();

        info!(
            "Merging {}x{} overlay onto {}x{} base - Segmenter: {}, Scale: {}, Position: {}",
            overlay_dimensions.0,
            overlay_dimensions.1,
            base_dimensions.0,
            base_dimensions.1,
            self.segmenter.name(),
            self.config.scale,
            self.config.position,
        );

        // 1. Color filter chain on the base
        let filter_start = Instant::now();
        let filtered_base = filter::apply_filters(base.clone(), &self.config.filters);
        timings.filter_ms = elapsed_ms(&filter_start)?;
        debug!(
            "Filter chain ({} filter(s)) completed in {}ms",
            self.config.filters.len(),
            timings.filter_ms
        );

        // 2. Background removal on the overlay
        let overlay_rgba = compositor::ensure_rgba(overlay);
        let segment_start = Instant::now();
        let segmented = self.segmenter.segment(&overlay_rgba)?;
        timings.segmentation_ms = elapsed_ms(&segment_start)?;
        compositor::validate_segmenter_output(
            overlay_dimensions,
            &segmented,
            self.segmenter.name(),
        )?;
        debug!("Segmentation completed in {}ms", timings.segmentation_ms);

        // 3. Rescale and paste onto a copy of the filtered base
        let composite_start = Instant::now();
        let merged = compositor::paste_overlay(
            &filtered_base,
            &segmented,
            self.config.scale,
            self.config.position,
        )?;
        timings.composite_ms = elapsed_ms(&composite_start)?;
        debug!("Composite completed in {}ms", timings.composite_ms);

        timings.total_ms = elapsed_ms(&total_start)?;

        let mut metadata = MergeMetadata::new(self.segmenter.name());
        metadata.filters = self
            .config
            .filters
            .iter()
            .map(ToString::to_string)
            .collect();
        metadata.timings = timings;

        Ok(MergeResult::new(
            merged,
            base_dimensions,
            overlay_dimensions,
            metadata,
        ))
    }
}

/// Elapsed milliseconds since `start`
fn elapsed_ms(start: &Instant) -> Result<u64> {
    start
        .elapsed()
        .as_millis()
        .try_into()
        .map_err(|_| MergeError::processing("Stage time too large for u64"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Position,
        filter::ColorFilter,
        segmentation::test_utils::MockSegmenter,
    };
    use image::{Rgb, RgbImage, Rgba};

    fn gray_base(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([128, 128, 128])))
    }

    fn blue_overlay(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            Rgba([0, 0, 255, 255]),
        ))
    }

    #[test]
    fn test_processor_rejects_invalid_config() {
        let config = MergeConfig {
            scale: -2.0,
            ..Default::default()
        };
        let result = MergeProcessor::new(config, Box::new(MockSegmenter::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_records_metadata_and_timings() {
        let config = MergeConfig::builder()
            .filter(ColorFilter::Grayscale)
            .position(Position::new(5, 5))
            .build()
            .unwrap();
        let mut processor = MergeProcessor::new(config, Box::new(MockSegmenter::new())).unwrap();

        let result = processor.merge(&gray_base(50, 40), &blue_overlay(10, 10)).unwrap();

        assert_eq!(result.base_dimensions, (50, 40));
        assert_eq!(result.overlay_dimensions, (10, 10));
        assert_eq!(result.metadata.segmenter, "mock");
        assert_eq!(result.metadata.filters, vec!["grayscale".to_string()]);
    }

    #[test]
    fn test_merge_applies_filters_before_paste() {
        // grayscale then cool: a 128-gray base becomes 127-gray outside the overlay
        let config = MergeConfig::builder()
            .filter(ColorFilter::Grayscale)
            .filter(ColorFilter::CoolTone)
            .build()
            .unwrap();
        let mut processor = MergeProcessor::new(config, Box::new(MockSegmenter::new())).unwrap();

        let result = processor.merge(&gray_base(60, 60), &blue_overlay(10, 10)).unwrap();
        let rgba = result.image.to_rgba8();

        assert_eq!(rgba.get_pixel(30, 30), &Rgba([127, 127, 127, 255]));
        assert_eq!(rgba.get_pixel(5, 5), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_merge_propagates_segmentation_failure() {
        let config = MergeConfig::default();
        let mut processor =
            MergeProcessor::new(config, Box::new(MockSegmenter::new_failing())).unwrap();

        let result = processor.merge(&gray_base(20, 20), &blue_overlay(5, 5));
        assert!(matches!(result, Err(MergeError::Segmentation(_))));
    }

    #[test]
    fn test_merge_result_dimensions_equal_base() {
        let config = MergeConfig::builder().scale(0.0).build().unwrap();
        let mut processor = MergeProcessor::new(config, Box::new(MockSegmenter::new())).unwrap();

        let result = processor.merge(&gray_base(33, 21), &blue_overlay(10, 10)).unwrap();
        assert_eq!(result.dimensions(), (33, 21));
    }
}
