//! Compositing pipeline: background removal, rescale, alpha-masked paste
//!
//! The compositor never mutates the caller's base image. The base copy is
//! promoted to RGBA before pasting so a filtered (single-channel) base
//! accepts a color overlay; the overlay's own alpha channel is the paste
//! mask, so transparent overlay pixels leave base pixels untouched.

use crate::{
    config::Position,
    error::{MergeError, Result},
    segmentation::Segmenter,
};
use image::{imageops, DynamicImage, RgbaImage};
use log::debug;

/// Resampling filter used for overlay rescaling
const RESIZE_FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// Produce one merged image from a base, an overlay, a scale factor, and a
/// position
///
/// Steps: promote the overlay to four channels, delegate background removal
/// to the segmenter, resize the result by `scale` (dimensions truncated
/// toward zero), then alpha-blend it onto an RGBA copy of the base at
/// `position`. Placements past the base bounds silently clip; a zero-area
/// resize skips the paste entirely.
///
/// # Errors
/// - Segmentation failures, propagated untransformed
/// - Segmenter output with mismatched dimensions
/// - Negative or non-finite scale factor
pub fn composite(
    base: &DynamicImage,
    overlay: &DynamicImage,
    scale: f32,
    position: Position,
    segmenter: &mut dyn Segmenter,
) -> Result<DynamicImage> {
    let overlay_rgba = ensure_rgba(overlay);
    let original_dimensions = overlay_rgba.dimensions();

    let segmented = segmenter.segment(&overlay_rgba)?;
    validate_segmenter_output(original_dimensions, &segmented, segmenter.name())?;

    paste_overlay(base, &segmented, scale, position)
}

/// Convert the overlay to the four-channel layout required for segmentation
///
/// Every decodable mode of the underlying codec converts to RGBA; a file
/// whose mode cannot be represented fails at decode, before this point.
#[must_use]
pub fn ensure_rgba(overlay: &DynamicImage) -> RgbaImage {
    overlay.to_rgba8()
}

/// Check the segmenter honored its same-dimensions contract
pub(crate) fn validate_segmenter_output(
    expected: (u32, u32),
    segmented: &RgbaImage,
    segmenter_name: &str,
) -> Result<()> {
    if segmented.dimensions() != expected {
        return Err(MergeError::segmentation(format!(
            "segmenter '{}' returned {}x{} for a {}x{} overlay",
            segmenter_name,
            segmented.width(),
            segmented.height(),
            expected.0,
            expected.1,
        )));
    }
    Ok(())
}

/// Rescale a segmented overlay and alpha-blend it onto a copy of the base
///
/// # Errors
/// - Negative or non-finite scale factor
pub fn paste_overlay(
    base: &DynamicImage,
    segmented: &RgbaImage,
    scale: f32,
    position: Position,
) -> Result<DynamicImage> {
    let mut merged = base.to_rgba8();

    match scaled_dimensions(segmented.width(), segmented.height(), scale)? {
        Some((target_width, target_height)) => {
            let resized = if (target_width, target_height) == segmented.dimensions() {
                segmented.clone()
            } else {
                imageops::resize(segmented, target_width, target_height, RESIZE_FILTER)
            };
            imageops::overlay(&mut merged, &resized, position.x, position.y);
        },
        None => {
            debug!("overlay scaled to zero area at {}, paste skipped", position);
        },
    }

    Ok(DynamicImage::ImageRgba8(merged))
}

/// Overlay dimensions after scaling, each truncated toward zero
///
/// Returns `None` when either dimension collapses to zero; the caller must
/// treat that as a visual no-op rather than an error.
pub(crate) fn scaled_dimensions(
    width: u32,
    height: u32,
    scale: f32,
) -> Result<Option<(u32, u32)>> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(MergeError::config_value_error(
            "overlay scale",
            scale,
            "finite and >= 0",
            Some(1.0),
        ));
    }

    let target_width = (f64::from(width) * f64::from(scale)) as u32;
    let target_height = (f64::from(height) * f64::from(scale)) as u32;

    if target_width == 0 || target_height == 0 {
        Ok(None)
    } else {
        Ok(Some((target_width, target_height)))
    }
}
