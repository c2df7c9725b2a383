//! Identity segmenter for pre-matted overlays

use crate::{error::Result, segmentation::Segmenter};
use image::RgbaImage;
use tracing::debug;

/// Segmenter that returns the overlay unchanged
///
/// Useful when the overlay already carries the intended alpha channel (a
/// pre-matted PNG) and for deterministic tests. The alpha channel is passed
/// through as-is; fully opaque inputs stay fully opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSegmenter;

impl PassthroughSegmenter {
    /// Create a new passthrough segmenter
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for PassthroughSegmenter {
    fn segment(&mut self, image: &RgbaImage) -> Result<RgbaImage> {
        debug!(
            width = image.width(),
            height = image.height(),
            "passthrough segmentation, alpha channel unchanged"
        );
        Ok(image.clone())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_passthrough_returns_input_unchanged() {
        let input = RgbaImage::from_pixel(7, 5, Rgba([9, 8, 7, 120]));
        let mut segmenter = PassthroughSegmenter::new();

        let output = segmenter.segment(&input).unwrap();
        assert_eq!(output, input);
        assert_eq!(segmenter.name(), "passthrough");
    }
}
