//! Mock segmenters for testing compositor and processor behavior
//!
//! These mocks implement the `Segmenter` trait without any real model, with
//! configurable failure modes and call recording for verification in tests.

use crate::{
    error::{MergeError, Result},
    segmentation::Segmenter,
};
use image::RgbaImage;
use std::sync::{Arc, Mutex};

/// Mock segmenter with scriptable behavior
#[derive(Debug, Clone)]
pub struct MockSegmenter {
    /// Alpha value written to every pixel; `None` leaves alpha untouched
    forced_alpha: Option<u8>,
    /// Whether to simulate a segmentation failure
    should_fail: bool,
    /// Whether to return an image with mismatched dimensions
    mismatch_dimensions: bool,
    /// Call count for verification in tests
    call_count: Arc<Mutex<usize>>,
}

impl MockSegmenter {
    /// Create a mock that passes the overlay through unchanged
    #[must_use]
    pub fn new() -> Self {
        Self {
            forced_alpha: None,
            should_fail: false,
            mismatch_dimensions: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that rewrites every alpha value
    #[must_use]
    pub fn with_alpha(alpha: u8) -> Self {
        let mut mock = Self::new();
        mock.forced_alpha = Some(alpha);
        mock
    }

    /// Create a mock that fails on every call
    #[must_use]
    pub fn new_failing() -> Self {
        let mut mock = Self::new();
        mock.should_fail = true;
        mock
    }

    /// Create a mock that violates the same-dimensions contract
    #[must_use]
    pub fn new_mismatched() -> Self {
        let mut mock = Self::new();
        mock.mismatch_dimensions = true;
        mock
    }

    /// Number of times `segment` has been called
    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for MockSegmenter {
    fn segment(&mut self, image: &RgbaImage) -> Result<RgbaImage> {
        *self.call_count.lock().unwrap() += 1;

        if self.should_fail {
            return Err(MergeError::segmentation("mock segmentation failure"));
        }

        if self.mismatch_dimensions {
            return Ok(RgbaImage::new(image.width() + 1, image.height()));
        }

        let mut output = image.clone();
        if let Some(alpha) = self.forced_alpha {
            for pixel in output.pixels_mut() {
                pixel[3] = alpha;
            }
        }
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
