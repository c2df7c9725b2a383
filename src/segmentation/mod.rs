//! Segmentation boundary for overlay background removal
//!
//! Background removal is delegated to an external collaborator behind a
//! single-method capability trait, so the compositor can be exercised with a
//! deterministic stub instead of a real model. The crate ships only the
//! passthrough implementation; real matting engines plug in from outside.

pub mod passthrough;

// Test utilities for segmentation testing
#[cfg(test)]
pub mod test_utils;

pub use self::passthrough::PassthroughSegmenter;

use crate::error::Result;
use image::RgbaImage;

/// Capability interface for background removal
///
/// The input is always four-channel; implementations must return a
/// four-channel image of identical dimensions with a recomputed alpha
/// channel isolating the foreground subject. Failures are propagated to the
/// caller as-is, with no local retry.
pub trait Segmenter {
    /// Recompute the alpha channel so non-subject pixels become transparent
    ///
    /// # Errors
    /// - Model or service failures inside the implementation
    fn segment(&mut self, image: &RgbaImage) -> Result<RgbaImage>;

    /// Short identifier used in logs and error messages
    fn name(&self) -> &'static str;
}
