//! Configuration types for merge operations

use crate::filter::ColorFilter;
use serde::{Deserialize, Serialize};

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha dropped on save)
    Jpeg,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// Top-left corner of the overlay placement, in base-image coordinates
///
/// No validity invariant is enforced: coordinates may run past the base
/// bounds, in which case the paste silently clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset in pixels
    pub x: i64,
    /// Vertical offset in pixels
    pub y: i64,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Configuration for merge operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Color filters for the base image, applied in list order
    pub filters: Vec<ColorFilter>,

    /// Overlay scale factor; width and height are each multiplied by this
    /// and truncated toward zero. Zero is legal and yields a skipped paste.
    pub scale: f32,

    /// Overlay placement within the base image
    pub position: Position,

    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// Enable debug mode (additional logging)
    pub debug: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            scale: 1.0,
            position: Position::default(),
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            debug: false,
        }
    }
}

impl MergeConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use photomerge::{ColorFilter, MergeConfig, Position};
    ///
    /// let config = MergeConfig::builder()
    ///     .filter(ColorFilter::Grayscale)
    ///     .scale(0.5)
    ///     .position(Position::new(10, 10))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> MergeConfigBuilder {
        MergeConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Validation Rules
    ///
    /// - Scale: finite and non-negative (0 is a legal degenerate value)
    /// - JPEG quality: 0-100 (inclusive)
    ///
    /// # Errors
    /// - Negative, NaN, or infinite scale factor
    /// - Invalid JPEG quality value (must be 0-100)
    pub fn validate(&self) -> crate::Result<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(crate::error::MergeError::config_value_error(
                "overlay scale",
                self.scale,
                "finite and >= 0",
                Some(1.0),
            ));
        }

        if self.jpeg_quality > 100 {
            return Err(crate::error::MergeError::config_value_error(
                "JPEG quality",
                self.jpeg_quality,
                "0-100",
                Some(90),
            ));
        }

        Ok(())
    }
}

/// Builder for `MergeConfig`
#[derive(Debug, Default)]
pub struct MergeConfigBuilder {
    config: MergeConfig,
}

impl MergeConfigBuilder {
    /// Append a single filter to the chain
    #[must_use]
    pub fn filter(mut self, filter: ColorFilter) -> Self {
        self.config.filters.push(filter);
        self
    }

    /// Replace the full filter chain
    #[must_use]
    pub fn filters(mut self, filters: Vec<ColorFilter>) -> Self {
        self.config.filters = filters;
        self
    }

    /// Set the overlay scale factor
    #[must_use]
    pub fn scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    /// Set the overlay placement
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.config.position = position;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Set the JPEG quality
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    /// Enable or disable debug mode
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the configuration, validating at build time
    ///
    /// # Errors
    /// - Negative, NaN, or infinite scale factor
    /// - Invalid JPEG quality value (must be 0-100)
    pub fn build(self) -> crate::Result<MergeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
