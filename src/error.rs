//! Error types for merge operations

use thiserror::Error;

/// Result type alias for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Error types for photo merge operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image format or codec errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Background removal failures, propagated untransformed from the segmenter
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel processing errors
    #[error("Processing error: {0}")]
    Processing(String),
}

impl MergeError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new segmentation error
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }

    /// Create processing error with stage context
    pub fn processing_stage_error(stage: &str, details: &str, input_info: Option<&str>) -> Self {
        let input_context = match input_info {
            Some(info) => format!(" (input: {})", info),
            None => String::new(),
        };

        Self::Processing(format!(
            "Processing failed at stage '{}'{}: {}",
            stage, input_context, details
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = MergeError::invalid_config("test config error");
        assert!(matches!(err, MergeError::InvalidConfig(_)));

        let err = MergeError::segmentation("model unavailable");
        assert!(matches!(err, MergeError::Segmentation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = MergeError::invalid_config("Invalid scale factor");
        assert_eq!(err.to_string(), "Invalid configuration: Invalid scale factor");
    }

    #[test]
    fn test_contextual_errors() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = MergeError::file_io_error("read base image", Path::new("/tmp/base.png"), &io_error);
        let error_string = err.to_string();
        assert!(error_string.contains("read base image"));
        assert!(error_string.contains("/tmp/base.png"));

        let err = MergeError::config_value_error("overlay scale", -1.0, "finite and >= 0", Some(1.0));
        let error_string = err.to_string();
        assert!(error_string.contains("overlay scale"));
        assert!(error_string.contains("-1"));
        assert!(error_string.contains("Recommended: 1"));

        let err = MergeError::processing_stage_error("paste", "layout mismatch", Some("200x100 luma8"));
        let error_string = err.to_string();
        assert!(error_string.contains("paste"));
        assert!(error_string.contains("200x100 luma8"));
    }
}
