//! Image I/O operations service
//!
//! This module separates file I/O operations from business logic,
//! making the system more testable and maintainable.

use crate::{
    config::OutputFormat,
    error::{MergeError, Result},
};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Fixed download filename for merged results
pub const DEFAULT_OUTPUT_NAME: &str = "merged_image.png";

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first, then falls back to
    /// content-based detection for files with misleading extensions.
    ///
    /// # Errors
    /// - File does not exist or cannot be read
    /// - Data is not a decodable raster image
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(MergeError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    MergeError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    let extension = path_ref
                        .extension()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown");

                    MergeError::processing_stage_error(
                        "image loading",
                        &format!(
                            "Failed to load image with both extension-based ({}) and content-based detection. Extension error: {}. Content error: {}",
                            extension, e, content_err
                        ),
                        Some(&format!(
                            "path: {}, size: {} bytes",
                            path_ref.display(),
                            data.len()
                        )),
                    )
                })
            },
        }
    }

    /// Save an image to a file with the specified format
    ///
    /// Creates missing parent directories. PNG keeps the alpha channel;
    /// JPEG flattens it and honors `jpeg_quality`.
    ///
    /// # Errors
    /// - Directory creation or file write failures
    /// - Encoding failures
    pub fn save_image<P: AsRef<Path>>(
        image: &DynamicImage,
        path: P,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MergeError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        match format {
            OutputFormat::Png => image
                .save_with_format(path_ref, image::ImageFormat::Png)
                .map_err(|e| {
                    MergeError::processing_stage_error(
                        "image save",
                        &format!("Failed to save as PNG: {}", e),
                        Some(&format!("path: {}", path_ref.display())),
                    )
                }),
            OutputFormat::Jpeg => {
                let rgb_image = image.to_rgb8();
                let file = std::fs::File::create(path_ref)
                    .map_err(|e| MergeError::file_io_error("create output file", path_ref, &e))?;
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(file, jpeg_quality);
                encoder.encode_image(&rgb_image).map_err(|e| {
                    MergeError::processing_stage_error(
                        "image save",
                        &format!("Failed to save as JPEG: {}", e),
                        Some(&format!("path: {}", path_ref.display())),
                    )
                })
            },
        }
    }

    /// Save an image to a fresh uniquely-named temporary PNG
    ///
    /// Each save gets its own disposable file, never reused; the caller owns
    /// the returned path and is responsible for cleanup.
    ///
    /// # Errors
    /// - Temporary file creation or encoding failures
    pub fn save_temp_png(image: &DynamicImage) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("photomerge-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| MergeError::file_io_error("create temporary file", "tempdir", &e))?;

        let (_, path) = file
            .keep()
            .map_err(|e| MergeError::processing(format!("Failed to persist temporary file: {}", e)))?;

        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }
}
