//! Color filter transforms for the base image
//!
//! Each filter is a pure function from an input image to a new image. Filters
//! combine: `apply_filters` folds an explicit ordered list, each filter
//! running on the output of the previous one, so grayscale-then-cool inverts
//! a single luminance channel while cool alone inverts the full color layout.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-channel gain applied by the warm-tone filter (R, G, B)
const WARM_CHANNEL_GAIN: [f64; 3] = [1.1, 0.9, 0.7];

/// Whole-image color transforms selectable for the base image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFilter {
    /// Convert to single-channel luminance
    Grayscale,
    /// Scale R/G/B by 1.1/0.9/0.7 with 8-bit wrap-around
    WarmTone,
    /// Bitwise complement of the full pixel array
    CoolTone,
}

impl std::fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grayscale => write!(f, "grayscale"),
            Self::WarmTone => write!(f, "warm"),
            Self::CoolTone => write!(f, "cool"),
        }
    }
}

/// Apply an ordered chain of filters to an image
///
/// The list is folded in order; an empty list returns the input unchanged.
#[must_use]
pub fn apply_filters(image: DynamicImage, filters: &[ColorFilter]) -> DynamicImage {
    filters
        .iter()
        .fold(image, |current, filter| apply_filter(current, *filter))
}

/// Apply a single filter to an image
#[must_use]
pub fn apply_filter(image: DynamicImage, filter: ColorFilter) -> DynamicImage {
    let (width, height) = image.dimensions();
    debug!(filter = %filter, width, height, "applying color filter");
    match filter {
        ColorFilter::Grayscale => grayscale(&image),
        ColorFilter::WarmTone => warm_tone(&image),
        ColorFilter::CoolTone => cool_tone(image),
    }
}

/// Convert to single-channel luminance, preserving dimensions
fn grayscale(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Recolor toward warm tones by scaling each RGB channel
///
/// The image is first brought to a three-channel layout, then every channel
/// value is multiplied by its gain, truncated toward zero, and wrapped modulo
/// 256 (see DESIGN.md for the wrap-vs-saturate decision).
fn warm_tone(image: &DynamicImage) -> DynamicImage {
    let rgb_image = image.to_rgb8();
    let (width, height) = rgb_image.dimensions();
    let mut recolored = ImageBuffer::new(width, height);

    for (x, y, pixel) in rgb_image.enumerate_pixels() {
        recolored.put_pixel(
            x,
            y,
            Rgb([
                scale_channel(pixel[0], WARM_CHANNEL_GAIN[0]),
                scale_channel(pixel[1], WARM_CHANNEL_GAIN[1]),
                scale_channel(pixel[2], WARM_CHANNEL_GAIN[2]),
            ]),
        );
    }

    DynamicImage::ImageRgb8(recolored)
}

/// 8-bit channel gain: truncate the product toward zero, wrap modulo 256
fn scale_channel(value: u8, gain: f64) -> u8 {
    ((f64::from(value) * gain) as u32 % 256) as u8
}

/// Bitwise complement (255 - v) over the full pixel array
///
/// Operates on whatever channel layout the image currently has, alpha
/// included when present. Layouts wider than 8 bits are brought down to
/// 8-bit RGBA first.
fn cool_tone(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(mut buffer) => {
            complement(&mut buffer);
            DynamicImage::ImageLuma8(buffer)
        },
        DynamicImage::ImageLumaA8(mut buffer) => {
            complement(&mut buffer);
            DynamicImage::ImageLumaA8(buffer)
        },
        DynamicImage::ImageRgb8(mut buffer) => {
            complement(&mut buffer);
            DynamicImage::ImageRgb8(buffer)
        },
        DynamicImage::ImageRgba8(mut buffer) => {
            complement(&mut buffer);
            DynamicImage::ImageRgba8(buffer)
        },
        other => {
            let mut buffer = other.to_rgba8();
            complement(&mut buffer);
            DynamicImage::ImageRgba8(buffer)
        },
    }
}

/// Complement every subpixel of an 8-bit buffer in place
fn complement<P: Pixel<Subpixel = u8>>(buffer: &mut ImageBuffer<P, Vec<u8>>) {
    for value in buffer.iter_mut() {
        *value = 255 - *value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_grayscale_single_channel_same_dimensions() {
        let image = solid_rgb(64, 48, [10, 200, 30]);
        let gray = apply_filter(image, ColorFilter::Grayscale);

        assert_eq!(gray.dimensions(), (64, 48));
        assert_eq!(gray.color().channel_count(), 1);
    }

    #[test]
    fn test_warm_tone_scales_channels() {
        let image = solid_rgb(4, 4, [100, 100, 100]);
        let warm = apply_filter(image, ColorFilter::WarmTone);

        match warm {
            DynamicImage::ImageRgb8(buffer) => {
                assert_eq!(buffer.get_pixel(0, 0), &Rgb([110, 90, 70]));
            },
            _ => panic!("Expected RGB8 output from warm-tone filter"),
        }
    }

    #[test]
    fn test_warm_tone_wraps_at_channel_boundary() {
        // 250 * 1.1 = 275.0, truncated to 275, wrapped to 19
        let image = solid_rgb(2, 2, [250, 0, 0]);
        let warm = apply_filter(image, ColorFilter::WarmTone);

        match warm {
            DynamicImage::ImageRgb8(buffer) => {
                assert_eq!(buffer.get_pixel(0, 0), &Rgb([19, 0, 0]));
            },
            _ => panic!("Expected RGB8 output from warm-tone filter"),
        }
    }

    #[test]
    fn test_warm_tone_promotes_luma_input() {
        let image = DynamicImage::new_luma8(8, 8);
        let warm = apply_filter(image, ColorFilter::WarmTone);
        assert_eq!(warm.color().channel_count(), 3);
    }

    #[test]
    fn test_cool_tone_is_self_inverse() {
        let mut buffer = ImageBuffer::new(3, 3);
        for (x, y, pixel) in buffer.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 40) as u8, (y * 70) as u8, 200]);
        }
        let image = DynamicImage::ImageRgb8(buffer);

        let twice = apply_filter(
            apply_filter(image.clone(), ColorFilter::CoolTone),
            ColorFilter::CoolTone,
        );
        assert_eq!(image.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn test_cool_tone_inverts_alpha_channel() {
        let buffer = ImageBuffer::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let inverted = apply_filter(DynamicImage::ImageRgba8(buffer), ColorFilter::CoolTone);

        match inverted {
            DynamicImage::ImageRgba8(out) => {
                assert_eq!(out.get_pixel(0, 0), &Rgba([245, 235, 225, 0]));
            },
            _ => panic!("Expected RGBA8 output from cool-tone filter"),
        }
    }

    #[test]
    fn test_filters_fold_in_order() {
        // grayscale first leaves cool-tone a single channel to invert
        let image = solid_rgb(2, 2, [128, 128, 128]);
        let chained = apply_filters(image, &[ColorFilter::Grayscale, ColorFilter::CoolTone]);

        assert_eq!(chained.color().channel_count(), 1);
        match chained {
            DynamicImage::ImageLuma8(buffer) => {
                assert_eq!(buffer.get_pixel(0, 0).0, [127]);
            },
            _ => panic!("Expected luma output from grayscale-then-cool chain"),
        }
    }

    #[test]
    fn test_empty_filter_list_is_identity() {
        let image = solid_rgb(5, 5, [1, 2, 3]);
        let unchanged = apply_filters(image.clone(), &[]);
        assert_eq!(image.as_bytes(), unchanged.as_bytes());
    }
}
