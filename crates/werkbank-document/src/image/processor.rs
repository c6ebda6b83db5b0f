// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: crop, sharpen, contrast, and upscale. Operates on in-memory
// images using the `image` and `imageproc` crates.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, info, instrument};
use werkbank_core::error::WerkbankError;

/// Blur radius of the smoothed copy that sharpening extrapolates away from.
/// Roughly matches a 3x3 smoothing kernel.
const SMOOTH_SIGMA: f32 = 0.8;

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// ImageProcessor::open("sheet.png")?
///     .crop(20, 8, 192, 192)
///     .sharpen(1.5)
///     .adjust_contrast(1.1)
///     .upscale(2)?
///     .save("day-01.png")?;
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, WerkbankError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            WerkbankError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, WerkbankError> {
        let img = image::load_from_memory(data).map_err(|err| {
            WerkbankError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    #[instrument(skip(self), fields(x, y, width, height))]
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w.saturating_sub(safe_x));
        let safe_h = height.min(img_h.saturating_sub(safe_y));

        debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        Self {
            image: self.image.crop_imm(safe_x, safe_y, safe_w, safe_h),
        }
    }

    /// Sharpen by extrapolating away from a smoothed copy:
    /// `out = smooth + factor * (orig - smooth)`.
    ///
    /// A factor of 1.0 is a no-op, larger values sharpen. The outermost pixel
    /// ring and the alpha channel are left untouched.
    #[instrument(skip(self), fields(factor))]
    pub fn sharpen(self, factor: f32) -> Self {
        let (width, height) = (self.image.width(), self.image.height());
        if (factor - 1.0).abs() < f32::EPSILON || width < 3 || height < 3 {
            return self;
        }
        debug!(factor, "Sharpening image");

        let original = self.image.to_rgba8();
        let smooth: RgbaImage = gaussian_blur_f32(&original, SMOOTH_SIGMA);

        let sharpened = RgbaImage::from_fn(width, height, |x, y| {
            let orig = original.get_pixel(x, y);
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                return *orig;
            }
            let soft = smooth.get_pixel(x, y);
            let blend = |i: usize| -> u8 {
                let s = soft.0[i] as f32;
                let val = s + factor * (orig.0[i] as f32 - s);
                val.round().clamp(0.0, 255.0) as u8
            };
            Rgba([blend(0), blend(1), blend(2), orig.0[3]])
        });

        Self {
            image: DynamicImage::ImageRgba8(sharpened),
        }
    }

    /// Adjust contrast by a factor, pivoting on the image's mean luminance.
    /// Values > 1.0 increase contrast; values < 1.0 decrease it. A value of
    /// 1.0 is a no-op.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        if (factor - 1.0).abs() < f32::EPSILON {
            return self;
        }
        let mean = mean_luminance(&self.image);
        debug!(factor, mean, "Adjusting contrast");

        let rgba = self.image.to_rgba8();
        let contrasted = RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            let adjust = |channel: u8| -> u8 {
                let val = mean + factor * (channel as f32 - mean);
                val.round().clamp(0.0, 255.0) as u8
            };
            Rgba([adjust(r), adjust(g), adjust(b), a])
        });

        Self {
            image: DynamicImage::ImageRgba8(contrasted),
        }
    }

    /// Enlarge by an integer factor using Lanczos3 filtering.
    #[instrument(skip(self), fields(factor))]
    pub fn upscale(self, factor: u32) -> Result<Self, WerkbankError> {
        if factor <= 1 {
            return Ok(self);
        }
        let (w, h) = (self.image.width(), self.image.height());
        let (Some(width), Some(height)) = (w.checked_mul(factor), h.checked_mul(factor)) else {
            return Err(WerkbankError::ImageError(format!(
                "upscaling {w}x{h} by {factor} overflows the image size"
            )));
        };
        debug!(width, height, "Upscaling image");
        Ok(self.resize_exact(width, height))
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Lanczos3);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, WerkbankError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), WerkbankError> {
        self.image.save(path.as_ref()).map_err(|err| {
            WerkbankError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

/// Mean luma of `image`, in 0..=255.
fn mean_luminance(image: &DynamicImage) -> f32 {
    let luma = image.to_luma8();
    let total = luma.width() as u64 * luma.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let sum: u64 = luma.pixels().map(|p| p.0[0] as u64).sum();
    (sum as f64 / total as f64).round() as f32
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, WerkbankError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        WerkbankError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}
