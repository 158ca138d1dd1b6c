//! Pixel data loading for image viewers.
//!
//! Radiology inputs are single-channel by nature; color images are degraded
//! to their first channel with a non-fatal warning so a session can proceed
//! on whatever data the viewer managed to extract.

use ndarray::Array2;

use crate::viewer::ViewerError;

/// Single-channel pixel data held by a viewer, with raw intensity values.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Pixel intensities, row-major `(height, width)`.
    pub pixels: Array2<f32>,
}

impl ImageData {
    /// Wrap an existing pixel array.
    pub fn new(pixels: Array2<f32>) -> Self {
        Self { pixels }
    }

    /// The cleared-viewer placeholder pattern (a small identity matrix).
    pub fn placeholder() -> Self {
        Self {
            pixels: Array2::eye(3),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Mean intensity, used as the default window center.
    pub fn mean(&self) -> f32 {
        self.pixels.mean().unwrap_or(0.0)
    }

    /// Intensity standard deviation, used as the default window width.
    pub fn std(&self) -> f32 {
        if self.pixels.is_empty() {
            0.0
        } else {
            self.pixels.std(0.0)
        }
    }

    /// Minimum intensity value.
    pub fn min(&self) -> f32 {
        self.pixels.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Maximum intensity value.
    pub fn max(&self) -> f32 {
        self.pixels
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

/// Decode encoded image bytes into single-channel pixel data.
///
/// Grayscale inputs are used directly. Color inputs are not fully
/// supported: a warning is logged and only the first channel is kept.
pub fn decode_image_data(bytes: &[u8]) -> Result<ImageData, ViewerError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ViewerError::new(format!("Failed to decode image: {e}")))?;

    let (width, height) = (img.width() as usize, img.height() as usize);

    let pixels = if img.color().has_color() {
        log::warn!("Color images not fully supported, keeping first channel only");
        let rgb = img.to_rgb8();
        let values: Vec<f32> = rgb.pixels().map(|p| f32::from(p[0])).collect();
        Array2::from_shape_vec((height, width), values)
            .map_err(|e| ViewerError::new(format!("Unexpected image shape: {e}")))?
    } else {
        let gray = img.to_luma8();
        let values: Vec<f32> = gray.pixels().map(|p| f32::from(p[0])).collect();
        Array2::from_shape_vec((height, width), values)
            .map_err(|e| ViewerError::new(format!("Unexpected image shape: {e}")))?
    };

    Ok(ImageData::new(pixels))
}
