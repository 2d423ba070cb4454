//! Shared image handles

use crate::error::{PaintError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// Reference-counted RGBA image
///
/// Cloning is cheap. Style elements and engine asset lists hold handles, so
/// an image lives exactly as long as something that can display it.
#[derive(Clone)]
pub struct ImageHandle {
    pixels: Rc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Rc::new(pixels),
        }
    }

    /// Fully transparent image
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self::new(RgbaImage::new(width, height)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether both handles point at the same image
    pub fn ptr_eq(&self, other: &ImageHandle) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Bicubic resample to `width` x `height`
    pub fn resized(&self, width: u32, height: u32) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self::new(imageops::resize(
            self.pixels.as_ref(),
            width,
            height,
            FilterType::CatmullRom,
        )))
    }

    /// The image turned upside down
    pub fn rotated_180(&self) -> Self {
        Self::new(imageops::rotate180(self.pixels.as_ref()))
    }

    /// Write the image as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(PaintError::from)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

pub(crate) fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PaintError::InvalidSize { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_blank_is_transparent() {
        let image = ImageHandle::blank(4, 2).unwrap();
        assert!(image.pixels().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            ImageHandle::blank(0, 4),
            Err(PaintError::InvalidSize { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_rotate_moves_corner() {
        let mut pixels = RgbaImage::new(3, 2);
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let rotated = ImageHandle::new(pixels).rotated_180();
        assert_eq!(rotated.pixels().get_pixel(2, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(rotated.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_clones_share_pixels() {
        let image = ImageHandle::blank(1, 1).unwrap();
        let copy = image.clone();
        assert!(image.ptr_eq(&copy));
        assert!(!image.ptr_eq(&ImageHandle::blank(1, 1).unwrap()));
    }
}
