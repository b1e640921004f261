//! Header logo

use crate::config::LayoutConfig;
use crate::constants::{LOGO_MAX_HEIGHT, LOGO_MAX_WIDTH, LOGO_RIGHT_OFFSET};
use image::DynamicImage;
use std::path::Path;

use super::ops::DrawOp;

/// Decoded logo pixels, ready to embed as an image XObject
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub width_px: u32,
    pub height_px: u32,
    /// 8-bit RGB samples, row by row
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples; `None` when the image is fully opaque
    pub alpha: Option<Vec<u8>>,
}

impl Logo {
    /// Read and decode the logo. A missing or unreadable file yields `None`
    /// so the worksheet is still produced without it.
    pub fn load(path: &Path) -> Option<Self> {
        match image::open(path) {
            Ok(image) => Some(Self::from_image(&image)),
            Err(e) => {
                log::warn!("Skipping logo {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();

        let pixel_count = (width_px * height_px) as usize;
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let alpha = if alpha.iter().all(|&a| a == u8::MAX) {
            None
        } else {
            Some(alpha)
        };

        Self {
            width_px,
            height_px,
            rgb,
            alpha,
        }
    }

    /// Placement in the header: scaled down (never up) into the logo box, left
    /// edge a fixed distance from the right page edge, top aligned with the
    /// header band.
    pub fn draw_op(&self, config: &LayoutConfig) -> DrawOp {
        let width = self.width_px.max(1) as f32;
        let height = self.height_px.max(1) as f32;
        let scale = (LOGO_MAX_WIDTH / width)
            .min(LOGO_MAX_HEIGHT / height)
            .min(1.0);
        let draw_width = width * scale;
        let draw_height = height * scale;
        let band_top = config.page_height() - config.margins().top;

        DrawOp::Image {
            x: config.page_width() - LOGO_RIGHT_OFFSET,
            y: band_top - draw_height,
            width: draw_width,
            height: draw_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use image::{Rgba, RgbaImage};

    #[test]
    fn wide_logo_is_scaled_into_box() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(240, 120, Rgba([10, 20, 30, 255])));
        let logo = Logo::from_image(&image);
        assert_eq!(logo.rgb.len(), 240 * 120 * 3);
        assert!(logo.alpha.is_none());

        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        match logo.draw_op(&config) {
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => {
                assert_eq!((width, height), (60.0, 30.0));
                assert_eq!(x, 612.0 - 80.0);
                assert_eq!(y + height, 792.0 - 36.0);
            }
            other => panic!("Expected image, got {:?}", other),
        }
    }

    #[test]
    fn small_logo_is_not_enlarged() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 128])));
        let logo = Logo::from_image(&image);
        assert_eq!(logo.alpha.as_ref().map(Vec::len), Some(200));

        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        match logo.draw_op(&config) {
            DrawOp::Image { width, height, .. } => assert_eq!((width, height), (20.0, 10.0)),
            other => panic!("Expected image, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_skipped() {
        assert!(Logo::load(Path::new("/nonexistent/logo.png")).is_none());
    }
}
