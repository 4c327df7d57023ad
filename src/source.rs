// Loads the calibration image and converts it into a buffer suitable for the window.
// After `load_fitted()` you get a FrameBuffer sized to fit the screen,
// where each pixel is 0x00RRGGBB, ready to push to the window.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::Error;
use crate::screen::ScreenSize;
use crate::types::FrameBuffer;

/// Decode any format the `image` crate understands into RGB8.
pub fn load_image(path: &Path) -> Result<RgbImage, Error> {
    let img = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    Ok(img.to_rgb8())
}

/// Largest size that fits `screen` with `reserve` of its height kept free
/// (taskbar), keeping the aspect ratio. Scales up as well as down.
pub fn fit_to_screen(width: u32, height: u32, screen: ScreenSize, reserve: f64) -> (u32, u32) {
    let x_scale = f64::from(screen.width) / f64::from(width);
    let y_scale = f64::from(screen.height) * (1.0 - reserve) / f64::from(height);
    let scale = x_scale.min(y_scale);

    // truncate like an integer cast, never collapse to zero
    let w = ((f64::from(width) * scale) as u32).max(1);
    let h = ((f64::from(height) * scale) as u32).max(1);
    (w, h)
}

/// Pack an RGB image as 0x00RRGGBB pixels.
pub fn to_frame_buffer(img: &RgbImage) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for pixel in img.pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        out.push((r << 16) | (g << 8) | b);
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}

/// Load `path`, resize it to fit `screen`, and pack it for display.
pub fn load_fitted(path: &Path, screen: ScreenSize, reserve: f64) -> Result<FrameBuffer, Error> {
    let img = load_image(path)?;
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::ImageLoad(format!("{}: image is empty", path.display())));
    }

    let (fw, fh) = fit_to_screen(w, h, screen, reserve);
    log::info!("loaded {} ({w}x{h}), showing at {fw}x{fh}", path.display());

    let fitted = if (fw, fh) == (w, h) {
        img
    } else {
        imageops::resize(&img, fw, fh, FilterType::Triangle)
    };
    Ok(to_frame_buffer(&fitted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn wide_image_fits_full_hd_with_taskbar_reserve() {
        let screen = ScreenSize { width: 1920, height: 1080 };
        let (w, h) = fit_to_screen(2000, 1000, screen, 0.1);

        assert!(w <= 1920);
        assert!(f64::from(h) <= 1080.0 * 0.9);
        assert_eq!((w, h), (1920, 960));
    }

    #[test]
    fn tall_image_is_limited_by_reduced_height() {
        let screen = ScreenSize { width: 1920, height: 1080 };
        let (w, h) = fit_to_screen(1000, 2000, screen, 0.1);
        assert_eq!((w, h), (486, 972));
    }

    #[test]
    fn small_image_scales_up() {
        let screen = ScreenSize { width: 800, height: 1000 };
        assert_eq!(fit_to_screen(100, 50, screen, 0.1), (800, 400));
    }

    #[test]
    fn never_collapses_to_zero() {
        let screen = ScreenSize { width: 10, height: 10 };
        let (w, h) = fit_to_screen(10_000, 1, screen, 0.0);
        assert_eq!((w, h), (10, 1));
    }

    #[test]
    fn packs_pixels_row_major() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(1, 0, Rgb([255, 0, 128]));
        let fb = to_frame_buffer(&img);
        assert_eq!((fb.width, fb.height), (2, 1));
        assert_eq!(fb.pixels, vec![0x0001_0203, 0x00FF_0080]);
    }

    #[test]
    fn missing_file_is_an_image_load_error() {
        let screen = ScreenSize { width: 100, height: 100 };
        let err = load_fitted(Path::new("no/such/image.png"), screen, 0.1).unwrap_err();
        assert!(matches!(err, Error::ImageLoad(_)));
    }
}
