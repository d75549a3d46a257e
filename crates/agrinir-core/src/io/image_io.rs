use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3};

use crate::error::{AgrinirError, Result};
use crate::frame::BgrFrame;
use crate::normalize::min_max_to_u8;

/// Load any image the `image` crate can decode as an 8-bit BGR frame.
pub fn load_frame(path: &Path) -> Result<BgrFrame> {
    let rgb = image::open(path)?.to_rgb8();
    let (w, h) = rgb.dimensions();

    let mut data = Array3::<u8>::zeros((h as usize, w as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let (row, col) = (y as usize, x as usize);
        data[[row, col, 0]] = b;
        data[[row, col, 1]] = g;
        data[[row, col, 2]] = r;
    }
    BgrFrame::from_array(data)
}

/// Save a single-channel byte map as 8-bit grayscale PNG.
pub fn save_gray_png(data: &Array2<u8>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in data.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Luma([v]));
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a (height, width, 3) BGR byte array as 8-bit RGB PNG.
pub fn save_bgr_png(data: &Array3<u8>, path: &Path) -> Result<()> {
    let (h, w, c) = data.dim();
    if c != 3 {
        return Err(AgrinirError::shape_mismatch("bgr image", (h, w, 3), (h, w, c)));
    }
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let pixel = Rgb([data[[row, col, 2]], data[[row, col, 1]], data[[row, col, 0]]]);
            img.put_pixel(col as u32, row as u32, pixel);
        }
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a float field min-max stretched to 8-bit grayscale PNG.
pub fn save_field_png(data: &Array2<f32>, path: &Path) -> Result<()> {
    save_gray_png(&min_max_to_u8(data, f32::EPSILON), path)
}
