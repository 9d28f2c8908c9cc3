use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::Result;
use crate::frame::Frame;

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let pixels: Vec<u16> = frame
        .data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 65535.0).round() as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in frame.data.indexed_iter() {
        let val = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        img.put_pixel(col as u32, row as u32, Luma([val]));
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save frame, choosing format from file extension.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Saving image");
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(frame, path),
        Some("png") => save_png(frame, path),
        _ => save_tiff(frame, path),
    }
}

/// Load an image file into a single-channel frame.
///
/// Multi-channel images contribute only their first (red) channel.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let frame = frame_from_dynamic(&img);
    debug!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "Loaded image"
    );
    Ok(frame)
}

/// Convert a decoded image into a frame using its first channel.
pub fn frame_from_dynamic(img: &DynamicImage) -> Frame {
    let bit_depth = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) => 8,
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => 8,
        _ => 16,
    };

    let rgba = img.to_rgba16();
    let (w, h) = rgba.dimensions();
    let mut data = Array2::<f64>::zeros((h as usize, w as usize));
    for (col, row, pixel) in rgba.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[0] as f64 / 65535.0;
    }

    Frame::new(data, bit_depth)
}
