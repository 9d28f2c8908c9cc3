mod common;

use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array2;

use deblur_core::frame::Frame;
use deblur_core::io::image_io::{frame_from_dynamic, load_image, save_image};

use common::synthetic_image;

#[test]
fn test_tiff_round_trip_is_16_bit_accurate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tiff");
    let frame = Frame::new(synthetic_image(12, 9), 16);

    save_image(&frame, &path).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.shape(), (12, 9));
    for (a, b) in frame.data.iter().zip(loaded.data.iter()) {
        assert!((a - b).abs() <= 1.0 / 65535.0, "{a} vs {b}");
    }
}

#[test]
fn test_png_round_trip_is_8_bit_accurate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let frame = Frame::new(synthetic_image(5, 7), 8);

    save_image(&frame, &path).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.width(), 7);
    assert_eq!(loaded.height(), 5);
    assert_eq!(loaded.original_bit_depth, 8);
    for (a, b) in frame.data.iter().zip(loaded.data.iter()) {
        assert!((a - b).abs() <= 0.5 / 255.0 + 1e-12, "{a} vs {b}");
    }
}

#[test]
fn test_save_clamps_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clamped.png");
    let data = Array2::from_shape_vec((1, 3), vec![-0.5, 0.5, 1.5]).unwrap();
    save_image(&Frame::new(data, 8), &path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.data[[0, 0]], 0.0);
    assert_eq!(loaded.data[[0, 2]], 1.0);
}

#[test]
fn test_color_image_uses_first_channel() {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    img.put_pixel(1, 1, Rgb([51, 200, 200]));

    let frame = frame_from_dynamic(&DynamicImage::ImageRgb8(img));
    assert_eq!(frame.data[[0, 0]], 1.0);
    assert_eq!(frame.data[[0, 1]], 0.0);
    assert_eq!(frame.data[[1, 0]], 0.0);
    assert!((frame.data[[1, 1]] - 0.2).abs() < 1e-12);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("nope.png")).is_err());
}
