//! Common test utilities

#![allow(dead_code)]

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Generate a test image with a solid color and a subtle gradient
pub fn generate_test_image(width: u32, height: u32, base_color: [u8; 4]) -> RgbaImage {
    let mut img = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = base_color[0].saturating_add((x % 50) as u8);
        let g = base_color[1].saturating_add((y % 50) as u8);
        *pixel = Rgba([r, g, base_color[2], base_color[3]]);
    }

    img
}

/// Generate a numbered test image (distinct color per slide)
pub fn generate_numbered_image(width: u32, height: u32, number: u32) -> RgbaImage {
    let colors = [
        [255, 100, 100, 255], // Red-ish
        [100, 255, 100, 255], // Green-ish
        [100, 100, 255, 255], // Blue-ish
        [255, 255, 100, 255], // Yellow-ish
    ];

    let color = colors[(number as usize) % colors.len()];
    generate_test_image(width, height, color)
}

/// Save a test image as JPEG
pub fn save_jpeg<P: AsRef<Path>>(img: &RgbaImage, path: P, quality: u8) -> std::io::Result<()> {
    let rgb_img: image::RgbImage = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();

    let file = std::fs::File::create(path)?;
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, quality);
    encoder.encode_image(&rgb_img).map_err(std::io::Error::other)?;

    Ok(())
}

/// Save a test image as JPEG carrying an EXIF `DateTimeOriginal`
///
/// `taken` uses the EXIF `YYYY:MM:DD HH:MM:SS` layout.
pub fn save_jpeg_with_exif_date<P: AsRef<Path>>(
    img: &RgbaImage,
    path: P,
    taken: &str,
) -> std::io::Result<()> {
    assert_eq!(taken.len(), 19, "EXIF timestamps are 19 characters");

    // Little-endian TIFF: IFD0 at 8 points to the Exif IFD at 26, whose
    // single DateTimeOriginal entry stores its text at 44
    let mut tiff: Vec<u8> = b"II\x2a\x00".to_vec();
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&20u32.to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(taken.as_bytes());
    tiff.push(0);

    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let rgb_img: image::RgbImage = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut encoded = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, 85)
        .encode_image(&rgb_img)
        .map_err(std::io::Error::other)?;

    // APP1 goes right after the SOI marker
    let mut jpeg = encoded[..2].to_vec();
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&encoded[2..]);
    std::fs::write(path, jpeg)
}

/// Save a test image as PNG
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P) -> std::io::Result<()> {
    img.save(path).map_err(std::io::Error::other)
}

/// Write numbered PNG slides named `names` into `dir`
pub fn write_slides(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = dir.join(name);
            let img = generate_numbered_image(64, 48, i as u32);
            if name.ends_with(".png") {
                save_png(&img, &path).unwrap();
            } else {
                save_jpeg(&img, &path, 85).unwrap();
            }
            path
        })
        .collect()
}

/// Write an order file listing `names`
pub fn write_order_file(path: &Path, names: &[&str]) {
    std::fs::write(path, names.join("\n") + "\n").unwrap();
}

/// Verify that a file exists and has non-zero size
pub fn verify_file_exists_with_size<P: AsRef<Path>>(path: P) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len() > 0,
        Err(_) => false,
    }
}

/// Parse MP4 header to verify it's a valid MP4 file
pub fn verify_mp4_header<P: AsRef<Path>>(path: P) -> bool {
    use std::io::Read;

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut header = [0u8; 12];
    if file.read_exact(&mut header).is_err() {
        return false;
    }

    // MP4 files have 'ftyp' box at offset 4
    &header[4..8] == b"ftyp"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_test_image() {
        let img = generate_test_image(100, 100, [255, 0, 0, 255]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 100);
    }

    #[test]
    fn test_write_slides() {
        let temp_dir = TempDir::new().unwrap();
        let paths = write_slides(temp_dir.path(), &["a.jpg", "b.png"]);

        assert!(paths.iter().all(verify_file_exists_with_size));
    }
}
