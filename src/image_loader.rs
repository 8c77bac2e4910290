//! Image discovery and ordering

use crate::{Error, ImageEntry, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use image::ImageReader;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extensions picked up when scanning a directory
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Resolve the slideshow images in presentation order
///
/// With an order file the images are taken from it; otherwise the directory
/// is scanned and sorted by capture time. Every image is probed so that
/// unreadable files are reported before the encoder runs.
pub fn load_images(images_dir: &Path, order_file: Option<&Path>) -> Result<Vec<ImageEntry>> {
    if !images_dir.is_dir() {
        return Err(Error::config(format!(
            "images directory not found: {}",
            images_dir.display()
        )));
    }

    let paths = match order_file {
        Some(order_file) => read_order_file(images_dir, order_file)?,
        None => scan_directory(images_dir)?,
    };

    if paths.is_empty() {
        return Err(Error::config(format!(
            "no images found in {}",
            images_dir.display()
        )));
    }

    for path in &paths {
        let (width, height) = probe_dimensions(path)?;
        debug!(path = %path.display(), width, height, "probed image");
    }

    info!(count = paths.len(), "resolved images");
    Ok(ImageEntry::from_paths(paths))
}

/// Read an order file: one file name per line, relative to `images_dir`
///
/// Blank lines are skipped. Every referenced file must exist; all missing
/// ones are reported together.
pub fn read_order_file(images_dir: &Path, order_file: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(order_file).map_err(|e| {
        Error::config(format!(
            "cannot read order file {}: {}",
            order_file.display(),
            e
        ))
    })?;

    let paths: Vec<PathBuf> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|name| images_dir.join(name))
        .collect();

    let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.is_file()).cloned().collect();
    if !missing.is_empty() {
        return Err(Error::missing_images(&missing));
    }

    Ok(paths)
}

/// List the images in `dir`, oldest capture first
///
/// Capture time comes from EXIF `DateTimeOriginal`, then `DateTime`, then the
/// file modification time. Equal times fall back to file name order.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found: Vec<(NaiveDateTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            let taken = capture_time(&path)?;
            found.push((taken, path));
        }
    }

    found.sort_by(|(a_time, a_path), (b_time, b_path)| {
        a_time
            .cmp(b_time)
            .then_with(|| a_path.file_name().cmp(&b_path.file_name()))
    });

    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// Whether the extension is one of [`IMAGE_EXTENSIONS`], ignoring case
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// When the image was taken, or last modified if it carries no EXIF date
pub fn capture_time(path: &Path) -> Result<NaiveDateTime> {
    if let Some(taken) = exif_capture_time(path) {
        return Ok(taken);
    }
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

fn exif_capture_time(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let exif = match Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no EXIF data");
            return None;
        }
    };

    [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .filter_map(|tag| exif.get_field(tag, In::PRIMARY))
        .find_map(|field| match &field.value {
            Value::Ascii(values) => values.first().and_then(|v| parse_exif_datetime(v)),
            _ => None,
        })
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp
pub fn parse_exif_datetime(ascii: &[u8]) -> Option<NaiveDateTime> {
    let dt = exif::DateTime::from_ascii(ascii).ok()?;
    NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_opt(
            u32::from(dt.hour),
            u32::from(dt.minute),
            u32::from(dt.second),
        )
}

/// Read an image's dimensions without decoding it
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let unreadable = |e: &dyn std::fmt::Display| {
        Error::config(format!("not a readable image: {} ({})", path.display(), e))
    };

    ImageReader::open(path)
        .map_err(|e| unreadable(&e))?
        .with_guessed_format()
        .map_err(|e| unreadable(&e))?
        .into_dimensions()
        .map_err(|e| unreadable(&e))
}
