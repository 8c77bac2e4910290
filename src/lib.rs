//! fadeshow - Ken Burns crossfade slideshows encoded with ffmpeg
//!
//! The library resolves an ordered list of images, plans when each one is on
//! screen, and builds a single ffmpeg invocation whose filter graph zooms,
//! frames and crossfades them into one video.

pub mod encoder;
pub mod error;
pub mod filter_graph;
pub mod image_loader;
pub mod timing;
pub mod transition;

mod slideshow;

pub use encoder::EncoderInvocation;
pub use error::{Error, ErrorKind, Result};
pub use slideshow::{build_invocation, slideshow};
pub use timing::{ClipTiming, TimingPlan};
pub use transition::Transition;

use std::path::PathBuf;

/// Default seconds each image stays on screen
pub const DEFAULT_DURATION_PER_IMAGE: f64 = 3.0;
/// Default output frame rate
pub const DEFAULT_FPS: u32 = 25;
/// Default Ken Burns zoom factor
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.1;
/// Default crossfade length in seconds
pub const DEFAULT_CROSSFADE_DURATION: f64 = 1.0;
/// Default output resolution
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
/// Default video encoder
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Largest zoom the encoder's zoompan filter honours
const MAX_ZOOM_FACTOR: f64 = 10.0;

/// Slack when checking that a duration is a whole number of frames
const FRAME_EPSILON: f64 = 1e-6;

/// Image in presentation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Zero-based position in the slideshow
    pub index: usize,
    /// Path to the image file
    pub path: PathBuf,
}

impl ImageEntry {
    /// Number a list of paths in the order given
    pub fn from_paths<I, P>(paths: I) -> Vec<ImageEntry>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| ImageEntry {
                index,
                path: path.into(),
            })
            .collect()
    }
}

/// Parameters for slideshow creation
#[derive(Debug, Clone)]
pub struct SlideshowConfig {
    /// Images in presentation order
    pub images: Vec<ImageEntry>,
    /// Output file path; the extension selects the container
    pub output_path: PathBuf,
    /// Seconds each image is shown, including its crossfades
    pub duration_per_image: f64,
    /// Output frames per second
    pub fps: u32,
    /// Maximum zoom reached by the Ken Burns effect
    pub zoom_factor: f64,
    /// Border in pixels around each clip
    pub border_size: u32,
    /// Border and letterbox color, e.g. `black` or `0xFFFFFF`
    pub border_color: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Seconds consecutive images overlap
    pub crossfade_duration: f64,
    /// Crossfade style
    pub transition: Transition,
    /// Encoder passed to `-c:v`
    pub video_codec: String,
}

impl SlideshowConfig {
    /// Configuration with default parameters
    pub fn new(images: Vec<ImageEntry>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            images,
            output_path: output_path.into(),
            duration_per_image: DEFAULT_DURATION_PER_IMAGE,
            fps: DEFAULT_FPS,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            border_size: 0,
            border_color: "black".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            crossfade_duration: DEFAULT_CROSSFADE_DURATION,
            transition: Transition::FADE,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
        }
    }

    /// Validate parameters and check that every image exists
    pub fn validate(&self) -> Result<()> {
        self.validate_parameters()?;
        self.validate_images()
    }

    /// Validate everything except the file system
    pub fn validate_parameters(&self) -> Result<()> {
        let d = self.duration_per_image;
        let c = self.crossfade_duration;

        if !d.is_finite() || d <= 0.0 {
            return Err(Error::config(format!(
                "duration per image must be positive, got {}",
                d
            )));
        }
        if !c.is_finite() || c < 0.0 {
            return Err(Error::config(format!(
                "crossfade duration must not be negative, got {}",
                c
            )));
        }
        if c >= d {
            return Err(Error::config(format!(
                "crossfade duration ({}) must be shorter than the duration per image ({})",
                c, d
            )));
        }
        if self.fps == 0 {
            return Err(Error::config("fps must be positive"));
        }
        // Clips are whole frames
        let frames = d * f64::from(self.fps);
        if frames < 0.5 || (frames - frames.round()).abs() > FRAME_EPSILON {
            let nearest = timing::frames_for(d, self.fps) as f64 / f64::from(self.fps);
            return Err(Error::config(format!(
                "duration per image ({}) is not a whole number of frames at {} fps, try {}",
                d, self.fps, nearest
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::config(format!(
                "slideshow size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        // yuv420p needs even dimensions
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(Error::config(format!(
                "slideshow size must be even, got {}x{}",
                self.width, self.height
            )));
        }
        if u64::from(self.border_size) * 2 >= u64::from(self.width.min(self.height)) {
            return Err(Error::config(format!(
                "border size {} leaves no room inside a {}x{} frame",
                self.border_size, self.width, self.height
            )));
        }
        if !self.zoom_factor.is_finite()
            || self.zoom_factor < 1.0
            || self.zoom_factor > MAX_ZOOM_FACTOR
        {
            return Err(Error::config(format!(
                "zoom factor must be between 1 and {}, got {}",
                MAX_ZOOM_FACTOR, self.zoom_factor
            )));
        }
        validate_color(&self.border_color)?;
        if self.video_codec.is_empty() {
            return Err(Error::config("video codec must not be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::config("output path must not be empty"));
        }
        if self.images.is_empty() {
            return Err(Error::config("no images provided"));
        }
        Ok(())
    }

    fn validate_images(&self) -> Result<()> {
        let missing: Vec<PathBuf> = self
            .images
            .iter()
            .filter(|entry| !entry.path.is_file())
            .map(|entry| entry.path.clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing_images(&missing))
        }
    }

    /// Size of the zoomed area inside the border
    pub fn inner_size(&self) -> Result<(u32, u32)> {
        let border = self.border_size.checked_mul(2);
        let inner = |side: u32| border.and_then(|b| side.checked_sub(b)).filter(|s| *s > 0);
        match (inner(self.width), inner(self.height)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(Error::config(format!(
                "border size {} leaves no room inside a {}x{} frame",
                self.border_size, self.width, self.height
            ))),
        }
    }
}

/// Reject colors that would break out of a filter-graph option
fn validate_color(color: &str) -> Result<()> {
    if color.is_empty() {
        return Err(Error::config("border color must not be empty"));
    }
    if let Some(bad) = color
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, ':' | ',' | ';' | '[' | ']' | '\'' | '\\'))
    {
        return Err(Error::config(format!(
            "border color {:?} contains unsupported character {:?}",
            color, bad
        )));
    }
    Ok(())
}
