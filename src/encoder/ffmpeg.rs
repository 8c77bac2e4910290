//! Running the ffmpeg executable

use super::EncoderInvocation;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Lines of encoder stderr kept in an encoding error
const STDERR_TAIL_LINES: usize = 20;

/// Find ffmpeg executable
pub fn find_ffmpeg(custom_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::Ffmpeg(format!(
            "FFmpeg not found at: {}",
            path.display()
        )));
    }

    // Try to find ffmpeg in PATH
    let paths = ["ffmpeg", "/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg"];

    for path in paths {
        if responds_to_version(Path::new(path)) {
            return Ok(PathBuf::from(path));
        }
    }

    Err(Error::Ffmpeg("FFmpeg not found in PATH".to_string()))
}

/// Whether an `ffmpeg` on PATH runs
pub fn is_ffmpeg_on_path() -> bool {
    responds_to_version(Path::new("ffmpeg"))
}

fn responds_to_version(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Check that ffmpeg provides the filters and encoder a slideshow needs
pub fn check_available(ffmpeg: &Path, video_codec: &str) -> Result<()> {
    let filters = Command::new(ffmpeg)
        .args(["-hide_banner", "-filters"])
        .output()
        .map_err(|e| Error::Ffmpeg(format!("Failed to run ffmpeg: {}", e)))?;
    let filters = String::from_utf8_lossy(&filters.stdout);
    for needed in ["zoompan", "xfade"] {
        if !filters.contains(needed) {
            return Err(Error::Ffmpeg(format!(
                "FFmpeg does not provide the {} filter",
                needed
            )));
        }
    }

    let encoders = Command::new(ffmpeg)
        .args(["-hide_banner", "-encoders"])
        .output()
        .map_err(|e| Error::Ffmpeg(format!("Failed to run ffmpeg: {}", e)))?;
    if String::from_utf8_lossy(&encoders.stdout).contains(video_codec) {
        Ok(())
    } else {
        Err(Error::Ffmpeg(format!(
            "FFmpeg does not have {} support",
            video_codec
        )))
    }
}

/// Run an invocation to completion
///
/// Stdout is discarded and stderr captured; a non-zero exit becomes
/// [`Error::Encoding`] carrying the tail of stderr.
pub fn run(invocation: &EncoderInvocation) -> Result<()> {
    if let Some(parent) = invocation.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!(
        program = %invocation.program.display(),
        output = %invocation.output_path.display(),
        "running encoder"
    );

    let output = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            Error::Ffmpeg(format!(
                "Failed to start {}: {}",
                invocation.program.display(),
                e
            ))
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!(stderr = %stderr.trim_end(), "encoder stderr");
    }

    if output.status.success() {
        Ok(())
    } else {
        Err(Error::Encoding {
            code: output.status.code(),
            stderr: stderr_tail(&stderr),
        })
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
