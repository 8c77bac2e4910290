//! Slideshow video generation

use crate::encoder::{self, EncoderInvocation};
use crate::filter_graph::{format_number, FilterGraph};
use crate::{Result, SlideshowConfig, TimingPlan};
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info};

/// Build the encoder invocation for a slideshow
///
/// The configuration is validated first, so nothing is built for bad
/// parameters or missing images. The result depends only on the
/// configuration and `program`.
pub fn build_invocation(config: &SlideshowConfig, program: &Path) -> Result<EncoderInvocation> {
    config.validate()?;

    let plan = TimingPlan::from_config(config);
    let graph = FilterGraph::build(config, &plan)?;
    debug!(graph = %graph.graph, "built filter graph");

    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-y", "-loglevel", "error"]
        .iter()
        .map(OsString::from)
        .collect();

    for entry in &config.images {
        args.push("-i".into());
        args.push(entry.path.clone().into_os_string());
    }

    args.push("-filter_complex".into());
    args.push(graph.graph.into());
    args.push("-map".into());
    args.push(graph.output_label.into());
    args.push("-r".into());
    args.push(config.fps.to_string().into());
    args.push("-c:v".into());
    args.push(config.video_codec.clone().into());
    args.push("-pix_fmt".into());
    args.push("yuv420p".into());
    args.push(config.output_path.clone().into_os_string());

    Ok(EncoderInvocation {
        program: program.to_path_buf(),
        args,
        output_path: config.output_path.clone(),
        total_duration: plan.total_duration,
    })
}

/// Create a slideshow video from a configuration
///
/// Locates ffmpeg (or uses `ffmpeg_path`), builds the invocation and runs it
/// to completion.
pub fn slideshow(config: &SlideshowConfig, ffmpeg_path: Option<&Path>) -> Result<()> {
    // Validate before looking for the encoder
    config.validate()?;

    let ffmpeg = encoder::find_ffmpeg(ffmpeg_path)?;
    let invocation = build_invocation(config, &ffmpeg)?;

    info!(
        images = config.images.len(),
        duration = %format_number(invocation.total_duration),
        transition = %config.transition,
        "encoding slideshow"
    );

    encoder::run(&invocation)?;

    info!(output = %invocation.output_path.display(), "slideshow created");
    Ok(())
}
