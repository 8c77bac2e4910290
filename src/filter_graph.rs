//! Filter-graph construction for ffmpeg's `-filter_complex`
//!
//! Every image input `[i:v]` becomes a clip `[ci]`: letterboxed into the area
//! inside the border, zoomed with `zoompan`, padded with the border and
//! normalized to square pixels in yuv420p. Consecutive clips are then chained
//! through `xfade`, producing `[x1]`, `[x2]`, ... The last label is what gets
//! mapped to the output.

use crate::{Result, SlideshowConfig, TimingPlan, Transition};

/// A complete filter graph and the label carrying the finished video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGraph {
    /// Segments joined with `;`
    pub graph: String,
    /// Label to pass to `-map`
    pub output_label: String,
}

impl FilterGraph {
    /// Build the graph for a configuration and its timing plan
    ///
    /// The configuration's parameters are validated first.
    pub fn build(config: &SlideshowConfig, plan: &TimingPlan) -> Result<Self> {
        config.validate_parameters()?;

        let mut segments: Vec<String> = (0..plan.clips.len())
            .map(|index| clip_chain(config, index, plan.frames_per_clip))
            .collect::<Result<_>>()?;

        let (crossfades, output_label) =
            crossfade_chain(plan, config.crossfade_duration, config.transition);
        segments.extend(crossfades);

        Ok(Self {
            graph: segments.join(";"),
            output_label,
        })
    }
}

/// Label of the processed clip for image `index`
pub fn clip_label(index: usize) -> String {
    format!("[c{}]", index)
}

/// Zoom at the first and last frame of clip `index`
///
/// Even clips zoom in from 1 to `zoom_factor`, odd clips zoom back out.
pub fn zoom_range(index: usize, zoom_factor: f64) -> (f64, f64) {
    if index % 2 == 0 {
        (1.0, zoom_factor)
    } else {
        (zoom_factor, 1.0)
    }
}

/// Filter chain turning input `[index:v]` into `[c{index}]`
pub fn clip_chain(config: &SlideshowConfig, index: usize, frames: u64) -> Result<String> {
    let (inner_w, inner_h) = config.inner_size()?;
    let color = &config.border_color;
    let (start, end) = zoom_range(index, config.zoom_factor);
    let start = format_number(start);
    let end = format_number(end);

    let mut filters = vec![
        format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease",
            w = inner_w,
            h = inner_h
        ),
        format!(
            "pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:{color}",
            w = inner_w,
            h = inner_h,
            color = color
        ),
        format!(
            "zoompan=z='{start}+({end}-{start})*on/{frames}'\
             :x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)'\
             :d={frames}:s={w}x{h}:fps={fps}",
            start = start,
            end = end,
            frames = frames,
            w = inner_w,
            h = inner_h,
            fps = config.fps
        ),
    ];

    if config.border_size > 0 {
        filters.push(format!(
            "pad={w}:{h}:{b}:{b}:{color}",
            w = config.width,
            h = config.height,
            b = config.border_size,
            color = color
        ));
    }

    filters.push("setsar=1".to_string());
    filters.push("format=yuv420p".to_string());

    Ok(format!(
        "[{}:v]{}{}",
        index,
        filters.join(","),
        clip_label(index)
    ))
}

/// `xfade` segments chaining every clip, plus the final label
///
/// A single clip needs no crossfade and is mapped directly.
pub fn crossfade_chain(
    plan: &TimingPlan,
    crossfade: f64,
    transition: Transition,
) -> (Vec<String>, String) {
    let mut segments = Vec::new();
    let mut current = clip_label(0);

    for clip in plan.clips.iter().skip(1) {
        let offset = clip.fade_in.unwrap_or(clip.start);
        let out = format!("[x{}]", clip.index);
        segments.push(format!(
            "{prev}{next}xfade=transition={transition}:duration={duration}:offset={offset}{out}",
            prev = current,
            next = clip_label(clip.index),
            transition = transition,
            duration = format_number(crossfade),
            offset = format_number(offset),
            out = out
        ));
        current = out;
    }

    (segments, current)
}

/// Render seconds or zoom values for the graph
///
/// Uses the shortest representation that parses back to the same value, so
/// no precision is lost and equal inputs give equal text.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
