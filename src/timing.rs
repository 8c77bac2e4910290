//! Per-clip timing for crossfaded slideshows

use crate::SlideshowConfig;

/// When one image is on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipTiming {
    /// Position of the image in the slideshow
    pub index: usize,
    /// Seconds from the start of the video
    pub start: f64,
    /// Seconds from the start of the video
    pub end: f64,
    /// Start of the crossfade from the previous clip, `None` for the first clip
    pub fade_in: Option<f64>,
}

/// Timing for every clip of a slideshow
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPlan {
    /// Clips in presentation order
    pub clips: Vec<ClipTiming>,
    /// Length of the finished video in seconds
    pub total_duration: f64,
    /// Frames rendered for each clip
    pub frames_per_clip: u64,
}

impl TimingPlan {
    /// Plan `count` clips of `duration` seconds overlapping by `crossfade` seconds
    ///
    /// Each clip renders `round(duration * fps)` frames (at least one), and
    /// its length on the timeline is that frame count over `fps`, so the
    /// plan always matches what the encoder produces. Clip `i` starts at
    /// `i * (length - crossfade)`; the total is
    /// `count * length - (count - 1) * crossfade`, or zero for no clips.
    /// For a validated configuration `length` equals `duration`.
    pub fn new(count: usize, duration: f64, crossfade: f64, fps: u32) -> Self {
        let frames_per_clip = frames_for(duration, fps);
        let length = clip_length(frames_per_clip, fps);
        let step = length - crossfade;

        let clips = (0..count)
            .map(|index| {
                let start = index as f64 * step;
                ClipTiming {
                    index,
                    start,
                    end: start + length,
                    fade_in: (index > 0).then_some(start),
                }
            })
            .collect();

        let total_duration = match count {
            0 => 0.0,
            n => n as f64 * length - (n - 1) as f64 * crossfade,
        };

        Self {
            clips,
            total_duration,
            frames_per_clip,
        }
    }

    /// Plan a validated configuration
    pub fn from_config(config: &SlideshowConfig) -> Self {
        Self::new(
            config.images.len(),
            config.duration_per_image,
            config.crossfade_duration,
            config.fps,
        )
    }

    /// Seconds each clip lasts once rendered
    pub fn clip_seconds(&self, fps: u32) -> f64 {
        clip_length(self.frames_per_clip, fps)
    }

    /// Start offsets of every clip
    pub fn start_offsets(&self) -> Vec<f64> {
        self.clips.iter().map(|clip| clip.start).collect()
    }
}

/// Frames rendered for a clip of `duration` seconds
pub fn frames_for(duration: f64, fps: u32) -> u64 {
    ((duration * f64::from(fps)).round() as u64).max(1)
}

fn clip_length(frames: u64, fps: u32) -> f64 {
    frames as f64 / f64::from(fps.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_three_clips() {
        let plan = TimingPlan::new(3, 5.0, 1.5, 25);
        let starts = plan.start_offsets();
        assert_eq!(starts.len(), 3);
        assert_close(starts[0], 0.0);
        assert_close(starts[1], 3.5);
        assert_close(starts[2], 7.0);
        assert_close(plan.total_duration, 12.0);
        assert_close(plan.clips[2].end, 12.0);
        assert_eq!(plan.frames_per_clip, 125);
    }

    #[test]
    fn test_single_clip_has_no_crossfade() {
        let plan = TimingPlan::new(1, 4.0, 1.0, 30);
        assert_eq!(plan.clips.len(), 1);
        assert_eq!(plan.clips[0].fade_in, None);
        assert_close(plan.total_duration, 4.0);
    }

    #[test]
    fn test_total_duration_formula() {
        for n in 1..20usize {
            for (d, c) in [(3.0, 1.0), (5.0, 1.5), (2.4, 0.0), (1.0, 0.9)] {
                let plan = TimingPlan::new(n, d, c, 25);
                let expected = n as f64 * d - (n - 1) as f64 * c;
                assert_close(plan.total_duration, expected);
                assert_close(plan.clips.last().unwrap().end, expected);
            }
        }
    }

    #[test]
    fn test_fade_in_marks_overlap() {
        let plan = TimingPlan::new(4, 3.0, 1.0, 25);
        for pair in plan.clips.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert_eq!(next.fade_in, Some(next.start));
            assert_close(prev.end - next.start, 1.0);
        }
    }

    #[test]
    fn test_frames_round_to_nearest() {
        assert_eq!(TimingPlan::new(1, 2.3, 0.0, 10).frames_per_clip, 23);
        assert_eq!(TimingPlan::new(1, 0.01, 0.0, 10).frames_per_clip, 1);
    }

    #[test]
    fn test_clip_length_matches_rendered_frames() {
        // 2.33 s at 10 fps renders 23 frames, i.e. 2.3 s per clip
        let plan = TimingPlan::new(2, 2.33, 1.0, 10);
        assert_eq!(plan.frames_per_clip, 23);
        let rendered = plan.frames_per_clip as f64 / 10.0;
        assert_close(plan.clip_seconds(10), rendered);
        for clip in &plan.clips {
            assert_close(clip.end - clip.start, rendered);
        }
        assert_close(plan.total_duration, 2.0 * rendered - 1.0);
        assert_close(plan.clips[0].end, plan.clips[1].start + 1.0);
    }
}
