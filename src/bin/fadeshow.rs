use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use fadeshow::{image_loader, transition::SUPPORTED_TRANSITIONS, SlideshowConfig, Transition};
use tracing_subscriber::EnvFilter;

/// Create a Ken Burns slideshow with crossfade transitions, alternating zoom in/out.
#[derive(Parser, Debug)]
#[command(name = "fadeshow", version)]
struct Args {
    /// Path to the folder of images.
    #[arg(long = "images_dir", required_unless_present = "list_transitions")]
    images_dir: Option<PathBuf>,

    /// Optional text file specifying image order, one file name per line.
    #[arg(long = "order_file")]
    order_file: Option<PathBuf>,

    /// Output video filename; the extension selects the container.
    #[arg(long = "output_file", default_value = "slideshow.mp4")]
    output_file: PathBuf,

    /// Seconds each image is shown.
    #[arg(long = "duration_per_image", default_value_t = fadeshow::DEFAULT_DURATION_PER_IMAGE)]
    duration_per_image: f64,

    /// Output frames per second.
    #[arg(long, default_value_t = fadeshow::DEFAULT_FPS)]
    fps: u32,

    /// Zoom factor for the Ken Burns effect.
    #[arg(long = "zoom_factor", default_value_t = fadeshow::DEFAULT_ZOOM_FACTOR)]
    zoom_factor: f64,

    /// Border in pixels around each clip.
    #[arg(long = "border_size", default_value_t = 0)]
    border_size: u32,

    /// Border color, e.g. 'black' or '0xFFFFFF'.
    #[arg(long = "border_color", default_value = "black")]
    border_color: String,

    /// Final slideshow width.
    #[arg(long = "slideshow_width", default_value_t = fadeshow::DEFAULT_WIDTH)]
    slideshow_width: u32,

    /// Final slideshow height.
    #[arg(long = "slideshow_height", default_value_t = fadeshow::DEFAULT_HEIGHT)]
    slideshow_height: u32,

    /// Duration (seconds) of the crossfade between clips.
    #[arg(long = "crossfade_duration", default_value_t = fadeshow::DEFAULT_CROSSFADE_DURATION)]
    crossfade_duration: f64,

    /// Transition type for xfade (e.g. 'fade', 'wipeleft', 'circlecrop').
    #[arg(long = "crossfade_transition", default_value = "fade")]
    crossfade_transition: String,

    /// Video encoder passed to ffmpeg.
    #[arg(long = "video_codec", default_value = fadeshow::DEFAULT_VIDEO_CODEC)]
    video_codec: String,

    /// Path to the ffmpeg executable (searched on PATH by default).
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Print the ffmpeg command instead of running it.
    #[arg(long = "dry_run")]
    dry_run: bool,

    /// Print the supported transition names and exit.
    #[arg(long = "list_transitions")]
    list_transitions: bool,

    /// Log debug details (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.list_transitions {
        for name in SUPPORTED_TRANSITIONS {
            println!("{}", name);
        }
        return Ok(());
    }

    let images_dir = args
        .images_dir
        .context("--images_dir is required")?;

    // Reject an unknown transition before touching the file system
    let transition: Transition = args.crossfade_transition.parse()?;

    let images = image_loader::load_images(&images_dir, args.order_file.as_deref())
        .with_context(|| format!("collect images from '{}'", images_dir.display()))?;

    let config = SlideshowConfig {
        duration_per_image: args.duration_per_image,
        fps: args.fps,
        zoom_factor: args.zoom_factor,
        border_size: args.border_size,
        border_color: args.border_color,
        width: args.slideshow_width,
        height: args.slideshow_height,
        crossfade_duration: args.crossfade_duration,
        transition,
        video_codec: args.video_codec,
        ..SlideshowConfig::new(images, args.output_file)
    };

    if args.dry_run {
        let program = args.ffmpeg.unwrap_or_else(|| PathBuf::from("ffmpeg"));
        let invocation = fadeshow::build_invocation(&config, &program)?;
        println!("{}", invocation);
        return Ok(());
    }

    fadeshow::slideshow(&config, args.ffmpeg.as_deref())
        .with_context(|| format!("create slideshow '{}'", config.output_path.display()))?;

    println!(
        "Slideshow created with alternating zoom-in/out crossfades: {}",
        config.output_path.display()
    );
    Ok(())
}
