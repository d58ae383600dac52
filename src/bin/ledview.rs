use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use ledview::{
    CaptureController, EncodeConfig, FrameRenderer, Rgb8, RenderOpts, SharedCapture, SpriteTinter,
    export_status, layout_from_path,
};

#[derive(Parser, Debug)]
#[command(name = "ledview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single color frame as a PNG.
    Frame(FrameArgs),
    /// Render a color-frame sequence and export an animated GIF.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Detector layout map JSON (array of {id, x, y}).
    #[arg(long)]
    layout: PathBuf,

    /// Optional sprite image (PNG); defaults to a generated radial glow.
    #[arg(long)]
    sprite: Option<PathBuf>,

    /// Generated sprite size in pixels (ignored with --sprite).
    #[arg(long, default_value_t = 20)]
    sprite_size: u32,

    /// Longest canvas dimension in pixels.
    #[arg(long, default_value_t = ledview::DEFAULT_MAX_CANVAS_DIM)]
    max_dim: u32,

    /// Minimum rendered brightness for an off light (0-255).
    #[arg(long, default_value_t = ledview::DEFAULT_BRIGHTNESS_FLOOR)]
    floor: u8,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Color frame JSON: array of [r, g, b] triples, one per light.
    #[arg(long)]
    colors: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Color-frame sequence JSON: array of frames, each an array of [r, g, b].
    #[arg(long)]
    frames: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Playback rate used to derive frame timestamps.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Encoder worker-pool size.
    #[arg(long, default_value_t = ledview::DEFAULT_ENCODE_WORKERS)]
    workers: usize,

    /// Quantization speed (1-30; lower is higher fidelity).
    #[arg(long, default_value_t = 10)]
    speed: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn build_renderer(common: &CommonArgs) -> anyhow::Result<FrameRenderer> {
    let tinter = match &common.sprite {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read sprite '{}'", path.display()))?;
            SpriteTinter::from_image_bytes(&bytes, common.floor)?
        }
        None => SpriteTinter::radial(common.sprite_size, common.floor),
    };

    let mut renderer = FrameRenderer::new(
        tinter,
        RenderOpts {
            max_canvas_dim: common.max_dim,
        },
    );
    renderer.set_layout(layout_from_path(&common.layout)?)?;
    Ok(renderer)
}

fn read_color_frame(path: &PathBuf) -> anyhow::Result<Vec<Rgb8>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read colors '{}'", path.display()))?;
    let triples: Vec<[u8; 3]> = serde_json::from_str(&json)
        .with_context(|| format!("parse colors '{}'", path.display()))?;
    Ok(triples
        .into_iter()
        .map(|[r, g, b]| Rgb8::new(r, g, b))
        .collect())
}

fn read_color_frames(path: &PathBuf) -> anyhow::Result<Vec<Vec<Rgb8>>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read frames '{}'", path.display()))?;
    let frames: Vec<Vec<[u8; 3]>> = serde_json::from_str(&json)
        .with_context(|| format!("parse frames '{}'", path.display()))?;
    Ok(frames
        .into_iter()
        .map(|f| f.into_iter().map(|[r, g, b]| Rgb8::new(r, g, b)).collect())
        .collect())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = build_renderer(&args.common)?;
    renderer.set_colors(read_color_frame(&args.colors)?);

    let capture = SharedCapture::new();
    capture.arm();
    renderer.add_observer(Box::new(capture.clone()));
    renderer.render_tick(0)?;

    let frames = capture.take_frames();
    let frame = frames
        .first()
        .map(|f| &f.image)
        .context("renderer produced no frame")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut renderer = build_renderer(&args.common)?;
    let frames = read_color_frames(&args.frames)?;
    if frames.is_empty() {
        anyhow::bail!("frames file contains no color frames");
    }
    let fps = args.fps.max(1);
    let tick_ms = 1000 / u64::from(fps);

    let capture = SharedCapture::new();
    renderer.add_observer(Box::new(capture.clone()));

    let mut controller = CaptureController::new(
        capture,
        EncodeConfig {
            workers: args.workers,
            speed: args.speed,
            ..EncodeConfig::default()
        },
    );
    controller.start()?;

    for (i, colors) in frames.into_iter().enumerate() {
        renderer.set_colors(colors);
        renderer.render_tick(i as u64 * tick_ms)?;
    }

    let bytes = controller
        .stop_and_export(&mut |event| eprintln!("{}", export_status(&event)))?
        .context("export produced no animation")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
