use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "roadreel", version, about = "Render traffic-corridor animation frames")]
struct Cli {
    /// Increase log verbosity. `render` logs progress at info by default; other commands start
    /// at warn. Each -v steps up one level to debug, then trace.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame of the animation as a numbered PNG sequence.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the padded projection bounds of a scene.
    Bounds(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene JSON. The built-in Perth corridors are used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Override the scene's frame count.
    #[arg(long)]
    frames: Option<u64>,

    /// Override the canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the canvas height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory (created if missing).
    #[arg(long)]
    out: PathBuf,

    /// File name prefix; frames are written as `<prefix>_NNNN.png`.
    #[arg(long, default_value = "assembly")]
    prefix: String,

    /// Pixel layout of the written files.
    #[arg(long, value_enum, default_value_t = FormatChoice::Rgba)]
    format: FormatChoice,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames rendered per chunk (parallel mode only).
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pixel layout of the written file.
    #[arg(long, value_enum, default_value_t = FormatChoice::Rgba)]
    format: FormatChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Rgba,
    Rgb,
}

impl From<FormatChoice> for roadreel::PixelFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Rgba => roadreel::PixelFormat::Rgba,
            FormatChoice::Rgb => roadreel::PixelFormat::Rgb,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let base = u8::from(matches!(cli.cmd, Command::Render(_)));
    init_tracing(cli.verbose.saturating_add(base));
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Bounds(args) => cmd_bounds(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<roadreel::SceneDef> {
    let mut scene = match &args.scene {
        Some(path) => read_scene(path)?,
        None => roadreel::SceneDef::default(),
    };
    if let Some(frames) = args.frames {
        scene.frames = frames;
    }
    if let Some(width) = args.width {
        scene.canvas.width = width;
    }
    if let Some(height) = args.height {
        scene.canvas.height = height;
    }
    scene.validate().context("invalid scene")?;
    Ok(scene)
}

fn read_scene(path: &Path) -> anyhow::Result<roadreel::SceneDef> {
    roadreel::SceneDef::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let opts = roadreel::RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let sess = roadreel::RenderSession::new(scene, opts).context("prepare render session")?;

    let mut sink = roadreel::PngSequenceSink::new(roadreel::PngSequenceOpts {
        dir: args.out.clone(),
        prefix: args.prefix,
        format: args.format.into(),
    });
    let stats = sess
        .render_all(&mut sink, None)
        .with_context(|| format!("render frames into '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} frames to {} ({:.2} MB in {:.2}s)",
        stats.frames_rendered,
        args.out.display(),
        stats.bytes_written as f64 / (1024.0 * 1024.0),
        stats.elapsed.as_secs_f64()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let background = scene.background();
    let sess = roadreel::RenderSession::new(scene, roadreel::RenderSessionOpts::default())
        .context("prepare render session")?;
    let frame = sess.render_frame(roadreel::FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let size = roadreel::emit(&frame, &args.out, args.format.into(), background)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({size} bytes)", args.out.display());
    Ok(())
}

fn cmd_bounds(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args)?;
    let b = roadreel::compute_bounds(&scene.corridors)?;
    println!("lat  {:.6} .. {:.6}", b.min_lat(), b.max_lat());
    println!("lng  {:.6} .. {:.6}", b.min_lng(), b.max_lng());
    println!("merc {:.6} .. {:.6}", b.min_merc_n(), b.max_merc_n());
    Ok(())
}
