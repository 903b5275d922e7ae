use std::{
    collections::BTreeMap,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "slidesync", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split narration text into slides and print them as JSON.
    Segment(SegmentArgs),
    /// Run the full pipeline and write the slides and clip timeline as JSON.
    Plan(PlanArgs),
    /// Run the pipeline, rasterize every frame and write an ffmpeg concat manifest.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SegmentArgs {
    /// Input narration text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Input narration text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Audio timeline JSON (`words`/`timestamps`, optional `audio_ref`/`audio_url`).
    #[arg(long)]
    words: PathBuf,

    /// Precomputed extractor responses keyed by slide index.
    #[arg(long, conflicts_with = "extractor_cmd")]
    extraction: Option<PathBuf>,

    /// External extractor program; receives slide text on stdin, prints JSON on stdout.
    #[arg(long)]
    extractor_cmd: Option<String>,

    /// Extra arguments passed to `--extractor-cmd`.
    #[arg(long = "extractor-arg", allow_hyphen_values = true)]
    extractor_args: Vec<String>,

    /// Pipeline options JSON. Flags below override file values.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Minimum on-screen time per slide, in seconds.
    #[arg(long)]
    min_slide_duration: Option<f64>,

    /// Node cap per slide graph.
    #[arg(long)]
    max_nodes: Option<usize>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Directory receiving frame images and the concat manifest.
    #[arg(long)]
    frames_dir: PathBuf,

    /// Output plan JSON path (defaults to `<frames-dir>/plan.json`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rasterizer backend.
    #[arg(long, value_enum, default_value_t = BackendChoice::Svg)]
    backend: BackendChoice,

    /// Image width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Rasterize frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Svg,
    D2,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Segment(args) => cmd_segment(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read narration '{}'", path.display()))
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    match out {
        Some(path) => {
            slidesync::ensure_parent_dir(path)?;
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write to stdout")?;
        }
    }
    Ok(())
}

fn cmd_segment(args: SegmentArgs) -> anyhow::Result<()> {
    let text = read_text(&args.in_path)?;
    let slides = slidesync::segment(&text)?;
    write_json(args.out.as_deref(), &slides)
}

fn load_opts(args: &PipelineArgs) -> anyhow::Result<slidesync::PipelineOpts> {
    let mut opts = match &args.opts {
        Some(path) => slidesync::PipelineOpts::from_path(path)?,
        None => slidesync::PipelineOpts::default(),
    };
    if let Some(v) = args.min_slide_duration {
        opts.min_slide_duration = v;
    }
    if let Some(v) = args.max_nodes {
        opts.max_nodes = v;
    }
    Ok(opts)
}

fn make_extractor(args: &PipelineArgs) -> anyhow::Result<Box<dyn slidesync::EntityExtractor>> {
    if let Some(path) = &args.extraction {
        return Ok(Box::new(slidesync::PrecomputedExtraction::from_path(path)?));
    }
    if let Some(program) = &args.extractor_cmd {
        return Ok(Box::new(slidesync::CommandExtractor::new(
            program.clone(),
            args.extractor_args.clone(),
        )));
    }
    Ok(Box::new(slidesync::NoExtraction))
}

fn run_pipeline(
    args: &PipelineArgs,
) -> anyhow::Result<(slidesync::PipelineContext, slidesync::PipelineOutput)> {
    let text = read_text(&args.in_path)?;
    let audio = slidesync::AudioTimeline::from_path(&args.words)?;
    let extractor = make_extractor(args)?;

    let mut ctx = slidesync::PipelineContext::new(load_opts(args)?)?;
    let output = ctx.run(&text, extractor.as_ref(), &audio)?;
    Ok((ctx, output))
}

fn report_stats(stats: slidesync::PipelineStats) {
    eprintln!(
        "slides={} frames={} fallback_plans={} extraction_failures={} words_unassigned={} frames_failed={}",
        stats.slides,
        stats.frames,
        stats.fallback_plans,
        stats.extraction_failures,
        stats.words_unassigned,
        stats.frames_failed
    );
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (ctx, output) = run_pipeline(&args.pipeline)?;
    write_json(args.out.as_deref(), &output)?;
    report_stats(ctx.stats());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let render_opts = slidesync::RenderOpts {
        width: args.width,
        height: args.height,
        backend: match args.backend {
            BackendChoice::Svg => slidesync::RasterBackend::Svg,
            BackendChoice::D2 => slidesync::RasterBackend::D2,
        },
        threading: slidesync::RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };
    render_opts.validate()?;

    let (mut ctx, mut output) = run_pipeline(&args.pipeline)?;

    let rasterizer = render_opts.rasterizer();
    let report = ctx.rasterize(
        &mut output,
        rasterizer.as_ref(),
        &args.frames_dir,
        &render_opts.threading,
    )?;
    if report.rendered.is_empty() {
        anyhow::bail!("no frames were rendered (backend '{}')", rasterizer.name());
    }

    // The concat demuxer resolves entries relative to the manifest, which sits beside the frames.
    let files: BTreeMap<slidesync::FrameId, PathBuf> = report
        .rendered
        .iter()
        .map(|(id, path)| {
            let name = path.file_name().map(PathBuf::from);
            (*id, name.unwrap_or_else(|| path.clone()))
        })
        .collect();
    let manifest_path = args.frames_dir.join("frames.ffconcat");
    std::fs::write(&manifest_path, output.timeline.to_ffconcat(&files))
        .with_context(|| format!("write concat manifest '{}'", manifest_path.display()))?;
    eprintln!("wrote {}", manifest_path.display());

    let plan_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.frames_dir.join("plan.json"));
    write_json(Some(plan_path.as_path()), &output)?;
    report_stats(ctx.stats());
    Ok(())
}
