use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "canvasflat", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene JSON to an image.
    Render(RenderArgs),
    /// Check a scene JSON without rendering it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the `--out` extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Show a progress bar on stderr while rendering.
    #[arg(long)]
    progress: bool,

    /// Force anti-aliasing on, overriding the scene settings.
    #[arg(long, conflicts_with = "no_aa")]
    aa: bool,

    /// Force anti-aliasing off, overriding the scene settings.
    #[arg(long)]
    no_aa: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Ppm,
    PpmPlain,
    Pgm,
    PgmPlain,
    Pbm,
    Ascii,
}

impl From<FormatChoice> for canvasflat::ExportFormat {
    fn from(v: FormatChoice) -> Self {
        match v {
            FormatChoice::Png => Self::Png,
            FormatChoice::Ppm => Self::Ppm,
            FormatChoice::PpmPlain => Self::PpmPlain,
            FormatChoice::Pgm => Self::Pgm,
            FormatChoice::PgmPlain => Self::PgmPlain,
            FormatChoice::Pbm => Self::Pbm,
            FormatChoice::Ascii => Self::Ascii,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_scene(args_path: &std::path::Path) -> anyhow::Result<canvasflat::Scene> {
    let scene = canvasflat::Scene::from_path(args_path)
        .with_context(|| format!("load scene '{}'", args_path.display()))?;
    Ok(scene)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", args.in_path.display()))?;
    eprintln!(
        "ok: {}x{}, {} nodes, {} drawn",
        scene.width,
        scene.height,
        scene.nodes.len(),
        scene.draw.len()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let format = match args.format {
        Some(f) => f.into(),
        None => canvasflat::ExportFormat::from_path(&args.out)?,
    };

    let scene = read_scene(&args.in_path)?;
    let mut canvas = scene
        .build()
        .with_context(|| format!("build scene '{}'", args.in_path.display()))?;

    let kind = match args.backend {
        BackendChoice::Cpu => canvasflat::BackendKind::Cpu,
    };
    canvas = canvas.with_backend(canvasflat::create_backend(kind));

    if args.aa {
        canvas.set_anti_aliasing(true);
    } else if args.no_aa {
        canvas.set_anti_aliasing(false);
    }
    if args.progress {
        canvas.set_progress_sink(Some(Arc::new(canvasflat::TextProgressBar::stderr())));
    }

    canvas.redraw().context("render scene")?;

    canvasflat::export_to_path(canvas.frame(), &args.out, format)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
