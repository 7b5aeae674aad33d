use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pixmerge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge two or more images into one composite PNG.
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Input image files, merged in argument order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Layout to arrange the images in.
    #[arg(long, value_enum, default_value_t = LayoutChoice::Horizontal)]
    layout: LayoutChoice,

    /// Spacing in pixels between adjacent images (clamped to 0..=100).
    #[arg(long, default_value = "0")]
    gap: String,

    /// Background color (hex like '#rrggbb' or a basic color name).
    #[arg(long, default_value = "#ffffff")]
    bg: String,

    /// Output PNG path.
    #[arg(long, default_value = "merged.png")]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    Horizontal,
    Vertical,
    Grid2,
}

impl LayoutChoice {
    fn as_mode_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Grid2 => "grid2",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Merge(args) => cmd_merge(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let config = pixmerge::MergeConfig::from_raw(args.layout.as_mode_str(), &args.gap, &args.bg)?;

    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        files.push((path.display().to_string(), bytes));
    }

    let mut session = pixmerge::MergeSession::new();
    let report = session.add_files(
        files
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
    );
    for failure in &report.failures {
        eprintln!("skipping '{}': {}", failure.name, failure.error);
    }

    session.merge(&config)?;
    let export = session
        .export()
        .context("merge produced no exportable composite")?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, export.bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
