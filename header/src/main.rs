use anyhow::{Context, Result};
use autoheader::{MacroOverride, Target, generate, install};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Auto-header generator.
#[derive(Parser, Debug)]
#[command(name = "autoheader", version, about)]
struct Args {
    /// C macros, as `-D NAME` or `-D NAME=VALUE`.
    #[arg(short = 'D', long = "define", value_name = "MACRO")]
    macros: Vec<MacroOverride>,

    /// Print derived constants.
    #[arg(long)]
    verbose: bool,

    /// Folder the header is written to.
    #[arg(long)]
    folder: PathBuf,

    /// Object the header is generated for.
    #[arg(value_enum)]
    object: Target,
}

fn main() -> Result<()> {
    let args: Args = Args::parse();

    let level: Level = if args.verbose { Level::INFO } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let object: &str = args.object.name();
    let header: PathBuf = install(&args.folder, object, generate(args.object, args.macros))
        .with_context(|| format!("failed to generate {object}.h"))?;

    info!("wrote {}", header.display());
    Ok(())
}
