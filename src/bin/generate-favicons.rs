use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use vibe_pages::favicons::{generate_icons, missing_icons};
use vibe_pages::logging;

/// Generate PNG favicons and app icons from the square site logo.
#[derive(Parser, Debug)]
#[command(name = "generate-favicons", version)]
struct Args {
    /// Source logo. SVG is rasterised per size; a PNG source should be at least 512x512.
    #[arg(long, env = "ICON_SOURCE", default_value = "assets/images/icon.svg")]
    source: PathBuf,

    /// Directory the icons are written to. Defaults to the source's directory.
    #[arg(long, env = "ICON_OUT_DIR")]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let args = Args::parse();
    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => args
            .source
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    info!(source = %args.source.display(), out = %out_dir.display(), "generating icons");
    let generated = generate_icons(&args.source, &out_dir)?;

    let missing = missing_icons(&out_dir);
    if !missing.is_empty() {
        for name in missing.iter().copied() {
            warn!(name, "icon missing");
        }
        bail!("{} of the required icons are missing", missing.len());
    }

    info!(count = generated.len(), "all required PNG assets generated");
    Ok(())
}
