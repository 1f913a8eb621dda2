use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};

use motion_to_live::{config::Config, tools, LivePhotoConverter};

#[derive(Parser)]
#[command(
    name = "motion-to-live",
    version,
    about = "Convert a motion photo into a live photo",
    long_about = "Reads a motion photo folder containing image.jpg and video.mp4, and writes image.heic and video.mov with the original EXIF metadata into the output folder."
)]
struct Cli {
    /// Motion photo folder (must contain image.jpg and video.mp4)
    #[arg(required_unless_present = "check_tools")]
    input: Option<PathBuf>,

    /// Output folder, created if missing
    #[arg(required_unless_present = "check_tools")]
    output: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report whether heif-enc and ffmpeg are available, then exit
    #[arg(long)]
    check_tools: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    if cli.check_tools {
        for tool in tools::check_tools() {
            match (tool.available, tool.version) {
                (true, Some(version)) => println!("{:<10} ok       {}", tool.name, version),
                (true, None) => println!("{:<10} ok", tool.name),
                (false, _) => println!("{:<10} missing", tool.name),
            }
        }
        return Ok(());
    }

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        anyhow::bail!("INPUT and OUTPUT folders are required");
    };

    info!("Starting motion-to-live v{}", env!("CARGO_PKG_VERSION"));

    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };

    let converter = LivePhotoConverter::new(config);
    match converter.convert(&input, &output).await {
        Ok(live) => {
            println!("Live Photo created in {}:", live.folder.display());
            println!("- {}", live.image.path.display());
            println!("- {}", live.video.path.display());
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed ({})", e.kind());
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}
