mod config;
mod script;


use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::{ConfigError, FormatChoice, ReplayConfig};
use firma_canvas::deliver::{self, DeliveryError, DeliverySink, FileDelivery};
use firma_canvas::engine::EngineCore;
use firma_canvas::export::{Artifact, ExportError, ExportFormat};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid replay script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

#[derive(Parser, Debug)]
#[command(name = "firma", about = "Replay signature input and export PNG/SVG artifacts")]
struct Cli {
    /// Directory exported files are written to (`FIRMA_OUT_DIR`).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Which artifacts to export (`FIRMA_FORMAT`).
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Width of the element hosting the surface (`FIRMA_CONTAINER_WIDTH`).
    #[arg(long, value_parser = config::dimension_arg, allow_negative_numbers = true)]
    container_width: Option<f64>,

    /// Height of the viewport (`FIRMA_VIEWPORT_HEIGHT`).
    #[arg(long, value_parser = config::dimension_arg, allow_negative_numbers = true)]
    viewport_height: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and deliver the exported artifacts.
    Replay {
        /// Script path, or `-` for stdin.
        input: String,
    },
    /// Print the drawing-buffer size for the configured layout.
    Size,
    /// Replay a script and print the resulting paths as JSON.
    Paths {
        /// Script path, or `-` for stdin.
        input: String,
    },
}

fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    let mut cfg = ReplayConfig::from_env()?;
    if let Some(dir) = cli.out_dir {
        cfg.out_dir = dir;
    }
    if let Some(format) = cli.format {
        cfg.format = format;
    }
    if let Some(width) = cli.container_width {
        cfg.container_width = width;
    }
    if let Some(height) = cli.viewport_height {
        cfg.viewport_height = height;
    }

    match cli.command {
        Command::Replay { input } => run_replay(&cfg, &input),
        Command::Size => {
            let size = cfg.buffer_size();
            println!("{}x{}", size.width, size.height);
            Ok(())
        }
        Command::Paths { input } => {
            let core = replay(&cfg, &input)?;
            println!("{}", serde_json::to_string_pretty(&core.snapshot())?);
            Ok(())
        }
    }
}

fn run_replay(cfg: &ReplayConfig, input: &str) -> Result<(), CliError> {
    let core = replay(cfg, input)?;
    if !core.has_content() {
        tracing::info!("nothing drawn; export declined");
        return Ok(());
    }

    let mut sink = FileDelivery::new(&cfg.out_dir);
    for &format in cfg.format.formats() {
        let Some(artifact) = export(&core, format)? else {
            continue;
        };
        let path = sink.deliver(&artifact, &deliver::file_name_now(format))?;
        println!("{}", path.display());
    }
    Ok(())
}

fn replay(cfg: &ReplayConfig, input: &str) -> Result<EngineCore, CliError> {
    let json = read_input(input)?;
    let events = script::parse(&json)?;
    let size = cfg.buffer_size();
    let mut core = EngineCore::new(size)?;
    let summary = script::run(&mut core, &events);
    tracing::info!(
        width = size.width,
        height = size.height,
        events = summary.events,
        strokes = summary.strokes,
        clears = summary.clears,
        "script replayed"
    );
    Ok(core)
}

fn export(core: &EngineCore, format: ExportFormat) -> Result<Option<Artifact>, CliError> {
    match format {
        ExportFormat::Png => Ok(core.export_raster()?),
        ExportFormat::Svg => Ok(core.export_vector()),
    }
}

fn read_input(input: &str) -> Result<String, CliError> {
    let read_err = |source| CliError::Read { path: input.to_owned(), source };
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).map_err(read_err)
}
