use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use qr_scan::engine::classify;
use qr_scan::platform::{ConfiguredPermissions, FileLauncher, desktop_screen_with_engine, run_message};
use qr_scan::{
    DecodeEngine, DecodedSymbol, ImageReference, Message, MultiFormatEngine, Permission, QrEngine,
    ScanConfig, ScreenState, render_symbol,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "qrscan", version, about = "Capture or pick an image and show what its barcode holds")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Directory for capture entries (overrides QR_SCAN_MEDIA_DIR)
    #[arg(long, global = true)]
    media_dir: Option<PathBuf>,

    /// Downscale images larger than this; 0 disables (overrides QR_MAX_DIM)
    #[arg(long, global = true)]
    max_dim: Option<u32>,

    /// Decoding engine
    #[arg(long, global = true, default_value = "all")]
    engine: EngineArg,

    /// Refuse this permission when asked
    #[arg(long, global = true, value_enum)]
    deny: Vec<PermissionArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum EngineArg {
    /// Every supported barcode format
    All,
    /// QR codes only
    Qr,
}

impl EngineArg {
    fn build(self) -> Arc<dyn DecodeEngine> {
        match self {
            EngineArg::All => Arc::new(MultiFormatEngine::new()),
            EngineArg::Qr => Arc::new(QrEngine::new()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PermissionArg {
    Camera,
    Storage,
}

impl From<PermissionArg> for Permission {
    fn from(arg: PermissionArg) -> Self {
        match arg {
            PermissionArg::Camera => Permission::Camera,
            PermissionArg::Storage => Permission::Storage,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// "Capture" SOURCE into a new media entry, then scan it
    Capture {
        #[arg(long)]
        source: PathBuf,
    },
    /// "Pick" IMAGE from the gallery, then scan it
    Pick {
        #[arg(long)]
        image: PathBuf,
    },
    /// Classify and render raw barcode text without an image
    Classify {
        #[arg(long)]
        text: String,
    },
}

#[derive(Serialize)]
struct ScanReport<'a> {
    image: Option<&'a ImageReference>,
    result: &'a str,
    notifications: &'a [String],
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    symbol: &'a DecodedSymbol,
    result: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ScanConfig::from_env();
    if let Some(dir) = &cli.media_dir {
        config = config.with_media_dir(dir);
    }
    if cli.max_dim.is_some() {
        config = config.with_max_dim(cli.max_dim);
    }

    let log_level = if cli.verbose || config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qr_scan={},qrscan={}", log_level, log_level).into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Capture { source } => {
            if !source.exists() {
                bail!("source image not found: {}", source.display());
            }
            let launcher = FileLauncher::new().with_camera_source(source);
            scan_cmd(&cli, &config, launcher, Message::CaptureImagePressed)
        }
        Command::Pick { image } => {
            let image = image
                .canonicalize()
                .with_context(|| format!("image not found: {}", image.display()))?;
            let launcher = FileLauncher::new().with_gallery_selection(ImageReference::from_path(image));
            scan_cmd(&cli, &config, launcher, Message::PickImagePressed)
        }
        Command::Classify { text } => classify_cmd(&cli, text),
    }
}

fn scan_cmd(cli: &Cli, config: &ScanConfig, launcher: FileLauncher, acquire: Message) -> Result<()> {
    let answers = [Permission::Camera, Permission::Storage]
        .into_iter()
        .filter(|p| !cli.deny.iter().any(|d| Permission::from(*d) == *p));
    let permissions = ConfiguredPermissions::with_answers(answers);

    let mut screen = desktop_screen_with_engine(config, cli.engine.build(), permissions, launcher);
    let mut state = ScreenState::default();

    run_message(&mut screen, &mut state, acquire);
    run_message(&mut screen, &mut state, Message::ScanPressed);

    match cli.format {
        OutputFormat::Text => {
            if let Some(image) = &state.image {
                println!("Image: {}", image);
            }
            if !state.result_text.is_empty() {
                println!("{}", state.result_text);
            }
        }
        OutputFormat::Json => {
            let report = ScanReport {
                image: state.image.as_ref(),
                result: &state.result_text,
                notifications: screen.notifier().history(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn classify_cmd(cli: &Cli, text: &str) -> Result<()> {
    let symbol = DecodedSymbol::new(Some(text.to_string()), classify(text));
    let rendered = render_symbol(&symbol);
    match cli.format {
        OutputFormat::Text => println!("{}", rendered),
        OutputFormat::Json => {
            let report = ClassifyReport {
                symbol: &symbol,
                result: &rendered,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
