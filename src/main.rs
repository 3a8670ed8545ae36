use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spark_folio::pipeline::{self, terminal_size};
use spark_folio::{AppConfig, Page, Result};

#[derive(Parser)]
#[command(name = "spark-folio")]
#[command(author, version, about = "An animated developer portfolio for the terminal")]
struct Cli {
    /// Config file (defaults to ~/.config/spark-folio/config.toml)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Show every animation at its final state
    #[arg(long = "no-animations")]
    no_animations: bool,

    /// Frames per second
    #[arg(long)]
    fps: Option<u16>,

    /// Print one frame scrolled to OFFSET pixels and exit
    #[arg(long, value_name = "OFFSET", num_args = 0..=1, default_missing_value = "0")]
    dump: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if cli.no_animations {
        config.animation.enabled = false;
    }
    if let Some(fps) = cli.fps {
        config.animation.fps = fps;
    }
    config.validate()?;

    // The terminal belongs to the page, so logs go to a file
    init_logging(&config)?;

    let (cols, rows) = terminal_size();

    if let Some(offset) = cli.dump {
        for line in pipeline::dump(config, offset, cols, rows)? {
            println!("{line}");
        }
        return Ok(());
    }

    tracing::info!(cols, rows, theme = %config.general.theme, "starting");
    let mut page = Page::new(config, cols, rows)?;
    let handle = pipeline::mount(&page)?;
    let result = pipeline::run(&mut page, &handle);
    handle.unmount();
    page.unmount();

    if let Err(err) = &result {
        tracing::error!(%err, "event loop failed");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let path = &config.general.log_file;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
