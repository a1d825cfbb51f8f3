//! `uartplot`: plot numeric lines from serial-like byte streams.
//!
//! ```text
//! uartplot                          # read stdin
//! uartplot /dev/ttyACM0             # an already configured tty
//! uartplot tcp://10.0.0.5:2000 tcp://10.0.0.6:2000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use uartplot::persistence::load_config;
use uartplot::{channel_rx, run_plotter, spawn_reader, CancelToken, PlotterConfig, SourceMode, SourceSpec};

#[derive(Debug, Parser)]
#[command(name = "uartplot", version, about = "Realtime plotter for numeric serial streams")]
struct Cli {
    /// Sources to read: `-` for stdin, `tcp://host:port`, or a file/device path.
    #[arg(value_name = "SOURCE")]
    sources: Vec<String>,

    /// Configuration file (.json, .yaml or .yml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Visible window width in seconds.
    #[arg(short, long)]
    width: Option<f64>,

    /// Start with auto-scroll disabled.
    #[arg(long)]
    manual: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uartplot={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> uartplot::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlotterConfig::default(),
    };
    if let Some(width) = cli.width {
        cfg.window.width_seconds = width;
    }
    if cli.manual {
        cfg.window.auto_follow = false;
    }

    let raw = if cli.sources.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.sources
    };
    let specs = raw
        .iter()
        .map(|s| s.parse::<SourceSpec>())
        .collect::<uartplot::Result<Vec<_>>>()?;

    let mode = match specs.as_slice() {
        [only] => SourceMode::Single(only.source_id()),
        _ => SourceMode::Multi,
    };

    let (sink, rx) = channel_rx();
    let cancel = CancelToken::new();
    for spec in specs {
        spawn_reader(spec, sink.clone(), cancel.clone())?;
    }
    drop(sink);

    run_plotter(rx, cfg, mode, cancel)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "uartplot failed");
            ExitCode::FAILURE
        }
    }
}
