//! `dmm-readout` binary: command line, logging, GUI or headless loop.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};

use dmm_readout::{run_readout, Readout, ReadoutConfig};

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Live multimeter readout via sigrok-cli
#[derive(Parser, Debug)]
#[command(name = "dmm-readout", version, about)]
struct Args {
    /// Path to the sigrok-cli executable
    #[arg(long)]
    sigrok: Option<PathBuf>,

    /// Serial port of the meter interface (COM3, /dev/ttyUSB0)
    #[arg(short = 'p', long)]
    port: Option<String>,

    /// libsigrok driver
    #[arg(long)]
    driver: Option<String>,

    /// Channel to acquire
    #[arg(long)]
    channel: Option<String>,

    /// Delay between polls in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Record raw output lines to this file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print readings to stdout instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many readings (headless only)
    #[arg(long)]
    count: Option<usize>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn setup_logging(args: &Args) {
    let level = match args.log_level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI flags override the settings file, which overrides defaults.
fn resolve_config(args: &Args) -> dmm_readout::Result<ReadoutConfig> {
    let mut cfg = match &args.config {
        Some(path) => ReadoutConfig::load(path)?,
        None => ReadoutConfig::default(),
    };
    if let Some(p) = &args.sigrok {
        cfg.sigrok_path = Some(p.clone());
    }
    if let Some(p) = &args.port {
        cfg.port = Some(p.clone());
    }
    if let Some(d) = &args.driver {
        cfg.driver = d.clone();
    }
    if let Some(c) = &args.channel {
        cfg.channel = c.clone();
    }
    if let Some(ms) = args.interval_ms {
        cfg.poll_interval_ms = ms;
    }
    if let Some(r) = &args.record {
        cfg.record_enabled = true;
        cfg.record_path = Some(r.clone());
    }
    cfg.resolve_sigrok_path();
    Ok(cfg)
}

fn run_headless(cfg: &ReadoutConfig, count: Option<usize>) -> dmm_readout::Result<()> {
    let mut readout = Readout::new(cfg);
    if let Some(path) = readout.start(cfg)? {
        info!(path = %path.display(), "recording");
    }
    let mut seen = 0usize;
    while readout.is_running() {
        for reading in readout.pump()? {
            println!(
                "{}\t{}",
                reading.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                reading.display_text()
            );
            seen += 1;
            if count.is_some_and(|n| seen >= n) {
                readout.stop();
                return Ok(());
            }
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(&args);

    let cfg = match resolve_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Configuration invalid: {e}");
            std::process::exit(1);
        }
    };

    if args.headless {
        if let Err(e) = run_headless(&cfg, args.count) {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    run_readout(cfg)?;
    Ok(())
}
