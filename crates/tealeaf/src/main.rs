//! `tealeaf` - run one of the demo apps in the terminal.
//!
//! ```text
//! tealeaf dashboard
//! tealeaf --fps 30 --log-file tealeaf.log github
//! ```
//!
//! Logs never go to the terminal, which the app owns while it runs.  Pass
//! `--log-file` to capture them and filter with `RUST_LOG`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tealeaf::demos::Demo;
use tealeaf::{FetchConfig, ProgramOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive terminal demos built on an Elm-style component runtime.
#[derive(Parser, Debug)]
#[command(name = "tealeaf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
DEMOS:
    counter      count up and down with the arrow keys
    timer        a start/stop stopwatch
    todo         a scrollable checklist
    form         a validated two-field form
    github       look up a GitHub user over HTTP (aliases: userlookup, user-lookup)
    dashboard    counter, timer, todo and github in one screen
")]
struct Cli {
    /// Demo to run.
    demo: Option<String>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Maximum redraws per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=120))]
    fps: u32,

    /// Draw in the main screen instead of the alternate screen.
    #[arg(long)]
    inline: bool,

    /// Base URL of the user API.
    #[arg(long, value_name = "URL", default_value = tealeaf::fetch::DEFAULT_BASE_URL)]
    api_url: String,
}

impl Cli {
    fn options(&self, demo: Demo) -> ProgramOptions {
        ProgramOptions {
            fps: self.fps,
            alt_screen: !self.inline,
            title: Some(format!("tealeaf - {}", demo.name())),
            fetch: FetchConfig::with_base_url(self.api_url.clone()),
            ..ProgramOptions::default()
        }
    }
}

fn usage() -> String {
    let mut text = String::from("Usage: tealeaf [OPTIONS] <DEMO>\n\nDemos:\n");
    for demo in Demo::ALL {
        text.push_str(&format!("    {:<12} {}\n", demo.name(), demo.description()));
    }
    text.push_str("\nRun `tealeaf --help` for options.");
    text
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(cli: Cli, demo: Demo) -> Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    info!(%demo, fps = cli.fps, api = %cli.api_url, "Starting tealeaf");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    runtime
        .block_on(tealeaf::run_with(demo.build(), cli.options(demo)))
        .with_context(|| format!("{} demo failed", demo))?;

    info!(%demo, "Exited cleanly");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let Some(demo) = cli.demo.as_deref().and_then(Demo::from_name) else {
        println!("{}", usage());
        return;
    };

    if let Err(err) = run(cli, demo) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
