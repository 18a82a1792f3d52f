//! pomo - Work/rest interval timer
//!
//! Usage:
//!   pomo run                    Run the next interval (work, short or long rest)
//!   pomo run -n 4               Run four intervals back to back
//!   pomo run --work 50          Override the work length for this run
//!   pomo config                 Show the configured durations
//!   pomo config --work 45 --save
//!
//! While an interval runs, type `p` + Enter to pause and `r` + Enter to
//! resume. Ctrl-C cancels the running interval.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pomo_core::{format, Config, Paths};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pomo::{
    Category, InMemoryStore, Interval, IntervalConfig, IntervalError, IntervalState, IntervalStore, Timer,
};

/// pomo - Work/rest interval timer
#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "Work/rest interval timer with automatic short and long rests")]
#[command(version)]
#[command(after_help = r#"HOW IT WORKS:
    Every work interval is followed by a rest. A long rest is taken unless
    one of the last three rests was already long.

CONTROLS (while running):
    p + Enter    pause the current interval
    r + Enter    resume a paused interval
    Ctrl-C       cancel the current interval

EXAMPLES:
    pomo run                    # next interval with configured durations
    pomo run -n 4               # four intervals back to back
    pomo run --work 50 --long 20
    pomo config --work 45 --save

LOGGING:
    Set RUST_LOG=pomo=debug to trace state transitions on stderr.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run intervals
    #[command(alias = "r")]
    Run {
        #[command(flatten)]
        durations: DurationArgs,

        /// Number of intervals to run
        #[arg(short = 'n', long, default_value = "1")]
        cycles: u32,
    },

    /// Show or save configured durations
    #[command(alias = "cfg")]
    Config {
        #[command(flatten)]
        durations: DurationArgs,

        /// Write the effective values to the settings file
        #[arg(long)]
        save: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct DurationArgs {
    /// Work length in minutes
    #[arg(long, value_name = "MINS")]
    work: Option<u64>,

    /// Short rest length in minutes
    #[arg(long, value_name = "MINS")]
    short: Option<u64>,

    /// Long rest length in minutes
    #[arg(long, value_name = "MINS")]
    long: Option<u64>,
}

impl DurationArgs {
    fn apply(&self, settings: Config) -> Config {
        settings.with_overrides(self.work, self.short, self.long)
    }
}

// ANSI color codes
const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[0;33m";
const CYAN: &str = "\x1b[0;36m";
const MAGENTA: &str = "\x1b[0;35m";
const BOLD: &str = "\x1b[1m";
const NC: &str = "\x1b[0m";

/// Check if stdout is a TTY and colors should be used
fn use_colors() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Conditionally apply color
fn color(code: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", code, text, NC)
    } else {
        text.to_string()
    }
}

fn main() {
    // stdout carries the countdown, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run_command(cli.command) {
        eprintln!("{} {:#}", color(RED, "[error]"), err);
        let code = err
            .downcast_ref::<IntervalError>()
            .map(IntervalError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run_command(command: Option<Commands>) -> Result<()> {
    let paths = Paths::new();
    let settings = Config::load(&paths.config_file())?;

    match command {
        Some(Commands::Run { durations, cycles }) => {
            let config = IntervalConfig::from_settings(&durations.apply(settings));
            block_on(cmd_run(config, cycles))
        }
        Some(Commands::Config { durations, save, json }) => {
            cmd_config(&paths, durations.apply(settings), save, json)
        }
        None => block_on(cmd_run(IntervalConfig::from_settings(&settings), 1)),
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(fut: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let result = rt.block_on(fut);
    // The stdin reader sits in a blocking read; don't wait for it
    rt.shutdown_background();
    result
}

/// Run `cycles` intervals, pausing and resuming on stdin commands
async fn cmd_run(config: IntervalConfig, cycles: u32) -> Result<()> {
    let timer = Timer::new(Arc::new(InMemoryStore::new()), config);
    let cancel = CancellationToken::new();

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let (resume_tx, mut resume_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_controls(timer.clone(), resume_tx));

    for _ in 0..cycles {
        loop {
            let interval = timer.resolve_current()?;
            timer
                .start(&cancel, &interval, print_start, print_tick, print_end)
                .await
                .with_context(|| format!("Interval {} stopped unexpectedly", interval.id))?;

            let current = timer.store().by_id(interval.id)?;
            match current.state {
                IntervalState::Paused => {
                    println!();
                    println!(
                        "{} Paused with {} left. Type 'r' to resume.",
                        color(YELLOW, "[paused]"),
                        format::duration(current.remaining())
                    );
                    // Drop resumes typed while the interval was still running
                    while resume_rx.try_recv().is_ok() {}

                    tokio::select! {
                        Some(()) = resume_rx.recv() => continue,
                        _ = cancel.cancelled() => {
                            println!("{} Stopped while paused", color(CYAN, "[info]"));
                            return Ok(());
                        }
                    }
                }
                IntervalState::Cancelled => {
                    println!();
                    println!(
                        "{} {} cancelled after {}",
                        color(YELLOW, "[cancelled]"),
                        current.category,
                        format::duration(current.actual_duration)
                    );
                    return Ok(());
                }
                _ => break,
            }
        }
    }

    let upcoming = timer.next_category()?;
    println!("Next up: {}", color(CYAN, upcoming.as_str()));
    Ok(())
}

/// Translate stdin lines into pause requests and resume signals
async fn read_controls(timer: Timer<InMemoryStore>, resume: mpsc::UnboundedSender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "p" | "pause" => {
                if let Err(e) = timer.current().and_then(|interval| timer.pause(&interval)) {
                    warn!("Cannot pause: {}", e);
                }
            }
            "r" | "resume" => {
                if resume.send(()).is_err() {
                    break;
                }
            }
            "" => {}
            other => warn!(command = other, "Unknown control, use 'p' or 'r'"),
        }
    }
}

fn category_color(category: Category) -> &'static str {
    match category {
        Category::Work => MAGENTA,
        Category::ShortRest | Category::LongRest => GREEN,
    }
}

fn print_start(interval: &Interval) {
    let title = interval.category.as_str().to_uppercase();
    println!(
        "{}",
        color(&format!("{}{}", BOLD, category_color(interval.category)), &title)
    );
    println!(
        "  {}  {}",
        color(CYAN, "Planned:"),
        format::duration(interval.planned_duration)
    );
    if !interval.actual_duration.is_zero() {
        println!(
            "  {}  {}",
            color(CYAN, "Elapsed:"),
            format::duration(interval.actual_duration)
        );
    }
}

fn print_tick(interval: &Interval) {
    print!(
        "\r  [{}] {} ",
        format::progress_bar(interval.actual_duration, interval.planned_duration, 30),
        format::clock(interval.remaining())
    );
    let _ = std::io::stdout().flush();
}

fn print_end(interval: &Interval) {
    println!();
    println!(
        "{} {} complete ({})",
        color(GREEN, "[ok]"),
        interval.category,
        format::duration(interval.actual_duration)
    );
}

/// Show the effective durations, optionally saving them
fn cmd_config(paths: &Paths, settings: Config, save: bool, json: bool) -> Result<()> {
    let path = paths.config_file();
    if save {
        settings.save(&path)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let config = IntervalConfig::from_settings(&settings);
    println!("{}Interval durations{}", BOLD, NC);
    println!();
    println!("  {}        {}", color(CYAN, "Work:"), format::duration(config.work));
    println!("  {}  {}", color(CYAN, "Short rest:"), format::duration(config.short_rest));
    println!("  {}   {}", color(CYAN, "Long rest:"), format::duration(config.long_rest));
    println!();
    if save {
        println!("{} Saved to {}", color(GREEN, "[ok]"), path.display());
    } else {
        println!("Settings file: {}", path.display());
    }

    Ok(())
}
