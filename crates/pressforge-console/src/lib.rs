//! Colorful console output for batch solving.
//!
//! Provides a custom `tracing` layer that formats batch events with colors,
//! and the [`TerminalRenderer`] that redraws the progress grid in place.
//!
//! ## Log Levels
//!
//! - **INFO**: Batch and machine lifecycle events
//! - **WARN**: Progress display problems
//! - **DEBUG**: Per-search summaries

mod terminal;

pub use terminal::TerminalRenderer;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the PressForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PressConsoleLayer::new())
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____                     _____
|  _ \ _ __ ___  ___ ___ |  ___|__  _ __ __ _  ___
| |_) | '__/ _ \/ __/ __|| |_ / _ \| '__/ _` |/ _ \
|  __/| | |  __/\__ \__ \|  _| (_) | | | (_| |  __/
|_|   |_|  \___||___/___/|_|  \___/|_|  \__, |\___|
                                        |___/
"#;

    let version_line = format!(
        "                   v{} - Minimal Button Press Solver\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats batch events with colors.
///
/// Timestamps count from the most recent `batch_start` event.
pub struct PressConsoleLayer {
    epoch: Instant,
    batch_start_nanos: AtomicU64,
}

impl PressConsoleLayer {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            batch_start_nanos: AtomicU64::new(0),
        }
    }

    fn mark_batch_start(&self) {
        let nanos = self.epoch.elapsed().as_nanos() as u64;
        self.batch_start_nanos.store(nanos, Ordering::Relaxed);
    }

    fn elapsed_secs(&self) -> f64 {
        let start_nanos = self.batch_start_nanos.load(Ordering::Relaxed);
        let now_nanos = self.epoch.elapsed().as_nanos() as u64;
        now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
    }
}

impl Default for PressConsoleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Subscriber> Layer<S> for PressConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from pressforge crates
        if !metadata.target().starts_with("pressforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if visitor.event.as_deref() == Some("batch_start") {
            self.mark_batch_start();
        }

        let output = format_event(&visitor, *metadata.level(), self.elapsed_secs());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    error: Option<String>,
    machine: Option<u64>,
    machines: Option<u64>,
    workers: Option<u64>,
    presses: Option<u64>,
    presses_attempted: Option<u64>,
    duration_ms: Option<u64>,
    sum: Option<u64>,
    total: Option<u64>,
    in_progress: Option<u64>,
    succeeded: Option<u64>,
    failed: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "machine" => self.machine = Some(value),
            "machines" => self.machines = Some(value),
            "workers" => self.workers = Some(value),
            "presses" => self.presses = Some(value),
            "presses_attempted" => self.presses_attempted = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "sum" => self.sum = Some(value),
            "total" => self.total = Some(value),
            "in_progress" => self.in_progress = Some(value),
            "succeeded" => self.succeeded = Some(value),
            "failed" => self.failed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level, elapsed: f64) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "batch_start" => format_batch_start(v, elapsed),
        "batch_end" => format_batch_end(v, elapsed),
        "machine_solved" => format_machine_solved(v, elapsed),
        "machine_failed" => format_machine_failed(v, elapsed),
        "progress" => format_progress(v, elapsed),
        _ if level == Level::WARN => format_warning(event, v, elapsed),
        _ => String::new(),
    }
}

fn format_elapsed(secs: f64) -> String {
    format!("{:>7.3}s", secs)
        .bright_black()
        .to_string()
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_batch_start(v: &EventVisitor, elapsed: f64) -> String {
    let machines = v.machines.unwrap_or(0);
    let workers = v.workers.unwrap_or(0);

    format!(
        "{} {} Solving │ {} machines │ {} workers",
        format_elapsed(elapsed),
        "▶".bright_green().bold(),
        count(machines).bright_yellow(),
        count(workers).bright_yellow(),
    )
}

fn format_machine_solved(v: &EventVisitor, elapsed: f64) -> String {
    format!(
        "{} {} M{:<3} │ {} presses │ {} attempted │ {}",
        format_elapsed(elapsed),
        "✓".bright_green(),
        v.machine.unwrap_or(0),
        count(v.presses.unwrap_or(0)).bright_green().bold(),
        count(v.presses_attempted.unwrap_or(0)).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_machine_failed(v: &EventVisitor, elapsed: f64) -> String {
    format!(
        "{} {} M{:<3} │ {} │ {} attempted │ {}",
        format_elapsed(elapsed),
        "✗".bright_red(),
        v.machine.unwrap_or(0),
        "no solution".bright_red().bold(),
        count(v.presses_attempted.unwrap_or(0)).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_progress(v: &EventVisitor, elapsed: f64) -> String {
    format!(
        "{} {} {} machines │ {} running │ {} solved │ {} failed",
        format_elapsed(elapsed),
        "⚡".bright_cyan(),
        count(v.total.unwrap_or(0)).white(),
        count(v.in_progress.unwrap_or(0)).bright_yellow(),
        count(v.succeeded.unwrap_or(0)).bright_green(),
        count(v.failed.unwrap_or(0)).bright_red(),
    )
}

fn format_warning(event: &str, v: &EventVisitor, elapsed: f64) -> String {
    let mut output = format!(
        "{} {} {}",
        format_elapsed(elapsed),
        "!".bright_yellow().bold(),
        event.yellow()
    );
    if let Some(ref error) = v.error {
        output.push_str(&format!(" │ {}", error));
    }
    output
}

fn format_batch_end(v: &EventVisitor, elapsed: f64) -> String {
    let sum = v.sum.unwrap_or(0);
    let succeeded = v.succeeded.unwrap_or(0);
    let failed = v.failed.unwrap_or(0);
    let attempted = v.presses_attempted.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Batch complete │ {} │ sum {}",
        format_elapsed(elapsed),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        count(sum).bright_green().bold(),
    );

    // Summary box
    let inner_width: usize = 58;
    let border = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", border).bright_cyan().to_string());
    output.push('\n');

    let title = if failed == 0 {
        "ALL MACHINES SOLVED"
    } else {
        "BATCH FINISHED WITH FAILURES"
    };
    let total_pad = inner_width.saturating_sub(title.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let title_colored = if failed == 0 {
        title.bright_green().bold().to_string()
    } else {
        title.bright_yellow().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        title_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╠{}╣", border).bright_cyan().to_string());
    output.push('\n');

    for (label, value) in [
        ("Minimal presses:", count(sum)),
        ("Solved:", count(succeeded)),
        ("Failed:", count(failed)),
        ("Presses attempted:", count(attempted)),
    ] {
        output.push_str(&summary_row(label, &value));
        output.push('\n');
    }

    output.push_str(&format!("╚{}╝", border).bright_cyan().to_string());
    output.push('\n');

    output
}

fn summary_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<20}{:>34}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
