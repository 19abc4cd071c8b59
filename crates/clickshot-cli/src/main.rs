//! clickshot: click-triggered screenshot capture
//!
//! Installs a global mouse listener and saves an annotated PNG for every
//! primary-button click, until interrupted with Ctrl+C.
//!
//! The click hook is Windows-only for now; on other platforms the binary
//! still offers `--list-monitors` and exits with a clear error when asked
//! to listen.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use clickshot_core::config::{self, CaptureConfig, CaptureMode, PointerStyle};
use clickshot_core::engine::CaptureEngine;
use clickshot_core::platform::{Desktop, XcapDesktop};

#[derive(Parser)]
#[command(name = "clickshot")]
#[command(about = "Capture an annotated screenshot on every mouse click")]
struct Cli {
    /// Capture mode: primary, cursor, all, or window
    #[arg(long, env = "CLICKSHOT_MODE", default_value = "cursor")]
    mode: String,

    /// Directory where screenshots are written
    #[arg(short, long, env = "CLICKSHOT_OUTPUT_DIR", default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Minimum milliseconds between captured clicks
    #[arg(long, env = "CLICKSHOT_DEBOUNCE_MS", default_value_t = config::DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Filename prefix for monitor-mode captures
    #[arg(long, env = "CLICKSHOT_PREFIX", default_value = config::DEFAULT_FILENAME_PREFIX)]
    prefix: String,

    /// Disable the click-position marker overlay
    #[arg(long, env = "CLICKSHOT_NO_MARKER")]
    no_marker: bool,

    /// Marker color as #rrggbb
    #[arg(long, env = "CLICKSHOT_MARKER_COLOR", default_value = "#ff3b30")]
    marker_color: String,

    /// Marker circle radius in pixels
    #[arg(long, default_value_t = config::DEFAULT_POINTER_RADIUS)]
    marker_radius: u32,

    /// Marker stroke width in pixels
    #[arg(long, default_value_t = config::DEFAULT_POINTER_STROKE)]
    marker_stroke: u32,

    /// Window mode: only capture this browser (chrome, edge, brave, firefox)
    #[arg(long, env = "CLICKSHOT_BROWSER")]
    browser: Option<String>,

    /// Window mode: only capture when the title contains this substring
    #[arg(long, env = "CLICKSHOT_TITLE")]
    title: Option<String>,

    /// Make the title filter case-sensitive
    #[arg(long, env = "CLICKSHOT_TITLE_CASE_SENSITIVE")]
    title_case_sensitive: bool,

    /// Append microseconds to filename timestamps
    #[arg(long, env = "CLICKSHOT_MICROS")]
    micros: bool,

    /// Print the detected monitor layout and exit
    #[arg(long)]
    list_monitors: bool,
}

impl Cli {
    fn to_config(&self) -> CaptureConfig {
        CaptureConfig {
            output_dir: self.output_dir.clone(),
            mode: CaptureMode::parse_or_default(&self.mode),
            debounce_ms: self.debounce_ms,
            pointer: PointerStyle::from_operator(
                !self.no_marker,
                self.marker_radius,
                self.marker_stroke,
                config::parse_hex_color_or_default(&self.marker_color),
            ),
            filename_prefix: self.prefix.clone(),
            browser_filter: self.browser.clone(),
            title_filter: self.title.clone(),
            title_filter_case_sensitive: self.title_case_sensitive,
            include_micros: self.micros,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clickshot=info".parse()?)
                .add_directive("clickshot_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let desktop = Arc::new(XcapDesktop::new());

    if cli.list_monitors {
        return list_monitors(desktop.as_ref());
    }

    let config = cli.to_config();
    let engine = CaptureEngine::new(config, desktop);
    engine
        .prepare()
        .context("failed to prepare the output directory")?;

    run(engine)
}

fn list_monitors(desktop: &dyn Desktop) -> Result<()> {
    let layout = desktop.layout().context("monitor enumeration failed")?;

    println!("Found {} monitors:\n", layout.monitors.len());
    for monitor in &layout.monitors {
        println!("  Monitor {}", monitor.id);
        println!("    Position: ({}, {})", monitor.left, monitor.top);
        println!("    Size: {}x{}", monitor.width, monitor.height);
        println!();
    }
    println!(
        "Virtual screen: ({}, {}) {}x{}",
        layout.virtual_bounds.left,
        layout.virtual_bounds.top,
        layout.virtual_bounds.width,
        layout.virtual_bounds.height
    );

    Ok(())
}

#[cfg(target_os = "windows")]
fn run(engine: CaptureEngine) -> Result<()> {
    use std::sync::atomic::{AtomicBool, Ordering};

    use clickshot_core::listener::{self, windows::HookEventSource};

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        handler_stop.store(true, Ordering::SeqCst);
    })
    .context("failed to install the Ctrl+C handler")?;

    println!(
        "Listening for clicks ({} mode), saving to {}. Press Ctrl+C to stop.",
        engine.config().mode,
        engine.config().output_dir.display()
    );

    let source = HookEventSource::new();
    listener::run_listener(&engine, &source, &stop).context("listener failed")?;
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run(_engine: CaptureEngine) -> Result<()> {
    anyhow::bail!(
        "global click listening is only supported on Windows; \
         use --list-monitors to inspect the detected displays"
    );
}
