//! The click-to-capture pipeline
//!
//! [`CaptureEngine`] owns the configuration, the debounce gate, the pause
//! flag, and the persistence writer, and turns one pointer event into zero
//! or more saved PNG files:
//!
//! 1. pause and debounce gates (silent skips);
//! 2. target resolution, monitor modes against a fresh layout, window mode
//!    against the qualified foreground window;
//! 3. frame grab through the [`Desktop`] seam;
//! 4. pointer-marker annotation;
//! 5. sanitized, timestamped, atomic persistence.
//!
//! Skips are ordinary outcomes; an `Err` means a real failure (enumeration,
//! grab, encode, write) for the caller to log.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::annotate;
use crate::config::{CaptureConfig, CaptureMode};
use crate::debounce::DebounceGate;
use crate::error::CaptureResult;
use crate::model::{CaptureOutcome, CapturePoint, SavedCapture, SkipReason};
use crate::persist::PersistenceWriter;
use crate::platform::Desktop;
use crate::resolve::{self, MonitorSelection, WindowFilters};

/// Stateful engine driving captures from pointer events
pub struct CaptureEngine {
    config: CaptureConfig,
    gate: DebounceGate,
    paused: AtomicBool,
    desktop: Arc<dyn Desktop>,
    writer: PersistenceWriter,
}

impl CaptureEngine {
    /// Creates an engine over the given desktop backend
    pub fn new(config: CaptureConfig, desktop: Arc<dyn Desktop>) -> Self {
        let gate = DebounceGate::new(config.debounce_ms);
        let writer = PersistenceWriter::new(&config.output_dir, config.include_micros);
        Self {
            config,
            gate,
            paused: AtomicBool::new(false),
            desktop,
            writer,
        }
    }

    /// One-time startup work: creates the output directory
    ///
    /// Failure here is fatal; a listener must not start without a writable
    /// destination.
    pub fn prepare(&self) -> CaptureResult<()> {
        self.writer.ensure_output_dir()?;
        tracing::info!(
            output_dir = %self.writer.output_dir().display(),
            mode = %self.config.mode,
            debounce_ms = self.gate.window_ms(),
            "Capture engine ready"
        );
        Ok(())
    }

    /// The engine's configuration
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Pauses or resumes capturing without uninstalling the hook
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
        tracing::info!(paused, "Capture pause state changed");
    }

    /// Whether the engine is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Processes one primary-button press at `point`
    ///
    /// Returns the files written, a [`SkipReason`] for events the pipeline
    /// deliberately ignores, or an error for hard failures. Never panics on
    /// any input.
    pub fn handle_click(&self, point: CapturePoint) -> CaptureResult<CaptureOutcome> {
        if self.is_paused() {
            return Ok(CaptureOutcome::Skipped(SkipReason::Paused));
        }
        if !self.gate.accept_now() {
            return Ok(CaptureOutcome::Skipped(SkipReason::Debounced));
        }

        match self.config.mode {
            CaptureMode::Primary => self.capture_monitors(MonitorSelection::Primary, point),
            CaptureMode::Cursor => self.capture_monitors(MonitorSelection::Cursor, point),
            CaptureMode::All => self.capture_monitors(MonitorSelection::All, point),
            CaptureMode::Window => self.capture_window(point),
        }
    }

    /// Captures the monitors selected by the mode, one file each
    fn capture_monitors(
        &self,
        selection: MonitorSelection,
        point: CapturePoint,
    ) -> CaptureResult<CaptureOutcome> {
        let layout = self.desktop.layout()?;
        let targets = match resolve::resolve_monitors(selection, &layout, point) {
            Ok(targets) => targets,
            Err(reason) => return Ok(CaptureOutcome::Skipped(reason)),
        };

        let prefix = &self.config.filename_prefix;
        let mut saved = Vec::with_capacity(targets.len());
        for monitor in targets {
            let region = monitor.region();
            let mut frame = self.desktop.grab(region)?;
            annotate::draw_pointer_marker(&mut frame, region, point, &self.config.pointer);

            let label = match selection {
                MonitorSelection::Cursor => format!("{prefix}_cursor"),
                _ => format!("{prefix}_monitor{}", monitor.id),
            };
            let path = self.writer.save_png(&frame, &label)?;
            saved.push(SavedCapture {
                path,
                width: frame.width(),
                height: frame.height(),
                target: monitor.id.to_string(),
            });
        }

        Ok(CaptureOutcome::Captured(saved))
    }

    /// Captures the foreground window when it qualifies as a browser
    fn capture_window(&self, point: CapturePoint) -> CaptureResult<CaptureOutcome> {
        let Some(window) = self.desktop.foreground_window()? else {
            return Ok(CaptureOutcome::Skipped(SkipReason::NoForegroundWindow));
        };

        let filters = WindowFilters {
            browser: self.config.browser_filter.as_deref(),
            title: self.config.title_filter.as_deref(),
            title_case_sensitive: self.config.title_filter_case_sensitive,
        };
        let (browser, region) = match resolve::qualify_window(&window, &filters) {
            Ok(qualified) => qualified,
            Err(reason) => {
                tracing::debug!(
                    title = %window.title,
                    class = %window.class,
                    exe = %window.exe,
                    %reason,
                    "Foreground window did not qualify"
                );
                return Ok(CaptureOutcome::Skipped(reason));
            }
        };

        let mut frame = self.desktop.grab(region)?;
        annotate::draw_pointer_marker(&mut frame, region, point, &self.config.pointer);

        let path = self.writer.save_png(&frame, &window.title)?;
        Ok(CaptureOutcome::Captured(vec![SavedCapture {
            path,
            width: frame.width(),
            height: frame.height(),
            target: browser.as_str().to_string(),
        }]))
    }
}

impl std::fmt::Debug for CaptureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureEngine")
            .field("config", &self.config)
            .field("paused", &self.is_paused())
            .finish_non_exhaustive()
    }
}
