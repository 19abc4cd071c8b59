//! Global pointer-event subscription and dispatch
//!
//! The [`EventSource`] trait abstracts the OS hook: production code installs
//! a low-level mouse hook ([`windows::HookEventSource`] on Windows), tests
//! inject synthetic events through [`mock::MockEventSource`]. Either way the
//! source delivers [`PointerEvent`]s over a channel and [`run_listener`]
//! drives the capture pipeline from them, one event at a time.
//!
//! The loop reacts only to presses of the primary button. A failed capture
//! is logged and never terminates the listener; only the stop flag or a
//! disconnected source ends the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::engine::CaptureEngine;
use crate::error::CaptureResult;
use crate::model::{CaptureOutcome, CapturePoint};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Pointer button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary (usually left) button
    Primary,
    /// The secondary (usually right) button
    Secondary,
    /// The middle button or wheel click
    Middle,
    /// Any other button
    Other,
}

/// One raw pointer-button event in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Which button changed state
    pub button: PointerButton,
    /// `true` on press, `false` on release
    pub pressed: bool,
    /// Global X coordinate at event time
    pub x: i32,
    /// Global Y coordinate at event time
    pub y: i32,
}

impl PointerEvent {
    /// Convenience constructor for a primary-button press
    pub fn primary_press(x: i32, y: i32) -> Self {
        Self {
            button: PointerButton::Primary,
            pressed: true,
            x,
            y,
        }
    }
}

/// Abstracted producer of global pointer events
///
/// `start` installs the underlying hook (or opens the synthetic channel) and
/// hands back the receiving end; `stop` releases all OS resources. Sources
/// are single-use.
pub trait EventSource: Send {
    /// Starts event delivery and returns the receiver
    fn start(&self) -> CaptureResult<Receiver<PointerEvent>>;
    /// Stops event delivery and releases OS resources
    fn stop(&self);
}

/// How often the loop wakes up to check the stop flag
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Runs the capture loop until stopped
///
/// Consumes events from `source`, dispatching every primary-button press
/// through `engine`. Pipeline errors are logged and swallowed; the loop only
/// exits when `stop` is set or the source disconnects. The source is stopped
/// on the way out.
pub fn run_listener(
    engine: &CaptureEngine,
    source: &dyn EventSource,
    stop: &AtomicBool,
) -> CaptureResult<()> {
    let events = source.start()?;
    tracing::info!("Pointer listener started, waiting for clicks");

    while !stop.load(Ordering::SeqCst) {
        let event = match events.recv_timeout(STOP_POLL_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::info!("Event source disconnected, stopping listener");
                break;
            }
        };

        dispatch_event(engine, event);
    }

    source.stop();
    tracing::info!("Pointer listener stopped");
    Ok(())
}

/// Feeds one raw event through the pipeline
///
/// This is the error boundary of the process: anything the pipeline reports
/// is logged here and the listener keeps running.
pub fn dispatch_event(engine: &CaptureEngine, event: PointerEvent) {
    if !event.pressed || event.button != PointerButton::Primary {
        return;
    }

    let point = CapturePoint::new(event.x, event.y);
    match engine.handle_click(point) {
        Ok(CaptureOutcome::Captured(saved)) => {
            for capture in &saved {
                tracing::info!(
                    path = %capture.path.display(),
                    width = capture.width,
                    height = capture.height,
                    target = %capture.target,
                    "Screenshot saved"
                );
            }
        }
        Ok(CaptureOutcome::Skipped(reason)) => {
            tracing::debug!(%reason, x = point.x, y = point.y, "Capture skipped");
        }
        Err(error) => {
            tracing::warn!(%error, x = point.x, y = point.y, "Capture failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use super::mock::MockEventSource;
    use super::*;
    use crate::config::CaptureConfig;
    use crate::engine::CaptureEngine;
    use crate::model::MonitorDescriptor;
    use crate::platform::MockDesktop;

    fn test_engine(dir: &std::path::Path) -> CaptureEngine {
        let config = CaptureConfig {
            output_dir: dir.to_path_buf(),
            debounce_ms: 0,
            include_micros: true, // back-to-back saves must not collide
            ..CaptureConfig::default()
        };
        let desktop = Arc::new(
            MockDesktop::new().with_monitors(vec![MonitorDescriptor::new(1, 0, 0, 640, 480)]),
        );
        let engine = CaptureEngine::new(config, desktop);
        engine.prepare().unwrap();
        engine
    }

    #[test]
    fn test_dispatch_ignores_release_and_secondary() {
        let dir = tempfile::tempdir().unwrap();
        let engine = test_engine(dir.path());

        dispatch_event(
            &engine,
            PointerEvent {
                button: PointerButton::Primary,
                pressed: false,
                x: 10,
                y: 10,
            },
        );
        dispatch_event(
            &engine,
            PointerEvent {
                button: PointerButton::Secondary,
                pressed: true,
                x: 10,
                y: 10,
            },
        );

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_dispatch_primary_press_produces_file() {
        let dir = tempfile::tempdir().unwrap();
        let engine = test_engine(dir.path());

        dispatch_event(&engine, PointerEvent::primary_press(100, 100));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_listener_stops_when_source_disconnects() {
        let dir = tempfile::tempdir().unwrap();
        let engine = test_engine(dir.path());
        let source = MockEventSource::new();
        let stop = AtomicBool::new(false);

        // stop() before the loop ever blocks: the channel is created by
        // start(), so the loop observes an immediate disconnect and returns.
        source.stop();
        run_listener(&engine, &source, &stop).unwrap();
    }

    #[test]
    fn test_run_listener_processes_injected_events() {
        let dir = tempfile::tempdir().unwrap();
        let engine = test_engine(dir.path());
        let source = MockEventSource::new();
        let stop = AtomicBool::new(false);

        source.queue(PointerEvent::primary_press(50, 50));
        source.queue(PointerEvent::primary_press(60, 60));
        // Close the channel so the loop exits after draining
        source.close_after_queued();

        run_listener(&engine, &source, &stop).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_dispatch_survives_pipeline_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = CaptureConfig {
            output_dir: dir.path().to_path_buf(),
            debounce_ms: 0,
            ..CaptureConfig::default()
        };
        let desktop = Arc::new(
            MockDesktop::new()
                .with_monitors(vec![MonitorDescriptor::new(1, 0, 0, 640, 480)])
                .with_failing_grabs(),
        );
        let engine = CaptureEngine::new(config, desktop);
        engine.prepare().unwrap();

        // Must not panic; the error is logged and swallowed
        dispatch_event(&engine, PointerEvent::primary_press(10, 10));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
