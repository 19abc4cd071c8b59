//! Click-triggered screen capture engine
//!
//! Listens for global primary-button presses and turns each qualifying one
//! into annotated PNG screenshots: monitor modes capture displays, window
//! mode captures the foreground browser window. Repeated clicks are
//! debounced, every saved frame carries a pointer marker at the click
//! position, and filenames are sanitized and timestamped.
//!
//! # Platform support
//!
//! Monitor enumeration and frame grabbing work on every platform `xcap`
//! supports. The global click hook is currently Windows-only
//! ([`listener::windows`]); on other platforms the pipeline is fully usable
//! through a custom [`listener::EventSource`], but no OS hook ships yet.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! use clickshot_core::config::CaptureConfig;
//! use clickshot_core::engine::CaptureEngine;
//! use clickshot_core::listener::mock::MockEventSource;
//! use clickshot_core::platform::XcapDesktop;
//!
//! let engine = CaptureEngine::new(CaptureConfig::default(), Arc::new(XcapDesktop::new()));
//! engine.prepare()?;
//!
//! let source = MockEventSource::new();
//! let stop = AtomicBool::new(false);
//! clickshot_core::listener::run_listener(&engine, &source, &stop)?;
//! # Ok::<(), clickshot_core::error::CaptureError>(())
//! ```

pub mod annotate;
pub mod classify;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod listener;
pub mod model;
pub mod persist;
pub mod platform;
pub mod resolve;

pub use config::{CaptureConfig, CaptureMode, PointerStyle};
pub use engine::CaptureEngine;
pub use error::{CaptureError, CaptureResult};
pub use model::{CaptureOutcome, CapturePoint, SavedCapture, SkipReason};
