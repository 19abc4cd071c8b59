//! Data models for the capture engine
//!
//! Core types shared across the pipeline:
//! - Screen geometry ([`CapturePoint`], [`Region`], [`MonitorDescriptor`],
//!   [`MonitorLayout`])
//! - Foreground window metadata ([`WindowDescriptor`])
//! - Per-event pipeline outcomes ([`CaptureOutcome`], [`SkipReason`],
//!   [`SavedCapture`])
//!
//! Monitor and window descriptors are queried fresh on every event and never
//! cached across events, since displays and windows can change between
//! clicks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Global screen coordinates of a triggering click
///
/// One instance per pointer event, immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePoint {
    /// X coordinate in the virtual-screen coordinate space
    pub x: i32,
    /// Y coordinate in the virtual-screen coordinate space
    pub y: i32,
}

impl CapturePoint {
    /// Creates a new capture point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangular region in global screen coordinates
///
/// `left`/`top` may be negative on multi-monitor setups where displays sit
/// left of or above the primary. `width`/`height` are always positive for a
/// valid region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge in global coordinates
    pub left: i32,
    /// Top edge in global coordinates
    pub top: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Creates a new region
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    /// Half-open containment check: `left <= x < right`, `top <= y < bottom`
    pub fn contains(&self, point: CapturePoint) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Returns the overlap of two regions, or `None` when they are disjoint
    pub fn intersect(&self, other: &Region) -> Option<Region> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Region::new(
            left,
            top,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Describes one physical display in the virtual-screen coordinate space
///
/// Real monitor ids start at 1; id 0 is reserved for the synthetic
/// virtual-screen entry tracked separately in [`MonitorLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorDescriptor {
    /// Stable index within the current enumeration (1-based)
    pub id: u32,
    /// Left edge in global coordinates
    pub left: i32,
    /// Top edge in global coordinates
    pub top: i32,
    /// Width in pixels (> 0)
    pub width: u32,
    /// Height in pixels (> 0)
    pub height: u32,
}

impl MonitorDescriptor {
    /// Creates a new monitor descriptor
    pub fn new(id: u32, left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            id,
            left,
            top,
            width,
            height,
        }
    }

    /// The monitor's rectangle as a capture region
    pub fn region(&self) -> Region {
        Region::new(self.left, self.top, self.width, self.height)
    }

    /// Half-open containment check for the pointer position
    pub fn contains(&self, point: CapturePoint) -> bool {
        self.region().contains(point)
    }
}

/// Result of a monitor enumeration
///
/// `virtual_bounds` is the union rectangle spanning all physical monitors.
/// It exists only for enumeration and diagnostics and is never itself a
/// capture target. `monitors` holds the real displays; when it is empty no
/// display was detected and monitor-mode capture must abort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorLayout {
    /// Synthetic bounding box over all real monitors
    pub virtual_bounds: Region,
    /// Real displays, ids starting at 1, first entry is the primary
    pub monitors: Vec<MonitorDescriptor>,
}

impl MonitorLayout {
    /// Builds a layout from real monitors, computing the virtual bounding box
    pub fn from_monitors(monitors: Vec<MonitorDescriptor>) -> Self {
        let virtual_bounds = match monitors.split_first() {
            None => Region::new(0, 0, 0, 0),
            Some((first, rest)) => {
                let mut left = first.left;
                let mut top = first.top;
                let mut right = first.region().right();
                let mut bottom = first.region().bottom();
                for mon in rest {
                    left = left.min(mon.left);
                    top = top.min(mon.top);
                    right = right.max(mon.region().right());
                    bottom = bottom.max(mon.region().bottom());
                }
                Region::new(left, top, (right - left) as u32, (bottom - top) as u32)
            }
        };

        Self {
            virtual_bounds,
            monitors,
        }
    }
}

/// Metadata of the foreground window at event time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    /// Native window handle (opaque; used only for logging)
    pub handle: isize,
    /// Window title
    pub title: String,
    /// Window class name
    pub class: String,
    /// Executable name of the owning process (e.g. "chrome.exe")
    pub exe: String,
    /// Left edge of the window rectangle
    pub left: i32,
    /// Top edge of the window rectangle
    pub top: i32,
    /// Right edge of the window rectangle
    pub right: i32,
    /// Bottom edge of the window rectangle
    pub bottom: i32,
}

impl WindowDescriptor {
    /// The window's pixel rectangle, or `None` when the OS-reported bounds
    /// are degenerate (`right <= left` or `bottom <= top`)
    pub fn region(&self) -> Option<Region> {
        if self.right <= self.left || self.bottom <= self.top {
            return None;
        }
        Some(Region::new(
            self.left,
            self.top,
            (self.right - self.left) as u32,
            (self.bottom - self.top) as u32,
        ))
    }
}

/// Why a pointer event produced no capture
///
/// Skips are expected outcomes, not failures: the listener logs them at
/// debug level and keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Capture is paused by the operator
    Paused,
    /// The event fell inside the debounce window
    Debounced,
    /// Monitor enumeration found no real displays
    NoMonitors,
    /// No foreground window exists (e.g. desktop focus)
    NoForegroundWindow,
    /// The foreground window is not a recognized browser
    NotABrowser,
    /// The classification does not match the configured browser filter
    BrowserFilterMismatch,
    /// The window title does not contain the configured filter substring
    TitleFilterMismatch,
    /// The window rectangle has no positive area
    InvalidWindowGeometry,
}

impl SkipReason {
    /// Returns the reason as a lowercase string for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Paused => "paused",
            SkipReason::Debounced => "debounced",
            SkipReason::NoMonitors => "no_monitors",
            SkipReason::NoForegroundWindow => "no_foreground_window",
            SkipReason::NotABrowser => "not_a_browser",
            SkipReason::BrowserFilterMismatch => "browser_filter_mismatch",
            SkipReason::TitleFilterMismatch => "title_filter_mismatch",
            SkipReason::InvalidWindowGeometry => "invalid_window_geometry",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One successfully written screenshot file
///
/// Produced per save and used only for logging; the engine retains no
/// capture history beyond the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCapture {
    /// Path of the written PNG
    pub path: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Capture target description (monitor index or browser name)
    pub target: String,
}

/// Outcome of one pointer event run through the pipeline
///
/// Hard failures (grab errors, I/O errors) travel separately as
/// `Err(CaptureError)` so callers can always tell *why* a capture did not
/// happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// One file per resolved target was written
    Captured(Vec<SavedCapture>),
    /// The event was deliberately ignored
    Skipped(SkipReason),
}
