//! Target resolution for monitor and window capture modes
//!
//! Pure geometry and filter logic, independent of any OS query: the platform
//! layer supplies fresh [`MonitorLayout`] / [`WindowDescriptor`] values and
//! this module decides what, if anything, gets captured.
//!
//! Monitor modes resolve against the real monitors only; the synthetic
//! virtual-screen entry is never a capture target. Window mode qualifies the
//! foreground window through browser classification and the configured
//! filters; every failing condition is a silent skip, not a failure.

use crate::classify::{self, Browser};
use crate::model::{CapturePoint, MonitorDescriptor, MonitorLayout, Region, SkipReason, WindowDescriptor};

/// Monitor-mode selection, a strict subset of the capture modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorSelection {
    /// First enumerated real monitor
    Primary,
    /// Monitor containing the pointer, falling back to the first
    Cursor,
    /// Every real monitor
    All,
}

/// Finds the monitor whose rectangle contains the pointer
///
/// Containment is half-open on both axes (`left <= x < left + width`), so a
/// pointer on the shared edge of two adjacent monitors resolves to exactly
/// one of them.
pub fn monitor_under_cursor(
    monitors: &[MonitorDescriptor],
    pointer: CapturePoint,
) -> Option<&MonitorDescriptor> {
    monitors.iter().find(|mon| mon.contains(pointer))
}

/// Resolves the list of monitors to capture for one event
///
/// Returns `Err(SkipReason::NoMonitors)` when enumeration found no real
/// displays. In cursor mode a pointer outside every monitor (multi-monitor
/// gaps) falls back to the first real monitor with a warning.
pub fn resolve_monitors<'a>(
    selection: MonitorSelection,
    layout: &'a MonitorLayout,
    pointer: CapturePoint,
) -> Result<Vec<&'a MonitorDescriptor>, SkipReason> {
    let monitors = &layout.monitors;
    let Some(first) = monitors.first() else {
        tracing::warn!("No real monitors detected, skipping capture");
        return Err(SkipReason::NoMonitors);
    };

    let targets = match selection {
        MonitorSelection::Primary => vec![first],
        MonitorSelection::Cursor => match monitor_under_cursor(monitors, pointer) {
            Some(mon) => vec![mon],
            None => {
                tracing::warn!(
                    x = pointer.x,
                    y = pointer.y,
                    "Pointer is outside every monitor, falling back to the primary"
                );
                vec![first]
            }
        },
        MonitorSelection::All => monitors.iter().collect(),
    };

    Ok(targets)
}

/// Window-mode qualification filters
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowFilters<'a> {
    /// Required browser name (case-insensitive), if any
    pub browser: Option<&'a str>,
    /// Required title substring, if any
    pub title: Option<&'a str>,
    /// Whether the title filter compares case-sensitively
    pub title_case_sensitive: bool,
}

/// Qualifies the foreground window for capture
///
/// A window qualifies only when all of the following hold:
///
/// 1. its classification is not [`Browser::NotABrowser`];
/// 2. the classification matches the browser filter, when one is set;
/// 3. the title contains the title filter substring, when one is set;
/// 4. its pixel rectangle has strictly positive width and height.
///
/// Returns the classification and the capture region on success, or the
/// first failing condition as a [`SkipReason`].
pub fn qualify_window(
    window: &WindowDescriptor,
    filters: &WindowFilters<'_>,
) -> Result<(Browser, Region), SkipReason> {
    let browser = classify::classify(&window.class, &window.exe);
    if browser == Browser::NotABrowser {
        return Err(SkipReason::NotABrowser);
    }

    if let Some(filter) = filters.browser {
        if !browser.matches_filter(filter) {
            return Err(SkipReason::BrowserFilterMismatch);
        }
    }

    if let Some(filter) = filters.title {
        let matches = if filters.title_case_sensitive {
            window.title.contains(filter)
        } else {
            window.title.to_lowercase().contains(&filter.to_lowercase())
        };
        if !matches {
            return Err(SkipReason::TitleFilterMismatch);
        }
    }

    let Some(region) = window.region() else {
        tracing::debug!(
            handle = window.handle,
            "Foreground window has a degenerate rectangle, skipping"
        );
        return Err(SkipReason::InvalidWindowGeometry);
    };

    Ok((browser, region))
}
