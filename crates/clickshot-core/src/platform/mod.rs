//! Platform access for monitors, the foreground window, and raw pixels
//!
//! The [`Desktop`] trait is the seam between the pure pipeline logic and the
//! operating system. Production code uses [`XcapDesktop`]; tests run the
//! entire pipeline against [`MockDesktop`] without touching a real windowing
//! system.
//!
//! Descriptors are queried fresh per call, never cached: displays and
//! windows can change between clicks.

use image::RgbImage;

use crate::error::CaptureResult;
use crate::model::{MonitorLayout, Region, WindowDescriptor};

pub mod desktop;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

pub use desktop::XcapDesktop;
pub use mock::MockDesktop;

/// Access to screen geometry and pixels
pub trait Desktop: Send + Sync {
    /// Enumerates the current monitors
    ///
    /// The returned layout lists real displays (primary first) plus the
    /// synthetic virtual-screen bounding box; an empty monitor list means no
    /// display was detected.
    fn layout(&self) -> CaptureResult<MonitorLayout>;

    /// Reads the current foreground window, if any
    ///
    /// Returns `Ok(None)` when no window has focus or when the platform
    /// cannot identify foreground windows.
    fn foreground_window(&self) -> CaptureResult<Option<WindowDescriptor>>;

    /// Rasterizes a rectangular region of the virtual screen
    ///
    /// The result has exactly `region.width x region.height` pixels in RGB
    /// order regardless of the platform's native buffer format. Fails
    /// explicitly when the region cannot be captured; it never silently
    /// yields a corrupt image.
    fn grab(&self, region: Region) -> CaptureResult<RgbImage>;
}
