//! xcap-backed desktop access
//!
//! Monitor enumeration and rasterization go through the `xcap` crate, which
//! captures whole monitors as RGBA buffers. Arbitrary regions (window
//! rectangles, possibly spanning displays) are composed by capturing every
//! overlapping monitor and blitting the intersections into one RGB buffer of
//! exactly the requested size.
//!
//! Foreground-window identification is platform-specific; on Windows it is
//! answered by the Win32 query in [`super::windows`], elsewhere monitor
//! modes remain available and window mode reports no foreground window.

use image::RgbImage;
use xcap::Monitor;

use super::Desktop;
use crate::error::{CaptureError, CaptureResult};
use crate::model::{MonitorDescriptor, MonitorLayout, Region, WindowDescriptor};

/// Production [`Desktop`] implementation
#[derive(Debug, Default)]
pub struct XcapDesktop {
    _private: (),
}

impl XcapDesktop {
    /// Creates a new desktop handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerates xcap monitors sorted primary-first
    fn monitors() -> CaptureResult<Vec<Monitor>> {
        let mut monitors = Monitor::all().map_err(|e| CaptureError::MonitorEnumeration {
            reason: e.to_string(),
        })?;
        // First enumerated real monitor acts as the primary fallback target
        monitors.sort_by_key(|mon| !mon.is_primary().unwrap_or(false));
        Ok(monitors)
    }

    /// Builds a descriptor for one xcap monitor
    fn describe(id: u32, monitor: &Monitor) -> CaptureResult<MonitorDescriptor> {
        let to_err = |e: xcap::XCapError| CaptureError::MonitorEnumeration {
            reason: e.to_string(),
        };
        Ok(MonitorDescriptor::new(
            id,
            monitor.x().map_err(to_err)?,
            monitor.y().map_err(to_err)?,
            monitor.width().map_err(to_err)?,
            monitor.height().map_err(to_err)?,
        ))
    }
}

impl Desktop for XcapDesktop {
    fn layout(&self) -> CaptureResult<MonitorLayout> {
        let monitors = Self::monitors()?;
        let mut descriptors = Vec::with_capacity(monitors.len());
        for (index, monitor) in monitors.iter().enumerate() {
            descriptors.push(Self::describe(index as u32 + 1, monitor)?);
        }
        tracing::debug!(count = descriptors.len(), "Enumerated monitors");
        Ok(MonitorLayout::from_monitors(descriptors))
    }

    fn foreground_window(&self) -> CaptureResult<Option<WindowDescriptor>> {
        #[cfg(target_os = "windows")]
        {
            super::windows::query_foreground_window()
        }

        #[cfg(not(target_os = "windows"))]
        {
            tracing::debug!("Foreground-window identification is not supported on this platform");
            Ok(None)
        }
    }

    fn grab(&self, region: Region) -> CaptureResult<RgbImage> {
        let monitors = Self::monitors()?;
        let mut output = RgbImage::new(region.width, region.height);
        let mut covered = false;

        for (index, monitor) in monitors.iter().enumerate() {
            let descriptor = Self::describe(index as u32 + 1, monitor)?;
            let Some(overlap) = region.intersect(&descriptor.region()) else {
                continue;
            };

            let frame = monitor
                .capture_image()
                .map_err(|e| CaptureError::GrabFailed {
                    region,
                    reason: e.to_string(),
                })?;

            // The platform may report logical monitor bounds while capturing
            // physical pixels (HiDPI); clamp the blit to what both buffers
            // actually hold.
            let copy_width = overlap
                .width
                .min(frame.width().saturating_sub((overlap.left - descriptor.left) as u32));
            let copy_height = overlap
                .height
                .min(frame.height().saturating_sub((overlap.top - descriptor.top) as u32));

            for dy in 0..copy_height {
                for dx in 0..copy_width {
                    let src_x = (overlap.left - descriptor.left) as u32 + dx;
                    let src_y = (overlap.top - descriptor.top) as u32 + dy;
                    let dst_x = (overlap.left - region.left) as u32 + dx;
                    let dst_y = (overlap.top - region.top) as u32 + dy;

                    let pixel = frame.get_pixel(src_x, src_y);
                    // Normalize RGBA to RGB, dropping alpha
                    output.put_pixel(dst_x, dst_y, image::Rgb([pixel[0], pixel[1], pixel[2]]));
                }
            }
            covered = true;
        }

        if !covered {
            return Err(CaptureError::GrabFailed {
                region,
                reason: "region does not overlap any monitor".to_string(),
            });
        }

        Ok(output)
    }
}
