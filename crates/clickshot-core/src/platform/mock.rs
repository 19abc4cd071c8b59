//! Mock desktop for tests
//!
//! Serves a configurable monitor layout and foreground window, and grabs
//! synthetic gradient pixels, so the full pipeline can run without a real
//! windowing system.

use image::RgbImage;
use parking_lot::Mutex;

use super::Desktop;
use crate::error::{CaptureError, CaptureResult};
use crate::model::{MonitorDescriptor, MonitorLayout, Region, WindowDescriptor};

/// Test [`Desktop`] with injectable geometry and windows
///
/// Built with a builder-ish API:
///
/// ```
/// use clickshot_core::model::MonitorDescriptor;
/// use clickshot_core::platform::MockDesktop;
///
/// let desktop = MockDesktop::new()
///     .with_monitors(vec![MonitorDescriptor::new(1, 0, 0, 1920, 1080)]);
/// ```
#[derive(Debug, Default)]
pub struct MockDesktop {
    monitors: Vec<MonitorDescriptor>,
    foreground: Option<WindowDescriptor>,
    grabs: Mutex<Vec<Region>>,
    fail_grabs: bool,
}

impl MockDesktop {
    /// Creates a mock with no monitors and no foreground window
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the monitor list returned by enumeration
    pub fn with_monitors(mut self, monitors: Vec<MonitorDescriptor>) -> Self {
        self.monitors = monitors;
        self
    }

    /// Sets the foreground window
    pub fn with_foreground(mut self, window: WindowDescriptor) -> Self {
        self.foreground = Some(window);
        self
    }

    /// Makes every grab fail, for error-path tests
    pub fn with_failing_grabs(mut self) -> Self {
        self.fail_grabs = true;
        self
    }

    /// Regions grabbed so far, in order
    pub fn grabbed_regions(&self) -> Vec<Region> {
        self.grabs.lock().clone()
    }

    /// Gradient test frame, distinct per coordinate
    fn test_frame(region: Region) -> RgbImage {
        RgbImage::from_fn(region.width, region.height, |x, y| {
            let ratio = y as f32 / region.height.max(1) as f32;
            image::Rgb([(x % 256) as u8, (255.0 * ratio) as u8, 0x40])
        })
    }
}

impl Desktop for MockDesktop {
    fn layout(&self) -> CaptureResult<MonitorLayout> {
        Ok(MonitorLayout::from_monitors(self.monitors.clone()))
    }

    fn foreground_window(&self) -> CaptureResult<Option<WindowDescriptor>> {
        Ok(self.foreground.clone())
    }

    fn grab(&self, region: Region) -> CaptureResult<RgbImage> {
        if self.fail_grabs {
            return Err(CaptureError::GrabFailed {
                region,
                reason: "injected grab failure".to_string(),
            });
        }
        self.grabs.lock().push(region);
        Ok(Self::test_frame(region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CapturePoint;

    #[test]
    fn test_mock_layout_reflects_configuration() {
        let desktop = MockDesktop::new().with_monitors(vec![
            MonitorDescriptor::new(1, 0, 0, 1920, 1080),
            MonitorDescriptor::new(2, 1920, 0, 1920, 1080),
        ]);
        let layout = desktop.layout().unwrap();
        assert_eq!(layout.monitors.len(), 2);
        assert_eq!(layout.virtual_bounds.width, 3840);
    }

    #[test]
    fn test_mock_grab_returns_exact_dimensions() {
        let desktop = MockDesktop::new();
        let frame = desktop.grab(Region::new(100, 100, 800, 600)).unwrap();
        assert_eq!(frame.dimensions(), (800, 600));
        assert_eq!(desktop.grabbed_regions(), vec![Region::new(100, 100, 800, 600)]);
    }

    #[test]
    fn test_mock_failing_grab() {
        let desktop = MockDesktop::new().with_failing_grabs();
        let result = desktop.grab(Region::new(0, 0, 10, 10));
        assert!(matches!(result, Err(CaptureError::GrabFailed { .. })));
    }

    #[test]
    fn test_mock_foreground_window() {
        let window = WindowDescriptor {
            handle: 1,
            title: "Test".to_string(),
            class: "MozillaWindowClass".to_string(),
            exe: "firefox.exe".to_string(),
            left: 0,
            top: 0,
            right: 100,
            bottom: 100,
        };
        let desktop = MockDesktop::new().with_foreground(window.clone());
        assert!(window.region().unwrap().contains(CapturePoint::new(50, 50)));
        assert_eq!(desktop.foreground_window().unwrap(), Some(window));
    }
}
