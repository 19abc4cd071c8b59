//! Capture configuration
//!
//! [`CaptureConfig`] is created once at process start and read-only for the
//! process lifetime. Invalid operator input (unknown mode string, malformed
//! hex color) degrades to the documented fallback with a warning instead of
//! aborting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default output directory for screenshots
pub const DEFAULT_OUTPUT_DIR: &str = "./prints";

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Default filename prefix for monitor-mode captures
pub const DEFAULT_FILENAME_PREFIX: &str = "screen";

/// Default pointer marker color (red)
pub const DEFAULT_POINTER_COLOR: [u8; 3] = [0xff, 0x3b, 0x30];

/// Default pointer marker radius in pixels
pub const DEFAULT_POINTER_RADIUS: u32 = 16;

/// Default pointer marker stroke width in pixels
pub const DEFAULT_POINTER_STROKE: u32 = 3;

/// Largest accepted marker radius in pixels
pub const MAX_POINTER_RADIUS: u32 = 512;

/// Largest accepted marker stroke width in pixels
pub const MAX_POINTER_STROKE: u32 = 64;

/// What the engine captures on each qualifying click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// The first enumerated real monitor
    Primary,
    /// The monitor whose rectangle contains the pointer
    Cursor,
    /// Every real monitor, one file per monitor per event
    All,
    /// The foreground window, if it is an allow-listed browser
    Window,
}

impl CaptureMode {
    /// Returns the mode as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Primary => "primary",
            CaptureMode::Cursor => "cursor",
            CaptureMode::All => "all",
            CaptureMode::Window => "window",
        }
    }

    /// Parses a mode string, falling back to `cursor` with a warning
    ///
    /// Configuration errors never abort the process; an unknown mode string
    /// selects the documented default instead.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "primary" => CaptureMode::Primary,
            "cursor" => CaptureMode::Cursor,
            "all" => CaptureMode::All,
            "window" => CaptureMode::Window,
            other => {
                tracing::warn!("Invalid capture mode '{other}', falling back to 'cursor'");
                CaptureMode::Cursor
            }
        }
    }

    /// Whether this mode targets monitors rather than the foreground window
    pub fn is_monitor_mode(&self) -> bool {
        !matches!(self, CaptureMode::Window)
    }
}

impl std::fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pointer-highlight overlay settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerStyle {
    /// Whether to draw the click marker at all
    pub enabled: bool,
    /// Circle radius in pixels
    pub radius: u32,
    /// Stroke width in pixels (outline only, no fill)
    pub stroke: u32,
    /// RGB stroke color
    pub color: [u8; 3],
}

impl PointerStyle {
    /// Builds a style from operator input, clamping oversized dimensions
    ///
    /// The overlay rasterizes a bounding box around the ring, so radius and
    /// stroke are capped at [`MAX_POINTER_RADIUS`] / [`MAX_POINTER_STROKE`]
    /// to keep a typo from turning every capture into a full-buffer scan.
    pub fn from_operator(enabled: bool, radius: u32, stroke: u32, color: [u8; 3]) -> Self {
        let radius = if radius > MAX_POINTER_RADIUS {
            tracing::warn!(
                "Marker radius {radius} exceeds the maximum of {MAX_POINTER_RADIUS}, clamping"
            );
            MAX_POINTER_RADIUS
        } else {
            radius
        };
        let stroke = if stroke > MAX_POINTER_STROKE {
            tracing::warn!(
                "Marker stroke {stroke} exceeds the maximum of {MAX_POINTER_STROKE}, clamping"
            );
            MAX_POINTER_STROKE
        } else {
            stroke
        };
        Self {
            enabled,
            radius,
            stroke,
            color,
        }
    }
}

impl Default for PointerStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: DEFAULT_POINTER_RADIUS,
            stroke: DEFAULT_POINTER_STROKE,
            color: DEFAULT_POINTER_COLOR,
        }
    }
}

/// Parses a `#rrggbb` hex color string
///
/// Accepts an optional leading `#`. Returns `None` for anything that is not
/// exactly six hex digits.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Parses a hex color, falling back to the default red with a warning
pub fn parse_hex_color_or_default(s: &str) -> [u8; 3] {
    parse_hex_color(s).unwrap_or_else(|| {
        tracing::warn!("Invalid pointer color '{s}', falling back to default");
        DEFAULT_POINTER_COLOR
    })
}

/// Immutable process-lifetime capture configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Where PNG files are written; created on demand at startup
    pub output_dir: PathBuf,
    /// Capture mode
    pub mode: CaptureMode,
    /// Minimum interval between accepted captures, in milliseconds
    pub debounce_ms: u64,
    /// Click marker overlay settings
    pub pointer: PointerStyle,
    /// Filename prefix for monitor-mode labels
    pub filename_prefix: String,
    /// Window mode: only capture this browser (case-insensitive name)
    pub browser_filter: Option<String>,
    /// Window mode: only capture when the title contains this substring
    pub title_filter: Option<String>,
    /// Whether the title filter is case-sensitive
    pub title_filter_case_sensitive: bool,
    /// Append a microsecond suffix to filename timestamps
    pub include_micros: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: CaptureMode::Cursor,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            pointer: PointerStyle::default(),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            browser_filter: None,
            title_filter: None,
            title_filter_case_sensitive: false,
            include_micros: false,
        }
    }
}
