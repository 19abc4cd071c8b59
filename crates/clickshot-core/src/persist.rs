//! Filename construction and atomic PNG persistence
//!
//! Filenames are `<sanitizedLabel>_<timestamp>.png`. Sanitization guarantees
//! a filesystem-safe name on every common platform:
//!
//! - characters `<>:"/\|?*` become underscores
//! - whitespace runs collapse to a single underscore
//! - leading/trailing underscores are trimmed
//! - labels truncate to [`MAX_LABEL_LEN`] characters before the timestamp
//! - an empty result falls back to [`FALLBACK_LABEL`]
//!
//! Saves are all-or-nothing: the PNG is encoded into a temp file in the
//! output directory and renamed into place, so a failed encode or write
//! never leaves a partial file behind as the "successful" result.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::RgbImage;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CaptureError, CaptureResult};

/// Maximum sanitized label length in characters
pub const MAX_LABEL_LEN: usize = 80;

/// Label used when sanitization leaves nothing
pub const FALLBACK_LABEL: &str = "capture";

/// Characters disallowed by common filesystems
static FORBIDDEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("forbidden-char pattern is valid"));

/// Whitespace runs (spaces, tabs, newlines)
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Sanitizes a semantic label into a filesystem-safe filename fragment
///
/// Idempotent: sanitizing an already-sanitized string returns it unchanged.
pub fn sanitize_label(raw: &str) -> String {
    let replaced = FORBIDDEN_CHARS.replace_all(raw, "_");
    let collapsed = WHITESPACE_RUNS.replace_all(&replaced, "_");
    // Truncate before trimming so the final name never ends in an underscore
    let truncated: String = collapsed.chars().take(MAX_LABEL_LEN).collect();
    let trimmed = truncated.trim_matches('_');

    if trimmed.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a filename timestamp for the given local time
fn format_timestamp(now: DateTime<Local>, include_micros: bool) -> String {
    if include_micros {
        now.format("%Y-%m-%d_%H-%M-%S-%6f").to_string()
    } else {
        now.format("%Y-%m-%d_%H-%M-%S").to_string()
    }
}

/// Writes captured frames as uniquely named PNG files
#[derive(Debug, Clone)]
pub struct PersistenceWriter {
    output_dir: PathBuf,
    include_micros: bool,
}

impl PersistenceWriter {
    /// Creates a writer for the given output directory
    pub fn new(output_dir: impl Into<PathBuf>, include_micros: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            include_micros,
        }
    }

    /// The configured output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory (including parents) if absent
    ///
    /// Idempotent; called once before the listener starts. Failure here is
    /// fatal for the process.
    pub fn ensure_output_dir(&self) -> CaptureResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            CaptureError::OutputDirUnavailable {
                path: self.output_dir.display().to_string(),
                source,
            }
        })
    }

    /// Encodes `image` as PNG and atomically writes it under a sanitized,
    /// timestamped name
    ///
    /// Returns the final path of the written file.
    pub fn save_png(&self, image: &RgbImage, label: &str) -> CaptureResult<PathBuf> {
        self.save_png_at(image, label, Local::now())
    }

    /// Like [`save_png`](Self::save_png) with an explicit timestamp, for
    /// deterministic tests
    pub fn save_png_at(
        &self,
        image: &RgbImage,
        label: &str,
        now: DateTime<Local>,
    ) -> CaptureResult<PathBuf> {
        let filename = format!(
            "{}_{}.png",
            sanitize_label(label),
            format_timestamp(now, self.include_micros)
        );
        let path = self.output_dir.join(filename);

        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
            .map_err(|e| CaptureError::EncodingFailed {
                reason: e.to_string(),
            })?;

        // Temp file lives in the output directory so the final rename stays
        // on one filesystem
        let mut tmp = tempfile::NamedTempFile::new_in(&self.output_dir)?;
        tmp.write_all(&encoded)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| CaptureError::IoError(e.error))?;

        tracing::debug!(path = %path.display(), "Screenshot written");
        Ok(path)
    }
}
