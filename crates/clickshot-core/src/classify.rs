//! Browser classification for foreground windows
//!
//! Two independent ordered lookup tables drive classification:
//!
//! 1. **Window class → candidate browsers**: several Chromium-based browsers
//!    share the `Chrome_WidgetWin_1` class, so a class can only narrow the
//!    candidate set.
//! 2. **Executable name → exact browser**: the owning process's executable
//!    identifies the browser precisely.
//!
//! The executable lookup takes precedence when both are available: a
//! `Chrome_WidgetWin_1` window owned by `msedge.exe` classifies as Edge, not
//! Chrome. A window whose class is known but whose executable is not in the
//! table classifies as [`Browser::Unknown`] (still a browser, identity
//! undetermined). Everything else is [`Browser::NotABrowser`].
//!
//! The classifier is a pure function over strings and needs no OS access.

use serde::{Deserialize, Serialize};

/// Browser identity derived from window metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    Chrome,
    Edge,
    Brave,
    Firefox,
    /// A browser window whose exact identity could not be determined
    Unknown,
    /// The window does not belong to any recognized browser
    NotABrowser,
}

impl Browser {
    /// Returns the browser name as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Edge => "edge",
            Browser::Brave => "brave",
            Browser::Firefox => "firefox",
            Browser::Unknown => "unknown",
            Browser::NotABrowser => "not_a_browser",
        }
    }

    /// Case-insensitive match against an operator-supplied filter name
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter.trim())
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Window class → candidate browser set
///
/// Ordered, keyed by exact class name. Chromium derivatives share a class,
/// so the value is a candidate set rather than a single identity.
const CLASS_CANDIDATES: &[(&str, &[Browser])] = &[
    ("Chrome_WidgetWin_1", &[Browser::Chrome, Browser::Edge, Browser::Brave]),
    ("MozillaWindowClass", &[Browser::Firefox]),
];

/// Executable name → exact browser
const EXECUTABLE_BROWSERS: &[(&str, Browser)] = &[
    ("chrome.exe", Browser::Chrome),
    ("msedge.exe", Browser::Edge),
    ("brave.exe", Browser::Brave),
    ("firefox.exe", Browser::Firefox),
];

/// Looks up the candidate set for a window class, if the class is known
fn class_candidates(class: &str) -> Option<&'static [Browser]> {
    CLASS_CANDIDATES
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, candidates)| *candidates)
}

/// Looks up the browser for an executable name
///
/// Matches on the trailing path component so both `chrome.exe` and a full
/// path ending in `\chrome.exe` resolve.
fn executable_browser(exe: &str) -> Option<Browser> {
    let exe_lower = exe.to_lowercase();
    EXECUTABLE_BROWSERS
        .iter()
        .find(|(name, _)| exe_lower.ends_with(name))
        .map(|(_, browser)| *browser)
}

/// Classifies a window from its class name and owning executable
///
/// The executable lookup wins whenever it resolves. The class table is
/// consulted only when the executable is unrecognized, and can at best
/// produce [`Browser::Unknown`] since it cannot distinguish Chromium
/// derivatives from one another.
pub fn classify(class: &str, exe: &str) -> Browser {
    if let Some(browser) = executable_browser(exe) {
        return browser;
    }

    if class_candidates(class).is_some() {
        return Browser::Unknown;
    }

    Browser::NotABrowser
}
