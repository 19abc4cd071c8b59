//! End-to-end pipeline tests over the mock desktop
//!
//! These drive the public engine API exactly the way the listener does and
//! assert on the actual files written to a temp directory, decoded back to
//! pixels where the content matters.

use std::path::Path;
use std::sync::Arc;

use clickshot_core::config::{CaptureConfig, CaptureMode};
use clickshot_core::engine::CaptureEngine;
use clickshot_core::model::{
    CaptureOutcome, CapturePoint, MonitorDescriptor, SkipReason, WindowDescriptor,
};
use clickshot_core::platform::MockDesktop;

fn two_monitor_desktop() -> MockDesktop {
    MockDesktop::new().with_monitors(vec![
        MonitorDescriptor::new(1, 0, 0, 1920, 1080),
        MonitorDescriptor::new(2, 1920, 0, 1280, 720),
    ])
}

fn chrome_window() -> WindowDescriptor {
    WindowDescriptor {
        handle: 7,
        title: "H2Maps - Google Chrome".to_string(),
        class: "Chrome_WidgetWin_1".to_string(),
        exe: "chrome.exe".to_string(),
        left: 100,
        top: 100,
        right: 900,
        bottom: 700,
    }
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn window_click_writes_annotated_window_sized_png() {
    let dir = tempfile::tempdir().unwrap();
    let desktop = Arc::new(two_monitor_desktop().with_foreground(chrome_window()));
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::Window,
        debounce_ms: 0,
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config.clone(), desktop);
    engine.prepare().unwrap();

    let click = CapturePoint::new(500, 400);
    let outcome = engine.handle_click(click).unwrap();
    let CaptureOutcome::Captured(saved) = outcome else {
        panic!("expected a capture, got {outcome:?}");
    };

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].target, "chrome");
    assert_eq!((saved[0].width, saved[0].height), (800, 600));

    let decoded = image::open(&saved[0].path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (800, 600));

    // The marker ring is centered at the click translated into window
    // coordinates: (500, 400) - (100, 100) = (400, 300). A pixel on the
    // ring at the default radius carries the stroke color.
    let ring = decoded.get_pixel(400 + config.pointer.radius, 300);
    assert_eq!(ring.0, config.pointer.color);
    // The center itself is untouched image content (outline, not a disc)
    let center = decoded.get_pixel(400, 300);
    assert_ne!(center.0, config.pointer.color);
}

#[test]
fn title_filter_mismatch_is_a_silent_skip() {
    let dir = tempfile::tempdir().unwrap();
    let desktop = Arc::new(two_monitor_desktop().with_foreground(chrome_window()));
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::Window,
        debounce_ms: 0,
        title_filter: Some("Other".to_string()),
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config, desktop.clone());
    engine.prepare().unwrap();

    let outcome = engine.handle_click(CapturePoint::new(500, 400)).unwrap();
    assert_eq!(
        outcome,
        CaptureOutcome::Skipped(SkipReason::TitleFilterMismatch)
    );
    assert!(png_files(dir.path()).is_empty());
    assert!(desktop.grabbed_regions().is_empty());
}

#[test]
fn browser_filter_matches_final_classification() {
    let dir = tempfile::tempdir().unwrap();
    // Edge shares the Chromium window class; a chrome filter must reject it
    let mut window = chrome_window();
    window.exe = "msedge.exe".to_string();
    let desktop = Arc::new(two_monitor_desktop().with_foreground(window));
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::Window,
        debounce_ms: 0,
        browser_filter: Some("chrome".to_string()),
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config, desktop);
    engine.prepare().unwrap();

    let outcome = engine.handle_click(CapturePoint::new(500, 400)).unwrap();
    assert_eq!(
        outcome,
        CaptureOutcome::Skipped(SkipReason::BrowserFilterMismatch)
    );
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn all_mode_writes_one_file_per_monitor_with_distinct_indices() {
    let dir = tempfile::tempdir().unwrap();
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::All,
        debounce_ms: 0,
        include_micros: true,
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config, Arc::new(two_monitor_desktop()));
    engine.prepare().unwrap();

    let outcome = engine.handle_click(CapturePoint::new(2000, 300)).unwrap();
    let CaptureOutcome::Captured(saved) = outcome else {
        panic!("expected a capture, got {outcome:?}");
    };
    assert_eq!(saved.len(), 2);

    let names = png_files(dir.path());
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("screen_monitor1_"), "got {names:?}");
    assert!(names[1].starts_with("screen_monitor2_"), "got {names:?}");

    // Each file has its monitor's dimensions
    let first = image::open(dir.path().join(&names[0])).unwrap().to_rgb8();
    let second = image::open(dir.path().join(&names[1])).unwrap().to_rgb8();
    assert_eq!(first.dimensions(), (1920, 1080));
    assert_eq!(second.dimensions(), (1280, 720));
}

#[test]
fn rapid_clicks_are_debounced_to_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::Cursor,
        debounce_ms: 60_000,
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config, Arc::new(two_monitor_desktop()));
    engine.prepare().unwrap();

    let first = engine.handle_click(CapturePoint::new(100, 100)).unwrap();
    assert!(matches!(first, CaptureOutcome::Captured(_)));

    for _ in 0..5 {
        let next = engine.handle_click(CapturePoint::new(100, 100)).unwrap();
        assert_eq!(next, CaptureOutcome::Skipped(SkipReason::Debounced));
    }

    assert_eq!(png_files(dir.path()).len(), 1);
}

#[test]
fn window_title_is_sanitized_in_the_filename() {
    let dir = tempfile::tempdir().unwrap();
    let mut window = chrome_window();
    window.title = "My Page: Test? - Google Chrome".to_string();
    let desktop = Arc::new(two_monitor_desktop().with_foreground(window));
    let config = CaptureConfig {
        output_dir: dir.path().to_path_buf(),
        mode: CaptureMode::Window,
        debounce_ms: 0,
        ..CaptureConfig::default()
    };
    let engine = CaptureEngine::new(config, desktop);
    engine.prepare().unwrap();

    engine.handle_click(CapturePoint::new(500, 400)).unwrap();

    let names = png_files(dir.path());
    assert_eq!(names.len(), 1);
    assert!(
        names[0].starts_with("My_Page__Test__-_Google_Chrome_"),
        "got {}",
        names[0]
    );
    assert!(names[0].ends_with(".png"));
}
