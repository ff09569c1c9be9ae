//! Integration tests: image file on disk → selection → report, and the interactive
//! app state driven by key events.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use simucolormix::mix::PixelColor;
use simucolormix::persistence::config::Config;
use simucolormix::picture::{load_image, Selection, SourceError};
use simucolormix::report::MixReport;
use simucolormix::tui::app::{App, Focus, Message, UPLOAD_PROMPT};

/// 80x60 image: red grows with x, green with y, blue fixed. (50, 50) is (100, 50, 50).
fn gradient() -> RgbImage {
    RgbImage::from_fn(80, 60, |x, y| Rgb([(x * 2) as u8, y as u8, 50]))
}

fn write_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

fn app() -> App {
    App::new(None, Vec::new(), Config::default())
}

/// Draw one frame and return the screen as text, one line per row.
fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_png_pixel_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let img = load_image(&path).unwrap();
    assert_eq!(img.dimensions(), (80, 60));
    assert_eq!(img.pixel_at(50, 50), Some(PixelColor::new(100, 50, 50)));
    assert_eq!(img.pixel_at(3, 7), Some(PixelColor::new(6, 7, 50)));
}

#[test]
fn test_default_selection_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let img = load_image(&path).unwrap();
    let (w, h) = img.dimensions();
    let sel = Selection::for_dimensions(w, h, 50);
    let color = img.pixel_at(sel.x(), sel.y()).unwrap();
    let report = MixReport::new(sel.x(), sel.y(), color);
    assert_eq!(report.hex, "#643232");
    let lines = report.pump_lines();
    assert!(lines[0].ends_with("50.00%"));
    assert!(lines[1].ends_with("25.00%"));
    assert!(lines[2].ends_with("25.00%"));
}

#[test]
fn test_alpha_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alpha.png");
    RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0])).save(&path).unwrap();
    let img = load_image(&path).unwrap();
    assert_eq!(img.pixel_at(0, 0), Some(PixelColor::new(10, 20, 30)));
}

#[test]
fn test_jpeg_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.jpeg");
    RgbImage::from_pixel(16, 16, Rgb([128, 128, 128])).save(&path).unwrap();
    let img = load_image(&path).unwrap();
    let px = img.pixel_at(8, 8).unwrap();
    // Lossy, but a flat gray stays near gray
    assert!(px.channels().iter().all(|c| (*c as i32 - 128).abs() <= 3), "{:?}", px);
}

#[test]
fn test_corrupt_file_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();
    assert!(matches!(load_image(&path), Err(SourceError::Decode { .. })));
}

#[test]
fn test_app_starts_without_image() {
    let app = app();
    assert!(app.loaded.is_none());
    assert_eq!(app.focus, Focus::Path);
}

#[test]
fn test_app_load_via_path_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    type_text(&mut app, &path.to_string_lossy());
    app.handle_key(key(KeyCode::Enter));

    let loaded = app.loaded.as_ref().expect("image should load");
    assert_eq!((loaded.selection.x(), loaded.selection.y()), (50, 50));
    let view = loaded.view.as_ref().unwrap();
    assert_eq!(view.report.color, PixelColor::new(100, 50, 50));
    assert!(view.chart.is_ok());
    assert!(view.swatch.is_ok());
    assert_eq!(app.x_input.text, "50");
    assert_eq!(app.path_input.recent, vec![path.to_string_lossy().to_string()]);
}

#[test]
fn test_app_bad_path_keeps_previous_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    assert!(app.open(&path));
    assert!(!app.open(&dir.path().join("clip.gif")));
    assert!(matches!(app.message, Some(Message::Error(_))));
    assert!(app.loaded.is_some());
}

#[test]
fn test_app_coordinate_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    app.open(&path);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::X);
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.loaded.as_ref().unwrap().selection.x(), 51);
    app.handle_key(key(KeyCode::End));
    assert_eq!(app.loaded.as_ref().unwrap().selection.x(), 79);
    app.handle_key(key(KeyCode::PageUp));
    assert_eq!(app.loaded.as_ref().unwrap().selection.x(), 79);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Y);
    type_text(&mut app, "999");
    app.handle_key(key(KeyCode::Enter));
    let loaded = app.loaded.as_ref().unwrap();
    assert_eq!(loaded.selection.y(), 59);
    assert_eq!(app.y_input.text, "59");

    let view = loaded.view.as_ref().unwrap();
    assert_eq!(view.report.color, PixelColor::new(158, 59, 50));
}

#[test]
fn test_typed_value_commits_on_tab() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    app.open(&path);

    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "0");
    app.handle_key(key(KeyCode::Tab));
    let loaded = app.loaded.as_ref().unwrap();
    assert_eq!(loaded.selection.x(), 0);
    assert_eq!(loaded.view.as_ref().unwrap().report.color, PixelColor::new(0, 50, 50));
}

#[test]
fn test_small_image_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "tiny.png", &RgbImage::from_pixel(5, 3, Rgb([0, 0, 0])));
    let mut app = app();
    app.open(&path);
    let loaded = app.loaded.as_ref().unwrap();
    assert_eq!((loaded.selection.x(), loaded.selection.y()), (4, 2));
    let pumps = loaded.view.as_ref().unwrap().report.pumps;
    assert_eq!(pumps.values(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_focus_stays_on_path_without_image() {
    let mut app = app();
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Path);
}

#[test]
fn test_render_without_image_shows_only_prompt() {
    let mut app = app();
    let text = screen(&mut app, 120, 40);
    assert!(text.contains(UPLOAD_PROMPT));
    assert!(!text.contains("Extracted Color"));
    assert!(!text.contains("Red Pump"));
    assert!(!text.contains("RGB Pump Contribution"));
    assert!(!text.contains("Mixed Output Color"));
}

#[test]
fn test_render_with_image_shows_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    app.open(&path);

    for (width, height) in [(120, 40), (200, 60)] {
        let text = screen(&mut app, width, height);
        assert!(!text.contains(UPLOAD_PROMPT));
        assert!(text.contains("Extracted Color (R, G, B): (100, 50, 50)"), "{}", text);
        assert!(text.contains("#643232"));
        assert!(text.contains("Red Pump: 50.00%"), "{}", text);
        assert!(text.contains("Green Pump: 25.00%"), "{}", text);
        assert!(text.contains("Blue Pump: 25.00%"), "{}", text);
        assert!(text.contains("RGB Pump Contribution"));
        assert!(text.contains("Pump Strength (%)"));
        assert!(text.contains("Mixed Output Color"));
    }
}

#[test]
fn test_render_shows_coordinate_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "grad.png", &gradient());
    let mut app = app();
    app.open(&path);
    let text = screen(&mut app, 120, 40);
    assert!(text.contains("0..79"), "{}", text);
    assert!(text.contains("0..59"), "{}", text);
}

#[test]
fn test_render_long_path_keeps_end_visible() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir
        .path()
        .join("a_rather_long_directory_name_for_holiday_pictures")
        .join("another_long_directory_name_for_the_beach_trip");
    std::fs::create_dir_all(&nested).unwrap();
    let path = write_png(&nested, "sunset_photo.png", &gradient());
    let mut app = app();
    assert!(app.open(&path));
    assert!(path.to_string_lossy().chars().count() > 80);

    // Row 5 is the inside of the path field; the status bar also names the file.
    let text = screen(&mut app, 120, 40);
    let field_row = text.lines().nth(5).unwrap();
    assert!(field_row.contains("sunset_photo.png"), "{}", field_row);
}
