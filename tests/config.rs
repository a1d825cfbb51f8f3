use std::path::{Path, PathBuf};

use uartplot::persistence::{load_config, parse_config, save_config};
use uartplot::{Error, PlotterConfig, XAxisFormat};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("uartplot-{}-{}", std::process::id(), name))
}

#[test]
fn defaults_match_window_constants() {
    let cfg = PlotterConfig::default();
    assert_eq!(cfg.window.width_seconds, 20.0);
    assert_eq!(cfg.window.min_width, 6.0);
    assert_eq!(cfg.window.max_width, 100.0);
    assert!(cfg.window.auto_follow);
    assert_eq!(cfg.style_slots, 4);
    assert_eq!(cfg.x_axis, XAxisFormat::Seconds);
}

#[test]
fn json_with_missing_fields_uses_defaults() {
    let cfg = parse_config(r#"{"window": {"width_seconds": 45.0}}"#, Path::new("plot.json")).unwrap();
    assert_eq!(cfg.window.width_seconds, 45.0);
    assert_eq!(cfg.window.max_width, 100.0);
    assert_eq!(cfg.title, "UART Plotter");
}

#[test]
fn yaml_is_accepted_for_both_extensions() {
    let text = "title: Bench\nx_axis: wall_clock\nwindow:\n  auto_follow: false\n";
    for name in ["plot.yaml", "plot.YML"] {
        let cfg = parse_config(text, Path::new(name)).unwrap();
        assert_eq!(cfg.title, "Bench");
        assert_eq!(cfg.x_axis, XAxisFormat::WallClock);
        assert!(!cfg.window.auto_follow);
        assert_eq!(cfg.window.width_seconds, 20.0);
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let err = parse_config("{}", Path::new("plot.toml")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedConfigFormat(_)));
    let err = parse_config("{}", Path::new("plot")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedConfigFormat(_)));
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = parse_config("{ not json", Path::new("plot.json")).unwrap_err();
    assert!(matches!(err, Error::ConfigJson(_)));
}

#[test]
fn save_then_load_preserves_settings() {
    let mut cfg = PlotterConfig::default();
    cfg.title = "Saved".to_string();
    cfg.window.width_seconds = 33.0;
    cfg.style_slots = 2;
    cfg.x_axis = XAxisFormat::WallClock;

    for name in ["cfg.json", "cfg.yaml"] {
        let path = temp_path(name);
        save_config(&path, &cfg).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.title, "Saved");
        assert_eq!(loaded.window.width_seconds, 33.0);
        assert_eq!(loaded.style_slots, 2);
        assert_eq!(loaded.x_axis, XAxisFormat::WallClock);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_config(temp_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
