//! Settings file round trips through a real filesystem.

use cube_core::settings::{
    load_settings, load_settings_or_default, save_settings, CubeSettings, SettingsError,
    DEFAULT_CUBE_SCALE, MAX_CUBE_SCALE,
};
use tempfile::TempDir;

#[test]
fn test_save_then_load_returns_same_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bouncing_cube.json");

    let mut settings = CubeSettings {
        celebration_enabled: true,
        mirror_mode: true,
        ..Default::default()
    };
    settings.set_slider_position(80);

    save_settings(&settings, &path).unwrap();
    let loaded = load_settings(&path).unwrap();

    assert_eq!(loaded, settings);
    assert_eq!(loaded.slider_position(), 80);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");

    save_settings(&CubeSettings::default(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(load_settings(&path), Err(SettingsError::Io(_))));
    assert_eq!(load_settings_or_default(&path), CubeSettings::default());
}

#[test]
fn test_malformed_file_is_an_error_and_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ cube_scale: nope").unwrap();

    assert!(matches!(load_settings(&path), Err(SettingsError::Json(_))));
    assert_eq!(load_settings_or_default(&path), CubeSettings::default());
}

#[test]
fn test_out_of_range_scale_is_clamped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.json");
    std::fs::write(
        &path,
        r#"{ "cube_scale": 9.0, "celebration_enabled": true, "mirror_mode": false }"#,
    )
    .unwrap();

    assert!(matches!(
        load_settings(&path),
        Err(SettingsError::OutOfRange(_))
    ));

    let loaded = load_settings_or_default(&path);
    assert_eq!(loaded.cube_scale, MAX_CUBE_SCALE);
    assert!(loaded.celebration_enabled, "other fields survive clamping");
}

#[test]
fn test_refuses_to_save_invalid_scale() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    let settings = CubeSettings {
        cube_scale: 0.0,
        ..Default::default()
    };

    assert!(save_settings(&settings, &path).is_err());
    assert!(!path.exists());
    assert_eq!(CubeSettings::default().cube_scale, DEFAULT_CUBE_SCALE);
}
