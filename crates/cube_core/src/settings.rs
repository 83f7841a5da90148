//! Persistent screensaver settings.
//!
//! Three scalars stored as pretty JSON:
//!
//! ```json
//! {
//!   "cube_scale": 0.1,
//!   "celebration_enabled": false,
//!   "mirror_mode": false
//! }
//! ```
//!
//! The file lives next to the executable (`bouncing_cube.json`) unless a
//! path is given on the command line. A missing file means defaults.
//!
//! # Example
//!
//! ```ignore
//! use cube_core::settings::{load_settings_or_default, save_settings, CubeSettings};
//!
//! let mut settings = load_settings_or_default("bouncing_cube.json");
//! settings.set_slider_position(80);
//! save_settings(&settings, "bouncing_cube.json")?;
//! ```

use bevy::prelude::*;
use cube_physics::{PhysicsMode, StepParams};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name used when no path is given.
pub const SETTINGS_FILE_NAME: &str = "bouncing_cube.json";

/// Smallest cube scale (slider at 0).
pub const MIN_CUBE_SCALE: f32 = 0.05;
/// Largest cube scale (slider at 100).
pub const MAX_CUBE_SCALE: f32 = 0.6;
/// Scale used before the user touches the slider.
pub const DEFAULT_CUBE_SCALE: f32 = 0.1;
/// Converts the 3D scale into a half extent in screen pixels.
pub const PIXELS_PER_SCALE_UNIT: f32 = 500.0;

/// Errors that can occur while loading or saving settings.
#[derive(Debug)]
pub enum SettingsError {
    /// File system error
    Io(std::io::Error),
    /// Malformed JSON
    Json(String),
    /// A value outside its valid range
    OutOfRange(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Json(e) => write!(f, "JSON error: {}", e),
            SettingsError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e.to_string())
    }
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// User-adjustable settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeSettings {
    /// Cube half-extent in view units, 0.05..=0.6
    pub cube_scale: f32,
    /// Pulse the cube after a corner hit
    pub celebration_enabled: bool,
    /// Bounce on the primary monitor and mirror it everywhere
    pub mirror_mode: bool,
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            cube_scale: DEFAULT_CUBE_SCALE,
            celebration_enabled: false,
            mirror_mode: false,
        }
    }
}

impl CubeSettings {
    /// Half the cube's edge length in pixels, used for collisions.
    pub fn half_size_pixels(&self) -> f32 {
        self.cube_scale * PIXELS_PER_SCALE_UNIT
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            half_size: self.half_size_pixels(),
            celebration_enabled: self.celebration_enabled,
        }
    }

    pub fn physics_mode(&self) -> PhysicsMode {
        PhysicsMode::from_mirror_flag(self.mirror_mode)
    }

    pub fn slider_position(&self) -> i32 {
        scale_to_slider(self.cube_scale)
    }

    pub fn set_slider_position(&mut self, position: i32) {
        self.cube_scale = slider_to_scale(position);
    }

    /// Reject values the renderer and integrator cannot use.
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.cube_scale.is_finite()
            || !(MIN_CUBE_SCALE..=MAX_CUBE_SCALE).contains(&self.cube_scale)
        {
            return Err(SettingsError::OutOfRange(format!(
                "cube_scale {} not in [{}, {}]",
                self.cube_scale, MIN_CUBE_SCALE, MAX_CUBE_SCALE
            )));
        }
        Ok(())
    }

    /// Copy with `cube_scale` pulled into range (non-finite becomes the default).
    pub fn clamped(mut self) -> Self {
        self.cube_scale = if self.cube_scale.is_finite() {
            self.cube_scale.clamp(MIN_CUBE_SCALE, MAX_CUBE_SCALE)
        } else {
            DEFAULT_CUBE_SCALE
        };
        self
    }
}

/// Slider position (0..=100) to cube scale.
pub fn slider_to_scale(position: i32) -> f32 {
    let position = position.clamp(0, 100);
    MIN_CUBE_SCALE + (position as f32 / 100.0) * (MAX_CUBE_SCALE - MIN_CUBE_SCALE)
}

/// Cube scale to slider position (0..=100), truncating.
pub fn scale_to_slider(scale: f32) -> i32 {
    let position = (scale - MIN_CUBE_SCALE) / (MAX_CUBE_SCALE - MIN_CUBE_SCALE) * 100.0;
    // Nudge past float error so a round trip lands on the same notch.
    ((position + 1e-3) as i32).clamp(0, 100)
}

/// Label shown next to the size slider.
pub fn size_label(position: i32) -> &'static str {
    if position < 25 {
        "Small"
    } else if position < 75 {
        "Medium"
    } else {
        "Large"
    }
}

/// `bouncing_cube.json` beside the running executable, or in the working
/// directory when the executable path is unknown.
pub fn default_settings_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}

/// Load settings from a JSON file.
///
/// Missing keys take their defaults; an out-of-range scale is an error.
pub fn load_settings<P: AsRef<Path>>(path: P) -> SettingsResult<CubeSettings> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let settings: CubeSettings = serde_json::from_reader(reader)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings, falling back to defaults on any problem.
///
/// A missing file is normal (first run); anything else is logged.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> CubeSettings {
    let path = path.as_ref();
    match load_settings(path) {
        Ok(settings) => {
            info!("Loaded settings from {}: {:?}", path.display(), settings);
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No settings at {}, using defaults", path.display());
            CubeSettings::default()
        }
        Err(SettingsError::OutOfRange(msg)) => {
            warn!("Settings at {}: {}; clamping", path.display(), msg);
            read_unvalidated(path)
                .map(CubeSettings::clamped)
                .unwrap_or_default()
        }
        Err(e) => {
            warn!(
                "Failed to load settings from {}: {}; using defaults",
                path.display(),
                e
            );
            CubeSettings::default()
        }
    }
}

fn read_unvalidated(path: &Path) -> SettingsResult<CubeSettings> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Save settings as pretty JSON, creating parent directories as needed.
pub fn save_settings<P: AsRef<Path>>(settings: &CubeSettings, path: P) -> SettingsResult<()> {
    settings.validate()?;

    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, settings)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_endpoints() {
        assert!((slider_to_scale(0) - 0.05).abs() < 1e-6);
        assert!((slider_to_scale(100) - 0.6).abs() < 1e-6);
        assert!((slider_to_scale(50) - 0.325).abs() < 1e-6);
        assert_eq!(slider_to_scale(-10), slider_to_scale(0));
        assert_eq!(slider_to_scale(140), slider_to_scale(100));
    }

    #[test]
    fn test_slider_round_trip() {
        for position in 0..=100 {
            assert_eq!(
                scale_to_slider(slider_to_scale(position)),
                position,
                "position {} did not survive the round trip",
                position
            );
        }
    }

    #[test]
    fn test_default_scale_slider_position() {
        // 0.1 sits about 9% along the slider.
        assert_eq!(scale_to_slider(DEFAULT_CUBE_SCALE), 9);
        assert_eq!(scale_to_slider(0.0), 0);
        assert_eq!(scale_to_slider(5.0), 100);
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(size_label(0), "Small");
        assert_eq!(size_label(24), "Small");
        assert_eq!(size_label(25), "Medium");
        assert_eq!(size_label(74), "Medium");
        assert_eq!(size_label(75), "Large");
        assert_eq!(size_label(100), "Large");
    }

    #[test]
    fn test_half_size_and_params() {
        let settings = CubeSettings {
            cube_scale: 0.2,
            celebration_enabled: true,
            mirror_mode: true,
        };
        assert!((settings.half_size_pixels() - 100.0).abs() < 1e-4);
        assert!(settings.step_params().celebration_enabled);
        assert_eq!(settings.physics_mode(), PhysicsMode::Mirrored);
        assert_eq!(CubeSettings::default().physics_mode(), PhysicsMode::Extended);
    }

    #[test]
    fn test_validate_and_clamp() {
        let too_big = CubeSettings {
            cube_scale: 3.0,
            ..Default::default()
        };
        assert!(matches!(too_big.validate(), Err(SettingsError::OutOfRange(_))));
        assert_eq!(too_big.clamped().cube_scale, MAX_CUBE_SCALE);

        let nan = CubeSettings {
            cube_scale: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
        assert_eq!(nan.clamped().cube_scale, DEFAULT_CUBE_SCALE);

        assert!(CubeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CubeSettings = serde_json::from_str(r#"{ "mirror_mode": true }"#).unwrap();
        assert!(settings.mirror_mode);
        assert_eq!(settings.cube_scale, DEFAULT_CUBE_SCALE);
        assert!(!settings.celebration_enabled);
    }
}
