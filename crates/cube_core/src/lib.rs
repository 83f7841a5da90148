//! Screensaver host for the bouncing cube.
//!
//! This crate provides:
//! - Settings persistence (`bouncing_cube.json`)
//! - Monitor enumeration into display regions
//! - Per-monitor windows, cameras and cube copies
//! - Run modes and the exit-on-input policy
//! - `ScreensaverPlugin`, which wires all of the above around the
//!   fixed-step simulation from `cube_physics`

use bevy::prelude::*;
use cube_physics::CubeSimulationPlugin;

pub mod displays;
pub mod exit;
pub mod run_mode;
pub mod settings;
pub mod surface;

pub use displays::{DisplayLayout, LayoutEntry, SurfaceSource};
pub use exit::{should_exit, ExitGuard, ExitReason, InputSnapshot, TrackedWindows};
pub use run_mode::{ExitPolicy, RunMode, PREVIEW_SIZE};
pub use settings::{
    default_settings_path, load_settings, load_settings_or_default, save_settings,
    scale_to_slider, size_label, slider_to_scale, CubeSettings, SettingsError, SettingsResult,
};
pub use surface::{project_to_view, CubeAppearance, SimulationConfig, SurfaceCube};

/// Runs the animation in screensaver, standalone or preview mode.
///
/// The app must already have `DefaultPlugins` with the `WindowPlugin` from
/// [`RunMode::window_plugin`].
pub struct ScreensaverPlugin {
    pub mode: RunMode,
    pub settings: CubeSettings,
    /// Fixed RNG seed, for reproducible runs.
    pub seed: Option<u64>,
}

impl Plugin for ScreensaverPlugin {
    fn build(&self, app: &mut App) {
        let config = SimulationConfig {
            mode: self.settings.physics_mode(),
            params: self.settings.step_params(),
            seed: self.seed,
            cube_scale: self.settings.cube_scale,
        };
        info!(
            "Starting in {:?} mode, {:?} physics, half size {:.0}px, celebration {}",
            self.mode,
            config.mode,
            config.params.half_size,
            if config.params.celebration_enabled {
                "on"
            } else {
                "off"
            }
        );

        app.add_plugins(CubeSimulationPlugin::default())
            .insert_resource(self.mode)
            .insert_resource(config)
            .insert_resource(ClearColor(Color::BLACK))
            .init_resource::<DisplayLayout>()
            .init_resource::<ExitGuard>()
            .init_resource::<TrackedWindows>()
            .add_systems(Startup, surface::setup_appearance);

        if self.mode == RunMode::Preview {
            app.add_systems(PreUpdate, displays::sync_preview_layout);
        } else {
            app.add_systems(PreUpdate, displays::sync_monitor_layout);
        }

        app.add_systems(
            Update,
            (
                (surface::rebuild_surfaces, surface::reset_simulation)
                    .run_if(resource_changed::<DisplayLayout>),
                (surface::update_surfaces, surface::update_cube_material),
            )
                .chain(),
        )
        .add_systems(
            Update,
            (exit::exit_on_input, exit::exit_when_windows_closed),
        );
    }
}
