//! How the program was launched and what that implies for windows and input.

use bevy::prelude::*;
use bevy::window::{ExitCondition, WindowResolution};

/// Size of the preview window.
pub const PREVIEW_SIZE: UVec2 = UVec2::new(320, 240);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Launched by the OS as a screensaver; any input ends it.
    Screensaver,
    /// Run by hand; only Escape ends it.
    #[default]
    Standalone,
    /// Small thumbnail window; input is ignored.
    Preview,
    /// Settings dialog only.
    Configure,
}

/// Which input ends the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    AnyInput,
    EscapeOnly,
    Never,
}

impl RunMode {
    pub fn exit_policy(self) -> ExitPolicy {
        match self {
            RunMode::Screensaver => ExitPolicy::AnyInput,
            RunMode::Standalone => ExitPolicy::EscapeOnly,
            RunMode::Preview | RunMode::Configure => ExitPolicy::Never,
        }
    }

    /// One borderless fullscreen window per monitor.
    pub fn is_fullscreen(self) -> bool {
        matches!(self, RunMode::Screensaver | RunMode::Standalone)
    }

    /// The `WindowPlugin` for this mode.
    ///
    /// Fullscreen modes start with no window at all; surfaces are spawned
    /// once monitors are known, and the app decides itself when to quit.
    pub fn window_plugin(self) -> WindowPlugin {
        match self {
            RunMode::Screensaver | RunMode::Standalone => WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            },
            RunMode::Preview => WindowPlugin {
                primary_window: Some(Window {
                    title: "Bouncing Cube Preview".into(),
                    resolution: WindowResolution::new(PREVIEW_SIZE.x, PREVIEW_SIZE.y),
                    resizable: false,
                    ..default()
                }),
                ..default()
            },
            RunMode::Configure => WindowPlugin {
                primary_window: Some(Window {
                    title: "Bouncing Cube Settings".into(),
                    resolution: WindowResolution::new(420, 220),
                    resizable: false,
                    ..default()
                }),
                ..default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_policies() {
        assert_eq!(RunMode::Screensaver.exit_policy(), ExitPolicy::AnyInput);
        assert_eq!(RunMode::Standalone.exit_policy(), ExitPolicy::EscapeOnly);
        assert_eq!(RunMode::Preview.exit_policy(), ExitPolicy::Never);
    }

    #[test]
    fn test_fullscreen_modes_have_no_primary_window() {
        for mode in [RunMode::Screensaver, RunMode::Standalone] {
            assert!(mode.is_fullscreen());
            let plugin = mode.window_plugin();
            assert!(plugin.primary_window.is_none());
            assert!(matches!(plugin.exit_condition, ExitCondition::DontExit));
        }

        let preview = RunMode::Preview.window_plugin();
        let window = preview.primary_window.expect("preview has a window");
        assert_eq!(window.resolution.physical_width(), PREVIEW_SIZE.x);
    }
}
