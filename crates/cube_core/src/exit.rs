//! Ending the animation on user input or when its windows go away.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::WindowClosed;

use crate::run_mode::{ExitPolicy, RunMode};

/// Per-frame mouse movement (pixels) ignored as sensor jitter.
pub const MOUSE_JITTER_PIXELS: f32 = 4.0;
/// Mouse movement is ignored for this long after start-up; the OS often
/// reports a synthetic move when the screensaver windows appear.
pub const MOUSE_GRACE_SECONDS: f32 = 0.5;

/// Input seen during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub escape_pressed: bool,
    pub any_key_pressed: bool,
    pub any_mouse_button_pressed: bool,
    pub mouse_delta: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Escape,
    Key,
    MouseButton,
    MouseMotion,
}

/// Decide whether this frame's input ends the program.
///
/// `mouse_armed` is false during the start-up grace period.
pub fn should_exit(
    policy: ExitPolicy,
    input: &InputSnapshot,
    mouse_armed: bool,
) -> Option<ExitReason> {
    match policy {
        ExitPolicy::Never => None,
        ExitPolicy::EscapeOnly => input.escape_pressed.then_some(ExitReason::Escape),
        ExitPolicy::AnyInput => {
            if input.escape_pressed {
                Some(ExitReason::Escape)
            } else if input.any_key_pressed {
                Some(ExitReason::Key)
            } else if input.any_mouse_button_pressed {
                Some(ExitReason::MouseButton)
            } else if mouse_armed && input.mouse_delta.length() > MOUSE_JITTER_PIXELS {
                Some(ExitReason::MouseMotion)
            } else {
                None
            }
        }
    }
}

/// Time since start, for the mouse grace period.
#[derive(Resource, Debug, Default)]
pub struct ExitGuard {
    pub elapsed: f32,
}

impl ExitGuard {
    pub fn mouse_armed(&self) -> bool {
        self.elapsed >= MOUSE_GRACE_SECONDS
    }
}

/// Windows whose closing should end the program.
#[derive(Resource, Debug, Default)]
pub struct TrackedWindows {
    pub windows: Vec<Entity>,
}

pub fn exit_on_input(
    mode: Res<RunMode>,
    time: Res<Time>,
    mut guard: ResMut<ExitGuard>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut exit: MessageWriter<AppExit>,
) {
    guard.elapsed += time.delta_secs();

    let input = InputSnapshot {
        escape_pressed: keys.just_pressed(KeyCode::Escape),
        any_key_pressed: keys.get_just_pressed().next().is_some(),
        any_mouse_button_pressed: buttons.get_just_pressed().next().is_some(),
        mouse_delta: motion.delta,
    };

    if let Some(reason) = should_exit(mode.exit_policy(), &input, guard.mouse_armed()) {
        info!("Exiting: {:?}", reason);
        exit.write(AppExit::Success);
    }
}

/// Quit once every tracked window has been closed.
///
/// Windows replaced during a layout rebuild are dropped from the tracked
/// set before they close, so only user-closed windows count here.
pub fn exit_when_windows_closed(
    mut closed: MessageReader<WindowClosed>,
    mut tracked: ResMut<TrackedWindows>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut any_removed = false;
    for event in closed.read() {
        let before = tracked.windows.len();
        tracked.windows.retain(|&w| w != event.window);
        any_removed |= tracked.windows.len() != before;
    }

    if any_removed && tracked.windows.is_empty() {
        info!("All windows closed, exiting");
        exit.write(AppExit::Success);
    }
}
