//! Settings dialog for the bouncing cube.
//!
//! A single imgui window with the size slider, two checkboxes and
//! OK / Cancel. OK writes the settings file and quits; Cancel just quits.

use bevy::prelude::*;
use bevy_mod_imgui::prelude::*;
use cube_core::settings::{save_settings, size_label, CubeSettings, SettingsResult};
use std::path::PathBuf;

const ERROR_COLOR: [f32; 4] = [1.0, 0.35, 0.35, 1.0];
const OK_BUTTON_COLOR: [f32; 4] = [0.2, 0.5, 0.2, 1.0];

pub struct SettingsDialogPlugin {
    pub settings: CubeSettings,
    pub path: PathBuf,
}

impl Plugin for SettingsDialogPlugin {
    fn build(&self, app: &mut App) {
        info!("Configuring settings at {}", self.path.display());
        app.add_plugins(bevy_mod_imgui::ImguiPlugin::default())
            .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)))
            .insert_resource(SettingsDialogState::new(self.settings, self.path.clone()))
            .add_systems(Startup, spawn_dialog_camera)
            .add_systems(Update, settings_dialog_ui);
    }
}

/// What the user did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Ok,
    Cancel,
}

/// The values being edited, kept separate from the widgets so the
/// confirm/cancel logic can be tested without a UI.
#[derive(Resource, Debug)]
pub struct SettingsDialogState {
    pub slider: i32,
    pub celebration_enabled: bool,
    pub mirror_mode: bool,
    pub path: PathBuf,
    /// Last save failure, shown under the buttons.
    pub error: Option<String>,
    original: CubeSettings,
}

impl SettingsDialogState {
    pub fn new(settings: CubeSettings, path: PathBuf) -> Self {
        Self {
            slider: settings.slider_position(),
            celebration_enabled: settings.celebration_enabled,
            mirror_mode: settings.mirror_mode,
            path,
            error: None,
            original: settings,
        }
    }

    /// Settings as currently shown.
    ///
    /// An untouched slider keeps the stored scale exactly instead of
    /// snapping it to the nearest notch.
    pub fn draft(&self) -> CubeSettings {
        let mut settings = CubeSettings {
            celebration_enabled: self.celebration_enabled,
            mirror_mode: self.mirror_mode,
            ..self.original
        };
        if self.slider != self.original.slider_position() {
            settings.set_slider_position(self.slider);
        }
        settings
    }

    pub fn size_label(&self) -> &'static str {
        size_label(self.slider)
    }

    /// Save the draft. On failure the error is kept for display.
    pub fn confirm(&mut self) -> SettingsResult<CubeSettings> {
        let settings = self.draft();
        match save_settings(&settings, &self.path) {
            Ok(()) => {
                self.error = None;
                Ok(settings)
            }
            Err(e) => {
                error!("Failed to save settings to {}: {}", self.path.display(), e);
                self.error = Some(format!("Could not save settings: {}", e));
                Err(e)
            }
        }
    }

    /// Handle a button press; returns true when the dialog should close.
    pub fn apply(&mut self, action: DialogAction) -> bool {
        match action {
            DialogAction::None => false,
            DialogAction::Cancel => {
                info!("Settings dialog cancelled");
                true
            }
            DialogAction::Ok => self.confirm().is_ok(),
        }
    }
}

fn spawn_dialog_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn settings_dialog_ui(
    mut context: NonSendMut<ImguiContext>,
    mut state: ResMut<SettingsDialogState>,
    mut exit: MessageWriter<AppExit>,
) {
    let ui = context.ui();
    let mut action = DialogAction::None;

    ui.window("Bouncing Cube Settings")
        .position([0.0, 0.0], Condition::FirstUseEver)
        .size([420.0, 220.0], Condition::FirstUseEver)
        .movable(false)
        .collapsible(false)
        .build(|| {
            let label = state.size_label();
            ui.text("Cube size");
            ui.slider("##size", 0, 100, &mut state.slider);
            ui.same_line();
            ui.text(label);

            ui.separator();
            ui.checkbox("Celebrate corner hits", &mut state.celebration_enabled);
            ui.checkbox(
                "Mirror mode (same view on every monitor)",
                &mut state.mirror_mode,
            );

            ui.separator();
            {
                let _color_token =
                    ui.push_style_color(imgui::StyleColor::Button, OK_BUTTON_COLOR);
                if ui.button_with_size("OK", [80.0, 0.0]) {
                    action = DialogAction::Ok;
                }
            }
            ui.same_line();
            if ui.button_with_size("Cancel", [80.0, 0.0]) {
                action = DialogAction::Cancel;
            }

            if let Some(error) = &state.error {
                ui.text_colored(ERROR_COLOR, error);
            }
        });

    if state.apply(action) {
        exit.write(AppExit::Success);
    }
}
