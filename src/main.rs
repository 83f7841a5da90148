use bevy::prelude::*;
use cube_core::{default_settings_path, load_settings_or_default, RunMode, ScreensaverPlugin};
use cube_settings_ui::SettingsDialogPlugin;

mod cli;

use cli::Cli;

fn main() -> AppExit {
    let cli = Cli::parse_normalized(std::env::args_os());
    let mode = cli.run_mode();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(mode.window_plugin()));

    // Loaded after DefaultPlugins so the outcome is logged.
    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = load_settings_or_default(&settings_path);

    if let Some(Some(id)) = cli.preview.as_ref().or(cli.configure.as_ref()) {
        debug!("Ignoring parent window id {}", id);
    }

    match mode {
        RunMode::Configure => {
            app.add_plugins(SettingsDialogPlugin {
                settings,
                path: settings_path,
            });
        }
        RunMode::Screensaver | RunMode::Standalone | RunMode::Preview => {
            if cli.mirror {
                settings.mirror_mode = true;
            }
            app.add_plugins(ScreensaverPlugin {
                mode,
                settings,
                seed: cli.seed,
            });
        }
    }

    app.run()
}
