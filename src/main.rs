use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

#[cfg(not(target_arch = "wasm32"))]
use bevy_inspector_egui::quick::WorldInspectorPlugin;

mod assets;
mod components;
mod config;
mod consts;
mod error;
mod frame_limiter;
mod game;
mod generator;
mod grid;
mod level;
mod scene;
mod states;
mod surface;

use crate::config::GameConfig;
use crate::consts::*;
use crate::error::GameError;

fn load_config() -> Result<GameConfig, GameError> {
    let config = GameConfig::load(CONFIG_PATH)?;
    config.assets.verify()?;
    Ok(config)
}

fn main() -> AppExit {
    // Nothing is logging yet, so report straight to stderr.
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    resizable: false,
                    resolution: WindowResolution::new(config.window.width, config.window.height),
                    ..default()
                }),
                close_when_requested: false,
                ..default()
            })
            .set(AssetPlugin {
                file_path: config.assets.root.to_string_lossy().into_owned(),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .insert_resource(ClearColor(config.window.clear_color()));

    if config.diagnostics {
        app.add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()));
    }

    app.insert_resource(config)
        .add_plugins((game::plugin, assets::plugin, scene::plugin));

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(WorldInspectorPlugin::new().run_if(
        bevy::input::common_conditions::input_toggle_active(false, KeyCode::Backquote),
    ));

    app.run()
}
