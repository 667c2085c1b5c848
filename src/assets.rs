use std::collections::HashMap;

use bevy::{asset::AssetLoadFailedEvent, prelude::*};

use crate::{
    config::AssetPaths,
    error::GameError,
    states::{self, Failed, GameState},
};

/// Image handles for every entity kind, held for as long as the scene lives.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteAssets {
    pub player: Handle<Image>,
    pub enemy: Handle<Image>,
    tiles: HashMap<u8, Handle<Image>>,
}

impl SpriteAssets {
    pub fn load(asset_server: &AssetServer, paths: &AssetPaths) -> Self {
        let tiles = paths
            .tiles
            .iter()
            .map(|t| (t.code, asset_server.load(t.path.clone())))
            .collect();
        Self {
            player: asset_server.load(paths.player.clone()),
            enemy: asset_server.load(paths.enemy.clone()),
            tiles,
        }
    }

    pub fn with_tile(mut self, code: u8, handle: Handle<Image>) -> Self {
        self.tiles.insert(code, handle);
        self
    }

    pub fn tile(&self, code: u8) -> Result<Handle<Image>, GameError> {
        self.tiles
            .get(&code)
            .cloned()
            .ok_or(GameError::NoTileImage(code))
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(Update, report_failed_loads);
}

fn report_failed_loads(
    mut failures: EventReader<AssetLoadFailedEvent<Image>>,
    mut failed: ResMut<Failed>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for failure in failures.read() {
        error!("failed to load {}: {}", failure.path, failure.error);
        states::fail(&mut failed, &mut next_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, game};
    use bevy::{
        asset::{io::AssetReaderError, AssetId, AssetLoadError, AssetPath},
        state::app::StatesPlugin,
    };

    #[test]
    fn test_tile_lookup() {
        let assets = SpriteAssets::default().with_tile(1, Handle::default());
        assert!(assets.tile(1).is_ok());
        assert!(matches!(assets.tile(2), Err(GameError::NoTileImage(2))));
    }

    #[test]
    fn test_failed_load_exits_with_error() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_resource(GameConfig {
                frame_rate: 1000,
                ..default()
            })
            .add_event::<AssetLoadFailedEvent<Image>>()
            .add_plugins((game::plugin, plugin));
        app.insert_resource(SpriteAssets::default());

        app.world_mut().send_event(AssetLoadFailedEvent::<Image> {
            id: AssetId::default(),
            path: AssetPath::from("tiles/tile_1.png"),
            error: AssetLoadError::from(AssetReaderError::NotFound("tiles/tile_1.png".into())),
        });
        app.update();
        assert_eq!(app.should_exit(), None);

        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Stopped
        );
        assert_eq!(app.should_exit(), Some(AppExit::error()));
        assert!(!app.world().contains_resource::<SpriteAssets>());
    }
}
