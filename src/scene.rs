use bevy::prelude::*;
use rand::Rng;

use crate::{
    assets::SpriteAssets,
    components::{Drawable, Enemy, Player, SceneEntity, Tile},
    config::GameConfig,
    error::GameError,
    grid::Grid,
    level::Level,
    states::{self, Failed, GameState},
    surface::Surface,
};

pub fn plugin(app: &mut App) {
    app.register_type::<Tile>()
        .register_type::<Player>()
        .register_type::<Enemy>()
        .add_systems(Startup, setup.pipe(exit_on_error));
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) -> Result<(), GameError> {
    commands.spawn((Camera2dBundle::default(), SceneEntity, Name::from("Camera")));

    let assets = SpriteAssets::load(&asset_server, &config.assets);
    let generator = config.generator()?;
    let mut rng = config.level.rng();
    let grid = match &config.level.layout {
        Some(rows) => Grid::from_rows(rows.clone())?,
        None => generator.generate_with(&mut rng),
    };
    let level = Level::new(grid, config.level.tile_size);

    let enemies = match config.level.max_enemies {
        0 => 0,
        max => rng.gen_range(1..=max) as usize,
    };
    let spawns = generator.pick_empty_cells(level.grid(), enemies.saturating_add(1), &mut rng);

    let mut surface = Surface::new(&mut commands, &assets, config.window.size());
    level.draw(&mut surface)?;

    let mut spawns = spawns.into_iter().map(|cell| level.cell_to_pixel(cell));
    match spawns.next() {
        Some(position) => {
            Player::new(position, &config.player).draw(&mut surface)?;
        }
        None => warn!("No empty cell left for the player"),
    }
    for position in spawns {
        Enemy::new(position, &config.enemy).draw(&mut surface)?;
    }

    info!(
        "Level {}x{} ({} px) with {} tiles",
        level.grid().width(),
        level.grid().height(),
        level.pixel_size(),
        level.tiles().len()
    );
    commands.insert_resource(level);
    commands.insert_resource(assets);
    Ok(())
}

fn exit_on_error(
    In(result): In<Result<(), GameError>>,
    mut failed: ResMut<Failed>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Err(err) = result {
        error!("{err}");
        states::fail(&mut failed, &mut next_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game;
    use bevy::{asset::AssetPlugin, state::app::StatesPlugin};

    fn scene_app(mut config: GameConfig) -> App {
        config.frame_rate = 1000;
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Image>()
            .insert_resource(config)
            .add_plugins((game::plugin, plugin));
        app
    }

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<T>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_setup_spawns_level_and_actors() {
        let mut config = GameConfig::default();
        config.level.seed = Some(9);
        let mut app = scene_app(config);
        app.update();

        let tiles = app.world().resource::<Level>().tiles().len();
        assert_eq!(count::<Tile>(&mut app), tiles);
        assert_eq!(count::<Player>(&mut app), 1);
        let enemies = count::<Enemy>(&mut app);
        assert!((1..=5).contains(&enemies), "{enemies} enemies");
        assert!(app.world().contains_resource::<SpriteAssets>());
        assert_eq!(app.should_exit(), None);

        let level = app.world().resource::<Level>().clone();
        let mut players = app.world_mut().query::<&Player>();
        let player = players.single(app.world());
        let cell = (player.position() / level.tile_size() as f32).as_uvec2();
        assert_eq!(level.grid().get(cell), Some(0));
    }

    #[test]
    fn test_fixed_layout() {
        let mut config = GameConfig::default();
        config.level.layout = Some(vec![vec![0, 1, 0], vec![2, 0, 1]]);
        config.level.max_enemies = 1;
        let mut app = scene_app(config);
        app.update();

        assert_eq!(count::<Tile>(&mut app), 3);
        assert_eq!(count::<Player>(&mut app), 1);
        assert_eq!(count::<Enemy>(&mut app), 1);
    }

    #[test]
    fn test_ragged_layout_exits() {
        let mut config = GameConfig::default();
        config.level.layout = Some(vec![vec![0, 1, 0], vec![2]]);
        let mut app = scene_app(config);
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::error()));
    }

    #[test]
    fn test_missing_tile_image_exits() {
        let mut config = GameConfig::default();
        config.level.seed = Some(9);
        config.assets.tiles.retain(|t| t.code != 2);
        let mut app = scene_app(config);
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::error()));
        assert!(!app.world().contains_resource::<Level>());
        assert_eq!(count::<SceneEntity>(&mut app), 0);
    }

    #[test]
    fn test_huge_enemy_cap() {
        let mut config = GameConfig::default();
        config.level.layout = Some(vec![vec![0, 1, 0], vec![2, 0, 1]]);
        config.level.max_enemies = u32::MAX;
        config.level.seed = Some(4);
        let mut app = scene_app(config);
        app.update();

        assert_eq!(app.should_exit(), None);
        assert_eq!(count::<Player>(&mut app), 1);
        assert!(count::<Enemy>(&mut app) <= 2);
    }
}
