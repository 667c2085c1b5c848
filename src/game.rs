use bevy::{
    input::InputSystem, prelude::*, transform::TransformSystem, window::WindowCloseRequested,
};

use crate::{
    assets::SpriteAssets,
    components::{Drawable, Enemy, Player, SceneEntity, Tile},
    config::GameConfig,
    frame_limiter,
    level::Level,
    states::{self, game_running, Failed, GameState},
    surface,
};

#[derive(Resource, Debug, Default)]
pub struct LoopStats {
    pub frames: u64,
}

pub fn plugin(app: &mut App) {
    app.add_plugins((states::plugin, frame_limiter::plugin))
        .add_event::<WindowCloseRequested>()
        .init_resource::<LoopStats>()
        .add_systems(
            PreUpdate,
            poll_quit_signals
                .after(InputSystem)
                .run_if(in_state(GameState::Running)),
        )
        .add_systems(OnEnter(GameState::Stopped), shut_down)
        .add_systems(
            Update,
            (
                update_entities::<Tile>,
                update_entities::<Player>,
                update_entities::<Enemy>,
            )
                .run_if(game_running),
        )
        .add_systems(
            PostUpdate,
            (
                (
                    sync_transforms::<Tile>,
                    sync_transforms::<Player>,
                    sync_transforms::<Enemy>,
                ),
                count_frame,
            )
                .chain()
                .before(TransformSystem::TransformPropagate)
                .run_if(game_running),
        );
}

fn poll_quit_signals(
    mut close_requests: EventReader<WindowCloseRequested>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let closed = close_requests.read().count() > 0;
    let escaped = keys.is_some_and(|keys| keys.just_pressed(KeyCode::Escape));
    if closed || escaped {
        info!("Quit requested");
        next_state.set(GameState::Stopped);
    }
}

fn shut_down(
    mut commands: Commands,
    scene: Query<Entity, With<SceneEntity>>,
    stats: Res<LoopStats>,
    failed: Res<Failed>,
    mut exit: EventWriter<AppExit>,
) {
    for entity in &scene {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<Level>();
    commands.remove_resource::<SpriteAssets>();
    info!("Game stopped after {} frames", stats.frames);
    exit.send(if failed.0 {
        AppExit::error()
    } else {
        AppExit::Success
    });
}

fn update_entities<T: Drawable>(mut query: Query<&mut T>) {
    for mut entity in &mut query {
        entity.update();
    }
}

fn sync_transforms<T: Drawable>(
    config: Res<GameConfig>,
    mut query: Query<(&T, &mut Transform, &mut Sprite)>,
) {
    let size = config.window.size();
    for (entity, mut transform, mut sprite) in &mut query {
        let bounds = entity.bounds();
        let target = surface::to_world(size, bounds, entity.layer());
        if transform.translation != target.translation {
            transform.translation = target.translation;
        }
        if sprite.custom_size != Some(bounds.size()) {
            sprite.custom_size = Some(bounds.size());
        }
    }
}

fn count_frame(mut stats: ResMut<LoopStats>) {
    stats.frames += 1;
}
