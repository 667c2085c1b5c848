use bevy::{ecs::system::EntityCommands, prelude::*};

use crate::assets::SpriteAssets;

/// Render target handed to anything that draws.
///
/// Callers work in pixel space: origin at the window's top-left corner, y
/// pointing down. The surface maps that onto Bevy's world space, which is
/// centred on the window with y pointing up.
pub struct Surface<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a SpriteAssets,
    size: Vec2,
}

impl<'a, 'w, 's> Surface<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, assets: &'a SpriteAssets, size: Vec2) -> Self {
        Self {
            commands,
            assets,
            size,
        }
    }

    pub fn assets(&self) -> &SpriteAssets {
        self.assets
    }

    /// Spawns a sprite stretched over `bounds`.
    pub fn blit(&mut self, image: Handle<Image>, bounds: Rect, layer: f32) -> EntityCommands<'_> {
        self.commands.spawn(SpriteBundle {
            sprite: Sprite {
                custom_size: Some(bounds.size()),
                ..default()
            },
            texture: image,
            transform: to_world(self.size, bounds, layer),
            ..default()
        })
    }
}

pub fn to_world(surface_size: Vec2, bounds: Rect, layer: f32) -> Transform {
    let center = bounds.center();
    Transform::from_xyz(
        center.x - surface_size.x / 2.0,
        surface_size.y / 2.0 - center.y,
        layer,
    )
}
