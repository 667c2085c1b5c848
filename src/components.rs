use bevy::prelude::*;

use crate::{assets::SpriteAssets, config::ActorCfg, consts::*, error::GameError, surface::Surface};

/// Tags everything spawned for the current scene so shutdown can release it.
#[derive(Component, Default)]
pub struct SceneEntity;

/// A visual entity with a fixed image and an axis-aligned bounding box in
/// pixel space.
pub trait Drawable: Component + Clone {
    fn bounds(&self) -> Rect;

    fn position(&self) -> Vec2 {
        self.bounds().min
    }

    fn layer(&self) -> f32;

    fn image(&self, assets: &SpriteAssets) -> Result<Handle<Image>, GameError>;

    fn name(&self) -> Name;

    /// Per-frame hook. Movement, animation and AI would go here.
    fn update(&mut self) {}

    fn draw(&self, surface: &mut Surface) -> Result<Entity, GameError> {
        let image = self.image(surface.assets())?;
        let entity = surface
            .blit(image, self.bounds(), self.layer())
            .insert((self.clone(), self.name(), SceneEntity))
            .id();
        Ok(entity)
    }
}

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct Tile {
    /// Column and row in the level grid.
    pub cell: UVec2,
    pub kind: u8,
    pub bounds: Rect,
}

impl Tile {
    pub fn new(cell: UVec2, kind: u8, size: u32) -> Self {
        let position = cell.as_vec2() * size as f32;
        Self {
            cell,
            kind,
            bounds: Rect::from_corners(position, position + Vec2::splat(size as f32)),
        }
    }
}

impl Drawable for Tile {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn layer(&self) -> f32 {
        TILE_LAYER
    }

    fn image(&self, assets: &SpriteAssets) -> Result<Handle<Image>, GameError> {
        assets.tile(self.kind)
    }

    fn name(&self) -> Name {
        Name::new(format!("Tile {} ({}, {})", self.kind, self.cell.x, self.cell.y))
    }
}

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct Player {
    pub bounds: Rect,
    pub health: i32,
    pub speed: i32,
}

impl Player {
    pub fn new(position: Vec2, cfg: &ActorCfg) -> Self {
        Self {
            bounds: Rect::from_corners(position, position + cfg.size()),
            health: cfg.health,
            speed: cfg.speed,
        }
    }
}

impl Drawable for Player {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn layer(&self) -> f32 {
        PLAYER_LAYER
    }

    fn image(&self, assets: &SpriteAssets) -> Result<Handle<Image>, GameError> {
        Ok(assets.player.clone())
    }

    fn name(&self) -> Name {
        Name::from("Player")
    }
}

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct Enemy {
    pub bounds: Rect,
    pub health: i32,
    pub speed: i32,
}

impl Enemy {
    pub fn new(position: Vec2, cfg: &ActorCfg) -> Self {
        Self {
            bounds: Rect::from_corners(position, position + cfg.size()),
            health: cfg.health,
            speed: cfg.speed,
        }
    }
}

impl Drawable for Enemy {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn layer(&self) -> f32 {
        ENEMY_LAYER
    }

    fn image(&self, assets: &SpriteAssets) -> Result<Handle<Image>, GameError> {
        Ok(assets.enemy.clone())
    }

    fn name(&self) -> Name {
        Name::from("Enemy")
    }
}
