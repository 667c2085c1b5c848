pub const CONFIG_PATH: &str = "config.toml";

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const WINDOW_TITLE: &str = "My Game";
pub const BACKGROUND: [u8; 3] = [0, 0, 0];
pub const FRAME_RATE: u32 = 60;

pub const TILE_SIZE: u32 = 32;
pub const LEVEL_WIDTH: i32 = 25;
pub const LEVEL_HEIGHT: i32 = 18;
pub const MAX_ENEMIES: u32 = 5;

/// Tile-type codes drawn by the generator are `0..=MAX_TILE_CODE`.
pub const MAX_TILE_CODE: u8 = 2;
pub const EMPTY_TILE: u8 = 0;

pub const PLAYER_HEALTH: i32 = 100;
pub const PLAYER_SPEED: i32 = 5;
pub const ENEMY_HEALTH: i32 = 50;
pub const ENEMY_SPEED: i32 = 2;
pub const SPRITE_WIDTH: f32 = 32.0;
pub const SPRITE_HEIGHT: f32 = 32.0;

pub const TILE_LAYER: f32 = 0.0;
pub const ENEMY_LAYER: f32 = 1.0;
pub const PLAYER_LAYER: f32 = 2.0;
