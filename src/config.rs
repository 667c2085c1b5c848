use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::{consts::*, error::GameError, generator::LevelGenerator};

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowCfg {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub background: [u8; 3],
}

impl Default for WindowCfg {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            background: BACKGROUND,
        }
    }
}

impl WindowCfg {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn clear_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::srgb_u8(r, g, b)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LevelCfg {
    /// Cells per row. Signed so a bad value is reported rather than rejected by the parser.
    pub width: i32,
    pub height: i32,
    pub tile_size: u32,
    pub max_enemies: u32,
    pub seed: Option<u64>,
    /// Hand-authored rows of tile-type codes, used instead of a generated grid.
    pub layout: Option<Vec<Vec<u8>>>,
}

impl Default for LevelCfg {
    fn default() -> Self {
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            tile_size: TILE_SIZE,
            max_enemies: MAX_ENEMIES,
            seed: None,
            layout: None,
        }
    }
}

impl LevelCfg {
    /// Longest side in cells, of the layout when one is given.
    pub fn extent(&self) -> usize {
        match &self.layout {
            Some(rows) => rows.iter().map(Vec::len).max().unwrap_or(0).max(rows.len()),
            None => self.width.max(self.height).max(0) as usize,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// All fields are required once the table is present.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ActorCfg {
    pub health: i32,
    pub speed: i32,
    pub size: [f32; 2],
}

impl ActorCfg {
    pub fn player() -> Self {
        Self {
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            size: [SPRITE_WIDTH, SPRITE_HEIGHT],
        }
    }

    pub fn enemy() -> Self {
        Self {
            health: ENEMY_HEALTH,
            speed: ENEMY_SPEED,
            size: [SPRITE_WIDTH, SPRITE_HEIGHT],
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from(self.size)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TileImage {
    pub code: u8,
    pub path: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub player: String,
    pub enemy: String,
    pub tiles: Vec<TileImage>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            player: "player.png".to_string(),
            enemy: "enemy.png".to_string(),
            tiles: (1..=MAX_TILE_CODE)
                .map(|code| TileImage {
                    code,
                    path: format!("tiles/tile_{code}.png"),
                })
                .collect(),
        }
    }
}

impl AssetPaths {
    pub fn tile(&self, code: u8) -> Option<&str> {
        self.tiles
            .iter()
            .find(|t| t.code == code)
            .map(|t| t.path.as_str())
    }

    /// Every configured path, relative to `root`.
    pub fn all(&self) -> impl Iterator<Item = &str> + '_ {
        [self.player.as_str(), self.enemy.as_str()]
            .into_iter()
            .chain(self.tiles.iter().map(|t| t.path.as_str()))
    }

    /// Fails on the first configured image that is not a file under `root`.
    pub fn verify(&self) -> Result<(), GameError> {
        for path in self.all() {
            let full = self.root.join(path);
            if !full.is_file() {
                return Err(GameError::MissingAsset(full));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Resource, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowCfg,
    pub frame_rate: u32,
    pub level: LevelCfg,
    pub player: ActorCfg,
    pub enemy: ActorCfg,
    pub assets: AssetPaths,
    pub diagnostics: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowCfg::default(),
            frame_rate: FRAME_RATE,
            level: LevelCfg::default(),
            player: ActorCfg::player(),
            enemy: ActorCfg::enemy(),
            assets: AssetPaths::default(),
            diagnostics: false,
        }
    }
}

impl GameConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let config = match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(GameError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, GameError> {
        Ok(toml::from_str::<GameConfig>(s)?)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        LevelGenerator::new(self.level.width, self.level.height)?;
        if self.level.tile_size == 0 {
            return Err(GameError::InvalidSetting("level.tile_size must be positive"));
        }
        let extent = u32::try_from(self.level.extent()).ok();
        if extent.and_then(|n| n.checked_mul(self.level.tile_size)).is_none() {
            return Err(GameError::InvalidSetting("level.tile_size is too large for the level"));
        }
        if self.frame_rate == 0 {
            return Err(GameError::InvalidSetting("frame_rate must be positive"));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(GameError::InvalidSetting("window size must be positive"));
        }
        Ok(())
    }

    pub fn generator(&self) -> Result<LevelGenerator, GameError> {
        LevelGenerator::new(self.level.width, self.level.height)
    }
}
