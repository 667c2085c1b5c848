use bevy::prelude::*;

use crate::{
    components::{Drawable, Tile},
    consts::*,
    error::GameError,
    grid::Grid,
    surface::Surface,
};

/// A grid plus one [`Tile`] per non-empty cell.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    tile_size: u32,
    grid: Grid,
    tiles: Vec<Tile>,
}

impl Level {
    pub fn new(grid: Grid, tile_size: u32) -> Self {
        let tiles = grid
            .cells()
            .filter(|&(_, kind)| kind != EMPTY_TILE)
            .map(|(cell, kind)| Tile::new(cell, kind, tile_size))
            .collect();
        Self {
            tile_size,
            grid,
            tiles,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn cell_to_pixel(&self, cell: UVec2) -> Vec2 {
        cell.as_vec2() * self.tile_size as f32
    }

    pub fn pixel_size(&self) -> Vec2 {
        UVec2::new(self.grid.width() as u32, self.grid.height() as u32).as_vec2()
            * self.tile_size as f32
    }

    pub fn draw(&self, surface: &mut Surface) -> Result<Vec<Entity>, GameError> {
        self.tiles.iter().map(|tile| tile.draw(surface)).collect()
    }
}
