use bevy::prelude::*;

use crate::{consts::*, error::GameError};

/// Tile-type codes laid out row-major, `height` rows of `width` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![EMPTY_TILE; width * height],
        }
    }

    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(GameError::RaggedGrid {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            data.extend(cells);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * self.width + pos.x as usize
    }

    pub fn is_inside(&self, pos: UVec2) -> bool {
        (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: UVec2) -> Option<u8> {
        self.is_inside(pos).then(|| self.data[self.index(pos)])
    }

    pub fn set(&mut self, pos: UVec2, code: u8) {
        let index = self.index(pos);
        self.data[index] = code;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// Every cell as `(column, row)` with its code, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (UVec2, u8)> + '_ {
        self.data.iter().enumerate().map(|(i, &code)| {
            let pos = UVec2::new((i % self.width) as u32, (i / self.width) as u32);
            (pos, code)
        })
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = UVec2> + '_ {
        self.cells()
            .filter(|&(_, code)| code == EMPTY_TILE)
            .map(|(pos, _)| pos)
    }

    pub fn count_non_empty(&self) -> usize {
        self.data.iter().filter(|&&code| code != EMPTY_TILE).count()
    }
}
