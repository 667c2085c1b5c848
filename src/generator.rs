use bevy::prelude::*;
use rand::{
    seq::{IteratorRandom, SliceRandom},
    Rng,
};

use crate::{consts::*, error::GameError, grid::Grid};

/// Uniform noise: every cell independently gets a code in `0..=MAX_TILE_CODE`.
/// No connectivity or reachability is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGenerator {
    width: usize,
    height: usize,
}

impl LevelGenerator {
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width < 0 || height < 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
        })
    }

    pub fn generate(&self) -> Grid {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::new(self.width, self.height);
        for y in 0..self.height as u32 {
            for x in 0..self.width as u32 {
                grid.set(UVec2::new(x, y), rng.gen_range(0..=MAX_TILE_CODE));
            }
        }
        grid
    }

    /// Up to `count` distinct empty cells, fewer when the grid runs out.
    pub fn pick_empty_cells<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        count: usize,
        rng: &mut R,
    ) -> Vec<UVec2> {
        let count = count.min(grid.width() * grid.height());
        let mut cells = grid.empty_cells().choose_multiple(rng, count);
        // choose_multiple does not shuffle its result
        cells.shuffle(rng);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_negative_dimensions() {
        assert!(matches!(
            LevelGenerator::new(-1, 4),
            Err(GameError::InvalidDimensions {
                width: -1,
                height: 4
            })
        ));
        assert!(LevelGenerator::new(4, -1).is_err());
        assert!(LevelGenerator::new(0, 0).is_ok());
    }

    #[test]
    fn test_shape_and_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let width = rng.gen_range(0..12);
            let height = rng.gen_range(0..12);
            let grid = LevelGenerator::new(width, height)
                .unwrap()
                .generate_with(&mut rng);

            assert_eq!(grid.height(), height as usize);
            assert_eq!(grid.rows().count(), height as usize);
            for row in grid.rows() {
                assert_eq!(row.len(), width as usize);
                assert!(row.iter().all(|&code| code <= MAX_TILE_CODE));
            }
        }
    }

    #[test]
    fn test_all_codes_appear() {
        let grid = LevelGenerator::new(30, 30).unwrap().generate();
        for code in 0..=MAX_TILE_CODE {
            assert!(grid.cells().any(|(_, c)| c == code), "missing {code}");
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = LevelGenerator::new(8, 5).unwrap();
        let a = generator.generate_with(&mut StdRng::seed_from_u64(3));
        let b = generator.generate_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_empty_cells() {
        let generator = LevelGenerator::new(3, 2).unwrap();
        let grid = Grid::from_rows(vec![vec![0, 1, 0], vec![2, 0, 1]]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let cells = generator.pick_empty_cells(&grid, 2, &mut rng);
        assert_eq!(cells.len(), 2);
        assert_ne!(cells[0], cells[1]);
        assert!(cells.iter().all(|&c| grid.get(c) == Some(EMPTY_TILE)));

        let cells = generator.pick_empty_cells(&grid, 10, &mut rng);
        assert_eq!(cells.len(), 3);

        let cells = generator.pick_empty_cells(&grid, usize::MAX, &mut rng);
        assert_eq!(cells.len(), 3);
    }
}
