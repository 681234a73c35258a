use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::GameError;
use super::grid::{Cell, Grid};

/// Places food on a uniformly random free cell by rejection sampling
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    grid: Grid,
    rng: StdRng,
}

impl FoodSpawner {
    /// Create a spawner; `seed` makes placement reproducible
    pub fn new(grid: Grid, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { grid, rng }
    }

    /// Pick a cell not in `occupied`.
    ///
    /// Fails with [`GameError::GridFull`] instead of looping forever when every
    /// cell on the grid is taken.
    pub fn respawn(&mut self, occupied: &HashSet<Cell>) -> Result<Cell, GameError> {
        let taken = occupied.iter().filter(|cell| self.grid.contains(**cell)).count();
        if taken >= self.grid.capacity() {
            return Err(GameError::GridFull {
                width: self.grid.width,
                height: self.grid.height,
                occupied: taken,
            });
        }

        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..self.grid.width),
                self.rng.gen_range(0..self.grid.height),
            );

            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_spawns_on_body() {
        let grid = Grid::new(8, 8);
        let occupied: HashSet<Cell> = grid.cells().filter(|c| (c.col + c.row) % 2 == 0).collect();
        assert_eq!(occupied.len(), grid.capacity() / 2);

        let mut spawner = FoodSpawner::new(grid, Some(42));
        for _ in 0..10_000 {
            let cell = spawner.respawn(&occupied).unwrap();
            assert!(grid.contains(cell));
            assert!(!occupied.contains(&cell));
        }
    }

    #[test]
    fn test_finds_single_free_cell() {
        let grid = Grid::new(4, 3);
        let free = Cell::new(2, 1);
        let occupied: HashSet<Cell> = grid.cells().filter(|&c| c != free).collect();

        let mut spawner = FoodSpawner::new(grid, Some(1));
        assert_eq!(spawner.respawn(&occupied), Ok(free));
    }

    #[test]
    fn test_full_grid_is_an_error() {
        let grid = Grid::new(3, 2);
        let occupied: HashSet<Cell> = grid.cells().collect();

        let mut spawner = FoodSpawner::new(grid, Some(1));
        assert_eq!(
            spawner.respawn(&occupied),
            Err(GameError::GridFull {
                width: 3,
                height: 2,
                occupied: 6
            })
        );
    }

    #[test]
    fn test_seed_is_reproducible() {
        let grid = Grid::new(20, 20);
        let occupied = HashSet::new();

        let mut a = FoodSpawner::new(grid, Some(99));
        let mut b = FoodSpawner::new(grid, Some(99));
        for _ in 0..20 {
            assert_eq!(a.respawn(&occupied), b.respawn(&occupied));
        }
    }
}
