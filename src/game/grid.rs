use super::direction::Direction;

/// A cell on the game grid, `0 <= col < width`, `0 <= row < height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Toroidal grid: stepping off any edge re-enters on the opposite edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    /// Panics unless both dimensions are positive
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty, got {width}x{height}");
        Self { width, height }
    }

    /// Number of cells on the grid
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.col) && (0..self.height).contains(&cell.row)
    }

    /// Move a cell by an arbitrary offset, wrapping on both axes
    pub fn offset(&self, cell: Cell, dx: i32, dy: i32) -> Cell {
        Cell {
            col: (cell.col + dx).rem_euclid(self.width),
            row: (cell.row + dy).rem_euclid(self.height),
        }
    }

    /// Neighbouring cell in a direction, wrapping on both axes
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.offset(cell, dx, dy)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_step() {
        let grid = Grid::new(10, 10);
        let cell = Cell::new(5, 5);
        assert_eq!(grid.step(cell, Direction::Right), Cell::new(6, 5));
        assert_eq!(grid.step(cell, Direction::Left), Cell::new(4, 5));
        assert_eq!(grid.step(cell, Direction::Down), Cell::new(5, 6));
        assert_eq!(grid.step(cell, Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_wraparound_on_every_edge() {
        let grid = Grid::new(7, 4);

        for row in 0..grid.height {
            assert_eq!(
                grid.step(Cell::new(grid.width - 1, row), Direction::Right),
                Cell::new(0, row)
            );
            assert_eq!(
                grid.step(Cell::new(0, row), Direction::Left),
                Cell::new(grid.width - 1, row)
            );
        }

        for col in 0..grid.width {
            assert_eq!(
                grid.step(Cell::new(col, grid.height - 1), Direction::Down),
                Cell::new(col, 0)
            );
            assert_eq!(
                grid.step(Cell::new(col, 0), Direction::Up),
                Cell::new(col, grid.height - 1)
            );
        }
    }

    #[test]
    fn test_offset_wraps_large_deltas() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.offset(Cell::new(1, 1), -7, 12), Cell::new(4, 3));
    }

    #[test]
    fn test_bounds_and_capacity() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.capacity(), 200);
        assert_eq!(grid.cells().count(), 200);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 9)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, 10)));
        assert_eq!(grid.center(), Cell::new(10, 5));
    }

    #[test]
    #[should_panic(expected = "grid must be non-empty")]
    fn test_empty_grid_rejected() {
        Grid::new(0, 10);
    }
}
