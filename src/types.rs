//! Core data types for the food-placement analyzer.
//!
//! All grid types use flat `Vec` storage with column-major layout:
//! `cells[col * height + row]` maps to the JS equivalent `grid[col][row]`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Neighbor deltas in enumeration order: +col, -col, +row, -row.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A (column, row) coordinate on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    #[inline(always)]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Fixed-size rectangular grid: bounds checks and 4-neighbor enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: usize,
    pub height: usize,
}

impl GridBounds {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline(always)]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// Flat column-major index of an in-bounds cell.
    #[inline(always)]
    pub fn index(&self, cell: Cell) -> usize {
        cell.col * self.height + cell.row
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The cell one step from `cell` by `(dc, dr)`, or `None` if it falls off the grid.
    #[inline(always)]
    pub fn offset(&self, cell: Cell, (dc, dr): (isize, isize)) -> Option<Cell> {
        let col = cell.col.checked_add_signed(dc)?;
        let row = cell.row.checked_add_signed(dr)?;
        let next = Cell::new(col, row);
        self.in_bounds(next).then_some(next)
    }

    /// In-bounds 4-neighbors of `cell`, in `DIRECTIONS` order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS.iter().filter_map(move |&d| self.offset(cell, d))
    }

    /// Every cell of the grid, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let height = self.height;
        (0..self.width).flat_map(move |col| (0..height).map(move |row| Cell::new(col, row)))
    }

    /// The spawn cell at the grid centre.
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}

/// Impassable cells (snake body + walls), one byte per cell.
/// Uses `Vec<u8>` (0/1) instead of `Vec<bool>` for simpler WASM interop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub bounds: GridBounds,
    cells: Vec<u8>,
}

impl Occupancy {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: vec![0; bounds.area()],
        }
    }

    pub fn from_cells<'a, I>(bounds: GridBounds, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut occupancy = Self::new(bounds);
        for &cell in cells {
            occupancy.insert(cell);
        }
        occupancy
    }

    /// Out-of-bounds cells are never reported as blocked.
    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        self.bounds.in_bounds(cell) && self.cells[self.bounds.index(cell)] != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, cell: Cell) {
        if self.bounds.in_bounds(cell) {
            let idx = self.bounds.index(cell);
            self.cells[idx] = 1;
        }
    }

    #[inline(always)]
    pub fn remove(&mut self, cell: Cell) {
        if self.bounds.in_bounds(cell) {
            let idx = self.bounds.index(cell);
            self.cells[idx] = 0;
        }
    }

    /// Count blocked cells on the board.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Cells not blocked, column by column.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.bounds.cells().filter(|&c| !self.contains(c)).collect()
    }
}

/// Pre-computed neighbor cache for all cells.
///
/// Stores the 4-directional neighbors (clipped to grid bounds) for every cell.
/// Indexed by `col * height + row`, each entry is a slice of cells.
pub struct NeighborCache {
    pub bounds: GridBounds,
    /// Flat storage of all neighbor cells.
    data: Vec<Cell>,
    /// offsets[i] = start index in `data` for cell i.
    offsets: Vec<usize>,
}

impl NeighborCache {
    pub fn new(bounds: GridBounds) -> Self {
        let total = bounds.area();
        let mut data = Vec::with_capacity(total * 4);
        let mut offsets = Vec::with_capacity(total + 1);

        for cell in bounds.cells() {
            offsets.push(data.len());
            data.extend(bounds.neighbors(cell));
        }
        offsets.push(data.len()); // sentinel

        Self {
            bounds,
            data,
            offsets,
        }
    }

    #[inline(always)]
    pub fn get(&self, cell: Cell) -> &[Cell] {
        let idx = self.bounds.index(cell);
        &self.data[self.offsets[idx]..self.offsets[idx + 1]]
    }
}

/// Read-only view of the game the host hands to the analyzer on every placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Head first, tail last.
    pub snake: Vec<Cell>,
    #[serde(default)]
    pub walls: Vec<Cell>,
    #[serde(default)]
    pub pending_growth: u32,
}

impl GameSnapshot {
    pub fn new(bounds: GridBounds, snake: Vec<Cell>, walls: Vec<Cell>, pending_growth: u32) -> Self {
        Self {
            width: bounds.width,
            height: bounds.height,
            snake,
            walls,
            pending_growth,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Panics on an empty snake; `validate` rules that out at the host boundary.
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn tail(&self) -> Option<Cell> {
        self.snake.last().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Snake segments plus walls.
    pub fn occupied(&self) -> Occupancy {
        Occupancy::from_cells(self.bounds(), self.snake.iter().chain(self.walls.iter()))
    }

    /// Checks the preconditions the analyzer itself never re-checks.
    pub fn validate(&self) -> Result<()> {
        let bounds = self.bounds();
        if bounds.area() == 0 {
            return Err(Error::InvalidSnapshot(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.snake.is_empty() {
            return Err(Error::InvalidSnapshot("snake has no segments".into()));
        }
        if let Some(cell) = self
            .snake
            .iter()
            .chain(self.walls.iter())
            .find(|&&c| !bounds.in_bounds(c))
        {
            return Err(Error::InvalidSnapshot(format!(
                "cell ({}, {}) lies outside the {}x{} grid",
                cell.col, cell.row, self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_order_is_fixed() {
        let bounds = GridBounds::new(5, 5);
        let n: Vec<Cell> = bounds.neighbors(Cell::new(2, 2)).collect();
        assert_eq!(
            n,
            vec![Cell::new(3, 2), Cell::new(1, 2), Cell::new(2, 3), Cell::new(2, 1)]
        );
    }

    #[test]
    fn test_neighbor_cache_corners() {
        let nc = NeighborCache::new(GridBounds::new(5, 4));
        // Corner (0,0) should have 2 neighbors
        assert_eq!(nc.get(Cell::new(0, 0)).len(), 2);
        // Edge (0,2) should have 3 neighbors
        assert_eq!(nc.get(Cell::new(0, 2)).len(), 3);
        assert_eq!(nc.get(Cell::new(2, 2)).len(), 4);
        assert_eq!(nc.get(Cell::new(4, 3)), &[Cell::new(3, 3), Cell::new(4, 2)]);
    }

    #[test]
    fn test_offset_clips_to_grid() {
        let bounds = GridBounds::new(3, 3);
        assert_eq!(bounds.offset(Cell::new(0, 0), (-1, 0)), None);
        assert_eq!(bounds.offset(Cell::new(2, 2), (0, 1)), None);
        assert_eq!(bounds.offset(Cell::new(1, 1), (0, -1)), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_occupancy_insert_remove() {
        let bounds = GridBounds::new(4, 4);
        let mut occ = Occupancy::from_cells(bounds, &[Cell::new(1, 1), Cell::new(3, 0)]);
        assert!(occ.contains(Cell::new(1, 1)));
        assert!(!occ.contains(Cell::new(0, 0)));
        assert!(!occ.contains(Cell::new(9, 9)));
        assert_eq!(occ.count(), 2);

        occ.remove(Cell::new(1, 1));
        assert_eq!(occ.count(), 1);
        assert_eq!(occ.free_cells().len(), 15);
    }

    #[test]
    fn test_free_cells_column_major() {
        let occ = Occupancy::new(GridBounds::new(2, 2));
        assert_eq!(
            occ.free_cells(),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_snapshot_validate() {
        let bounds = GridBounds::new(4, 4);
        let ok = GameSnapshot::new(bounds, vec![Cell::new(1, 1)], vec![], 0);
        assert!(ok.validate().is_ok());

        let empty = GameSnapshot::new(bounds, vec![], vec![], 0);
        assert!(matches!(empty.validate(), Err(Error::InvalidSnapshot(_))));

        let outside = GameSnapshot::new(bounds, vec![Cell::new(1, 1)], vec![Cell::new(4, 0)], 0);
        assert!(matches!(outside.validate(), Err(Error::InvalidSnapshot(_))));
    }
}
