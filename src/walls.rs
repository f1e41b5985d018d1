//! Level wall generation.
//!
//! Walls are scattered uniformly at random, keeping the 3×3 spawn zone around
//! the grid centre clear so the snake never starts boxed in.

use log::debug;

use crate::rng::RandomSource;
use crate::types::{Cell, GridBounds, Occupancy};

/// Random probes per wall before that wall is given up on.
const MAX_TRIES_PER_WALL: usize = 500;

/// The spawn cell and its 8 neighbours, clipped to the grid.
pub fn spawn_zone(bounds: GridBounds) -> Occupancy {
    let center = bounds.center();
    let mut zone = Occupancy::new(bounds);
    for dc in -1isize..=1 {
        for dr in -1isize..=1 {
            if let Some(cell) = bounds.offset(center, (dc, dr)) {
                zone.insert(cell);
            }
        }
    }
    zone.insert(center);
    zone
}

/// Place up to `count` walls on free cells outside the spawn zone.
///
/// A wall whose random probes all land on taken cells is skipped, so a crowded
/// board may end up with fewer walls than requested.
pub fn generate_walls<R: RandomSource + ?Sized>(bounds: GridBounds, count: usize, rng: &mut R) -> Vec<Cell> {
    let mut taken = spawn_zone(bounds);
    let mut walls = Vec::with_capacity(count);

    for _ in 0..count {
        let found = (0..MAX_TRIES_PER_WALL)
            .map(|_| Cell::new(rng.index(bounds.width), rng.index(bounds.height)))
            .find(|&c| !taken.contains(c));
        if let Some(wall) = found {
            taken.insert(wall);
            walls.push(wall);
        }
    }

    if walls.len() < count {
        debug!("placed {} of {} walls", walls.len(), count);
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::WasmRng;

    #[test]
    fn test_spawn_zone_size() {
        assert_eq!(spawn_zone(GridBounds::new(12, 12)).count(), 9);
        // Centre of a 1x1 grid clips to a single cell
        assert_eq!(spawn_zone(GridBounds::new(1, 1)).count(), 1);
    }

    #[test]
    fn test_walls_count_and_distinct() {
        let bounds = GridBounds::new(12, 12);
        let mut rng = WasmRng::from_seed(42);
        let walls = generate_walls(bounds, 18, &mut rng);
        assert_eq!(walls.len(), 18);

        let occ = Occupancy::from_cells(bounds, &walls);
        assert_eq!(occ.count(), 18);
    }

    #[test]
    fn test_walls_avoid_spawn_zone() {
        let bounds = GridBounds::new(12, 12);
        let zone = spawn_zone(bounds);
        let mut rng = WasmRng::from_seed(7);
        for wall in generate_walls(bounds, 40, &mut rng) {
            assert!(!zone.contains(wall), "Wall found in spawn zone at ({}, {})", wall.col, wall.row);
        }
    }

    #[test]
    fn test_walls_skipped_when_board_full() {
        // 3x3 grid is entirely spawn zone
        let mut rng = WasmRng::from_seed(1);
        assert!(generate_walls(GridBounds::new(3, 3), 4, &mut rng).is_empty());
    }

    #[test]
    fn test_walls_seeded_repeatable() {
        let bounds = GridBounds::new(12, 12);
        let a = generate_walls(bounds, 10, &mut WasmRng::from_seed(99));
        let b = generate_walls(bounds, 10, &mut WasmRng::from_seed(99));
        assert_eq!(a, b);
    }
}
