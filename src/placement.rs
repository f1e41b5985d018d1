//! Food placement: candidate enumeration, tiered shortlists and the final draw.
//!
//! Tiers, tried in order:
//! - `Safe`: cells passing every safety gate, ranked by open area
//! - `Reachable`: cells the head can reach, ranked by free neighbors
//! - `AnyFree`: every free cell, as a last resort so the game never stalls
//!
//! Shortlists are computed deterministically; only the final pick draws from
//! the injected `RandomSource`.

use std::cmp::Reverse;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::reachability::{is_reachable, reachable_region_size};
use crate::rng::RandomSource;
use crate::safety::is_safe;
use crate::types::{Cell, GameSnapshot, NeighborCache, Occupancy};

/// Outcome of a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Placement {
    Food(Cell),
    /// No free cell is left: the board is full.
    LevelComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Safe,
    Reachable,
    AnyFree,
}

/// The ranked subset the food cell is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortlist {
    pub tier: Tier,
    pub cells: Vec<Cell>,
}

/// Cells free in `occupied`, counted among the 4-neighbors of `cell`.
fn free_neighbor_count(nc: &NeighborCache, occupied: &Occupancy, cell: Cell) -> usize {
    nc.get(cell).iter().filter(|&&c| !occupied.contains(c)).count()
}

fn filter_safe(
    snapshot: &GameSnapshot,
    occupied: &Occupancy,
    nc: &NeighborCache,
    free: &[Cell],
    config: &PlacementConfig,
) -> Vec<Cell> {
    free.iter()
        .copied()
        .filter(|&c| is_safe(snapshot, occupied, nc, c, &config.safety))
        .collect()
}

/// Every cell that passes all safety gates, in column-major order.
pub fn safe_cells(snapshot: &GameSnapshot, config: &PlacementConfig) -> Vec<Cell> {
    let occupied = snapshot.occupied();
    let nc = NeighborCache::new(snapshot.bounds());
    filter_safe(snapshot, &occupied, &nc, &occupied.free_cells(), config)
}

/// Build the shortlist for `snapshot`, or `None` when no free cell remains.
pub fn build_shortlist(snapshot: &GameSnapshot, config: &PlacementConfig) -> Option<Shortlist> {
    let occupied = snapshot.occupied();
    let free = occupied.free_cells();
    if free.is_empty() {
        return None;
    }

    let nc = NeighborCache::new(snapshot.bounds());

    let mut safe = filter_safe(snapshot, &occupied, &nc, &free, config);

    if !safe.is_empty() {
        // Stable sort keeps column-major order among equal areas.
        safe.sort_by_cached_key(|&c| Reverse(reachable_region_size(&nc, c, &occupied)));
        let keep = config.safe_shortlist.for_len(safe.len());
        safe.truncate(keep);
        return Some(Shortlist {
            tier: Tier::Safe,
            cells: safe,
        });
    }

    let head = snapshot.head();
    let mut reachable: Vec<Cell> = free
        .iter()
        .copied()
        .filter(|&c| is_reachable(&nc, head, c, &occupied))
        .collect();

    if !reachable.is_empty() {
        reachable.sort_by_cached_key(|&c| Reverse(free_neighbor_count(&nc, &occupied, c)));
        let keep = config.fallback_shortlist.for_len(reachable.len());
        reachable.truncate(keep);
        return Some(Shortlist {
            tier: Tier::Reachable,
            cells: reachable,
        });
    }

    Some(Shortlist {
        tier: Tier::AnyFree,
        cells: free,
    })
}

/// Choose where the next food goes.
///
/// Never returns an occupied cell; returns `LevelComplete` only when the board is full.
pub fn select_food_cell<R: RandomSource + ?Sized>(
    snapshot: &GameSnapshot,
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    match build_shortlist(snapshot, config) {
        None => {
            debug!("no free cell left on {}x{} board", snapshot.width, snapshot.height);
            Placement::LevelComplete
        }
        Some(shortlist) => {
            let cell = shortlist.cells[rng.index(shortlist.cells.len())];
            debug!(
                "food placed at ({}, {}) from {:?} shortlist of {}",
                cell.col,
                cell.row,
                shortlist.tier,
                shortlist.cells.len()
            );
            Placement::Food(cell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::WasmRng;
    use crate::types::GridBounds;

    /// Always draws the same index, clamped to the shortlist.
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn index(&mut self, n: usize) -> usize {
            self.0.min(n - 1)
        }
    }

    fn full_board_except(bounds: GridBounds, free: &[Cell]) -> Vec<Cell> {
        bounds.cells().filter(|c| !free.contains(c)).collect()
    }

    #[test]
    fn test_full_board_completes_level() {
        let bounds = GridBounds::new(3, 3);
        let snake = vec![Cell::new(0, 0)];
        let walls = full_board_except(bounds, &[Cell::new(0, 0)]);
        let snap = GameSnapshot::new(bounds, snake, walls, 0);
        assert_eq!(build_shortlist(&snap, &PlacementConfig::default()), None);
        assert_eq!(
            select_food_cell(&snap, &PlacementConfig::default(), &mut Fixed(0)),
            Placement::LevelComplete
        );
    }

    #[test]
    fn test_open_board_prefers_safe_tier() {
        let snap = GameSnapshot::new(GridBounds::new(12, 12), vec![Cell::new(6, 6)], vec![], 0);
        let shortlist = build_shortlist(&snap, &PlacementConfig::default()).unwrap();
        assert_eq!(shortlist.tier, Tier::Safe);
        // All 143 free cells share one region, so ranking keeps column-major order
        assert_eq!(shortlist.cells.len(), 72);
        assert_eq!(shortlist.cells[0], Cell::new(0, 0));
        assert_eq!(shortlist.cells[71], Cell::new(5, 11));
    }

    #[test]
    fn test_safe_tier_prefers_larger_region() {
        // Wall column at 5 with the head plugging the only gap at (5,6):
        // 60 free cells on the left, 72 on the right.
        let walls: Vec<Cell> = (0..12).filter(|&r| r != 6).map(|r| Cell::new(5, r)).collect();
        let snap = GameSnapshot::new(GridBounds::new(12, 12), vec![Cell::new(5, 6)], walls, 0);
        let config = PlacementConfig::default();

        let safe = safe_cells(&snap, &config);
        assert_eq!(safe.len(), 132);
        assert_eq!(safe.iter().filter(|c| c.col < 5).count(), 60);

        let shortlist = build_shortlist(&snap, &config).unwrap();
        assert_eq!(shortlist.tier, Tier::Safe);
        assert_eq!(shortlist.cells.len(), 66);
        assert!(shortlist.cells.iter().all(|c| c.col > 5));
        // Equal areas keep column-major order
        assert_eq!(shortlist.cells[0], Cell::new(6, 0));
        assert_eq!(shortlist.cells[65], Cell::new(11, 5));

        for seed in 0..20 {
            let Placement::Food(cell) = select_food_cell(&snap, &config, &mut WasmRng::from_seed(seed))
            else {
                panic!("expected food");
            };
            assert!(cell.col > 5);
        }
    }

    #[test]
    fn test_safe_tier_ties_keep_enumeration_order() {
        // The head is not a cut cell here, so every safe cell sees the same region
        // and the shortlist is a prefix of the safe cells in column-major order.
        let walls = vec![Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)];
        let snap = GameSnapshot::new(GridBounds::new(7, 4), vec![Cell::new(5, 2)], walls, 0);
        let config = PlacementConfig::default();
        let shortlist = build_shortlist(&snap, &config).unwrap();
        assert_eq!(shortlist.tier, Tier::Safe);

        let safe = safe_cells(&snap, &config);
        assert_eq!(shortlist.cells.len(), config.safe_shortlist.for_len(safe.len()));
        assert_eq!(shortlist.cells[..], safe[..shortlist.cells.len()]);

        let occupied = snap.occupied();
        let nc = NeighborCache::new(snap.bounds());
        let sizes: Vec<usize> = shortlist
            .cells
            .iter()
            .map(|&c| reachable_region_size(&nc, c, &occupied))
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_reachable_tier_when_nothing_safe() {
        // 1-wide corridor along row 0 of a 5x2 board is too cramped for any safe cell
        let walls = vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1), Cell::new(4, 1)];
        let snap = GameSnapshot::new(GridBounds::new(5, 2), vec![Cell::new(0, 0)], walls, 0);
        let shortlist = build_shortlist(&snap, &PlacementConfig::default()).unwrap();
        assert_eq!(shortlist.tier, Tier::Reachable);
        // Free: (0,1),(1,0),(2,0),(3,0),(4,0). Neighbor counts 0,1,2,2,1 -> stable order
        assert_eq!(shortlist.cells, vec![Cell::new(2, 0), Cell::new(3, 0)]);
    }

    #[test]
    fn test_any_free_tier_when_head_boxed_in() {
        let walls = vec![Cell::new(1, 0), Cell::new(0, 1)];
        let snap = GameSnapshot::new(GridBounds::new(3, 3), vec![Cell::new(0, 0)], walls, 0);
        let shortlist = build_shortlist(&snap, &PlacementConfig::default()).unwrap();
        assert_eq!(shortlist.tier, Tier::AnyFree);
        assert_eq!(shortlist.cells.len(), 6);

        let Placement::Food(cell) = select_food_cell(&snap, &PlacementConfig::default(), &mut Fixed(5))
        else {
            panic!("expected food");
        };
        assert_eq!(cell, Cell::new(2, 2));
    }

    #[test]
    fn test_selection_never_hits_occupied() {
        let snake = vec![Cell::new(3, 3), Cell::new(3, 4), Cell::new(4, 4), Cell::new(5, 4)];
        let walls = vec![Cell::new(0, 0), Cell::new(7, 7), Cell::new(2, 5)];
        let snap = GameSnapshot::new(GridBounds::new(8, 8), snake, walls, 0);
        let occupied = snap.occupied();
        let mut rng = WasmRng::from_seed(9);
        for _ in 0..50 {
            match select_food_cell(&snap, &PlacementConfig::default(), &mut rng) {
                Placement::Food(cell) => assert!(!occupied.contains(cell)),
                Placement::LevelComplete => panic!("board is not full"),
            }
        }
    }

    #[test]
    fn test_seeded_selection_is_repeatable() {
        let snap = GameSnapshot::new(GridBounds::new(12, 12), vec![Cell::new(6, 6)], vec![], 0);
        let config = PlacementConfig::default();
        let a = select_food_cell(&snap, &config, &mut WasmRng::from_seed(1234));
        let b = select_food_cell(&snap, &config, &mut WasmRng::from_seed(1234));
        assert_eq!(a, b);
    }
}
