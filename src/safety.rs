//! Food safety evaluation.
//!
//! A candidate food cell is safe only if it passes every gate below, checked in
//! order and short-circuiting on the first failure:
//! 1. Reachable from the head
//! 2. At least two exits once the snake has eaten
//! 3. Enough open floor around the food after eating
//! 4. No exit leads into a near dead-end
//! 5. Not boxed in by walls, body or the grid edge
//! 6. Corner placements leave enough room behind both exits

use std::fmt;

use log::trace;

use crate::config::SafetyThresholds;
use crate::reachability::{is_reachable, reachable_region_size};
use crate::types::{Cell, GameSnapshot, NeighborCache, Occupancy, DIRECTIONS};

/// The gate a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unreachable,
    TooFewExits { exits: usize },
    InsufficientSpace { space: usize, required: usize },
    DeadEndExit { exit: Cell, space: usize, required: usize },
    BoxedIn { blocked_sides: usize },
    TightCorner { space: usize, required: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unreachable => write!(f, "unreachable from head"),
            Rejection::TooFewExits { exits } => write!(f, "only {} free exit(s)", exits),
            Rejection::InsufficientSpace { space, required } => {
                write!(f, "{} open cells after eating, need {}", space, required)
            }
            Rejection::DeadEndExit { exit, space, required } => write!(
                f,
                "exit ({}, {}) opens onto {} cells, need {}",
                exit.col, exit.row, space, required
            ),
            Rejection::BoxedIn { blocked_sides } => write!(f, "{} blocked sides", blocked_sides),
            Rejection::TightCorner { space, required } => {
                write!(f, "corner branch of {} cells, need {}", space, required)
            }
        }
    }
}

/// Blocking set as it will stand right after the head moves onto `candidate`.
///
/// The tail only vacates when nothing is left to digest and the snake has more
/// than one segment; a lone head is kept as occupied.
pub fn post_eat_occupancy(snapshot: &GameSnapshot, occupied: &Occupancy, candidate: Cell) -> Occupancy {
    let mut post = occupied.clone();
    post.insert(candidate);
    if snapshot.pending_growth == 0 && snapshot.snake_len() > 1 {
        if let Some(tail) = snapshot.tail() {
            post.remove(tail);
        }
    }
    post
}

/// Run every gate against `candidate`; `Ok(())` means safe.
///
/// `occupied` must be the snake ∪ walls occupancy of `snapshot`.
pub fn check_candidate(
    snapshot: &GameSnapshot,
    occupied: &Occupancy,
    nc: &NeighborCache,
    candidate: Cell,
    thresholds: &SafetyThresholds,
) -> Result<(), Rejection> {
    let snake_len = snapshot.snake_len();

    if !is_reachable(nc, snapshot.head(), candidate, occupied) {
        return Err(Rejection::Unreachable);
    }

    let post_eat = post_eat_occupancy(snapshot, occupied, candidate);

    let exits: Vec<Cell> = nc
        .get(candidate)
        .iter()
        .copied()
        .filter(|&c| !post_eat.contains(c))
        .collect();
    if exits.len() < thresholds.min_exits {
        return Err(Rejection::TooFewExits { exits: exits.len() });
    }

    let space = reachable_region_size(nc, candidate, &post_eat);
    let required = thresholds.min_space_floor.max(snake_len + thresholds.space_slack);
    if space < required {
        return Err(Rejection::InsufficientSpace { space, required });
    }

    // The food cell is already part of `post_eat`, so no exit can double back through it.
    let required = thresholds.exit_space_floor.max(snake_len);
    for &exit in &exits {
        let space = reachable_region_size(nc, exit, &post_eat);
        if space < required {
            return Err(Rejection::DeadEndExit { exit, space, required });
        }
    }

    let blocked_sides = DIRECTIONS
        .iter()
        .filter(|&&d| match occupied.bounds.offset(candidate, d) {
            Some(side) => occupied.contains(side),
            None => true,
        })
        .count();
    if blocked_sides > thresholds.max_wall_neighbors {
        return Err(Rejection::BoxedIn { blocked_sides });
    }

    if let [a, b] = exits[..] {
        let straight = a.col == b.col || a.row == b.row;
        if !straight {
            let required = snake_len + thresholds.corner_slack;
            for exit in [a, b] {
                let space = reachable_region_size(nc, exit, &post_eat);
                if space < required {
                    return Err(Rejection::TightCorner { space, required });
                }
            }
        }
    }

    Ok(())
}

/// True if placing food on `candidate` cannot lead the snake into a trap.
pub fn is_safe(
    snapshot: &GameSnapshot,
    occupied: &Occupancy,
    nc: &NeighborCache,
    candidate: Cell,
    thresholds: &SafetyThresholds,
) -> bool {
    match check_candidate(snapshot, occupied, nc, candidate, thresholds) {
        Ok(()) => true,
        Err(reason) => {
            trace!("food at ({}, {}) rejected: {}", candidate.col, candidate.row, reason);
            false
        }
    }
}

/// Standalone check for one cell of a snapshot: off-grid and occupied cells are never safe.
pub fn is_safe_food_cell(
    snapshot: &GameSnapshot,
    candidate: Cell,
    thresholds: &SafetyThresholds,
) -> bool {
    let occupied = snapshot.occupied();
    if !snapshot.bounds().in_bounds(candidate) || occupied.contains(candidate) {
        return false;
    }
    let nc = NeighborCache::new(snapshot.bounds());
    is_safe(snapshot, &occupied, &nc, candidate, thresholds)
}
