//! Breadth-first reachability over the 4-connected grid.
//!
//! Both searches treat every cell in `blocked` as impassable, except the start
//! cell itself, which is always expanded. A flat visited bitmap replaces a
//! hashed set since the grid is small and dense.

use std::collections::VecDeque;

use crate::types::{Cell, NeighborCache, Occupancy};

/// True if `target` can be reached from `start` moving through unblocked cells.
pub fn is_reachable(nc: &NeighborCache, start: Cell, target: Cell, blocked: &Occupancy) -> bool {
    if start == target {
        return true;
    }
    if blocked.contains(target) {
        return false;
    }

    let bounds = nc.bounds;
    let mut visited = vec![false; bounds.area()];
    let mut queue = VecDeque::with_capacity(bounds.area());
    visited[bounds.index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in nc.get(current) {
            let idx = bounds.index(next);
            if visited[idx] || blocked.contains(next) {
                continue;
            }
            if next == target {
                return true;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }

    false
}

/// Number of cells reachable from `start`, counting `start` itself.
pub fn reachable_region_size(nc: &NeighborCache, start: Cell, blocked: &Occupancy) -> usize {
    let bounds = nc.bounds;
    let mut visited = vec![false; bounds.area()];
    let mut queue = VecDeque::with_capacity(bounds.area());
    visited[bounds.index(start)] = true;
    queue.push_back(start);
    let mut count = 0;

    while let Some(current) = queue.pop_front() {
        count += 1;
        for &next in nc.get(current) {
            let idx = bounds.index(next);
            if visited[idx] || blocked.contains(next) {
                continue;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }

    count
}
