//! Distance heuristics and the location hash for grid pathfinding.

use wayfind_core::fp::{fp_greater, fp_less};
use wayfind_core::traits::{Heuristic, StateHash};

use crate::map::GridMap;
use crate::transitions::SQRT_2;

/// Manhattan distance to a fixed goal. Admissible and consistent for
/// 4-connected unit-cost grids.
pub struct ManhattanDistance {
    goal: (i32, i32),
}

impl ManhattanDistance {
    pub fn new(goal: (i32, i32)) -> Self {
        ManhattanDistance { goal }
    }

    pub fn set_goal(&mut self, goal: (i32, i32)) {
        self.goal = goal;
    }
}

impl Heuristic<(i32, i32)> for ManhattanDistance {
    fn h_value(&mut self, state: &(i32, i32)) -> f64 {
        ((self.goal.0 - state.0).abs() + (self.goal.1 - state.1).abs()) as f64
    }
}

/// Octile distance to a fixed goal: the cost of the optimal obstacle-free
/// 8-connected path with the configured diagonal cost. Falls back to
/// Manhattan distance when diagonals cost 2 or more, since diagonals are
/// then never worth taking.
pub struct OctileDistance {
    goal: (i32, i32),
    diag_cost: f64,
}

impl OctileDistance {
    pub fn new(goal: (i32, i32)) -> Self {
        OctileDistance {
            goal,
            diag_cost: SQRT_2,
        }
    }

    pub fn set_goal(&mut self, goal: (i32, i32)) {
        self.goal = goal;
    }

    /// Sets the diagonal cost the estimate assumes. Rejects costs that are
    /// not strictly positive, returning false and leaving the cost
    /// unchanged.
    pub fn set_diagonal_cost(&mut self, cost: f64) -> bool {
        if !fp_greater(cost, 0.0) {
            return false;
        }
        self.diag_cost = cost;
        true
    }
}

impl Heuristic<(i32, i32)> for OctileDistance {
    fn h_value(&mut self, state: &(i32, i32)) -> f64 {
        let dx = (self.goal.0 - state.0).abs() as f64;
        let dy = (self.goal.1 - state.1).abs() as f64;

        if !fp_less(self.diag_cost, 2.0) {
            return dx + dy;
        }
        if fp_less(dx, dy) {
            dx * self.diag_cost + dy - dx
        } else {
            dy * self.diag_cost + dx - dy
        }
    }
}

/// Hashes a location to its row-major cell index: `y * width + x`.
/// Injective for every in-bounds location of the map it was built for.
pub struct GridLocHash {
    width: u64,
}

impl GridLocHash {
    #[track_caller]
    pub fn new(map: &GridMap) -> Self {
        GridLocHash {
            width: map.width() as u64,
        }
    }
}

impl StateHash<(i32, i32)> for GridLocHash {
    fn state_hash(&self, state: &(i32, i32)) -> u64 {
        state.1 as u64 * self.width + state.0 as u64
    }
}
