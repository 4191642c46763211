//! Generic best-first state-space search, with grid pathfinding and
//! sliding-tile puzzle domains.
//!
//! The engine core lives in [`wayfind_core`], re-exported here; the bundled
//! domains are available as [`grid`] and [`tiles`]. This crate adds
//! pre-wired engine types for the common configurations.

pub use wayfind_core::*;
pub use wayfind_grid as grid;
pub use wayfind_tiles as tiles;

use wayfind_core::traits::SingleGoalTest;
use wayfind_grid::{GridLocHash, GridMap, GridTransitions, ManhattanDistance, OctileDistance};
use wayfind_tiles::{PermutationHash, TileCost, TileManhattan, TileState, TileTransitions};

/// A grid pathfinding engine using the Manhattan heuristic, for
/// 4-connected maps.
pub type GridSearch =
    BestFirstSearch<GridTransitions, ManhattanDistance, GridLocHash, SingleGoalTest<(i32, i32)>>;

/// A grid pathfinding engine using the octile heuristic, for 8-connected
/// maps.
pub type OctileGridSearch =
    BestFirstSearch<GridTransitions, OctileDistance, GridLocHash, SingleGoalTest<(i32, i32)>>;

/// A sliding-tile puzzle engine using the cost-weighted Manhattan
/// heuristic.
pub type TileSearch =
    BestFirstSearch<TileTransitions, TileManhattan, PermutationHash, SingleGoalTest<TileState>>;

/// Wires up a ready-to-run 4-connected grid engine for one goal.
pub fn grid_engine(eval_fn: EvalFn, map: GridMap, goal: (i32, i32)) -> GridSearch {
    let ops = GridTransitions::new(map);
    let mut engine = GridSearch::new(eval_fn);
    engine.set_hash_function(GridLocHash::new(ops.map()));
    engine.set_heuristic(ManhattanDistance::new(goal));
    engine.set_goal_test(SingleGoalTest::new(goal));
    engine.set_transition_system(ops);
    engine
}

/// Wires up a ready-to-run 8-connected grid engine for one goal.
pub fn octile_grid_engine(eval_fn: EvalFn, map: GridMap, goal: (i32, i32)) -> OctileGridSearch {
    let mut ops = GridTransitions::new(map);
    ops.set_8_connected();
    let mut engine = OctileGridSearch::new(eval_fn);
    engine.set_hash_function(GridLocHash::new(ops.map()));
    engine.set_heuristic(OctileDistance::new(goal));
    engine.set_goal_test(SingleGoalTest::new(goal));
    engine.set_transition_system(ops);
    engine
}

/// Wires up a ready-to-run tile puzzle engine solving to the canonical goal
/// state.
pub fn tile_engine(eval_fn: EvalFn, rows: usize, cols: usize, cost: TileCost) -> TileSearch {
    let ops = TileTransitions::new(rows, cols, cost);
    let goal = TileState::goal(rows, cols);
    let mut engine = TileSearch::new(eval_fn);
    engine.set_hash_function(PermutationHash);
    engine.set_heuristic(TileManhattan::new(&goal, &ops));
    engine.set_goal_test(SingleGoalTest::new(goal));
    engine.set_transition_system(ops);
    engine
}
