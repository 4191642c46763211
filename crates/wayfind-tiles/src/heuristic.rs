//! Cost-weighted Manhattan distance for the sliding-tile puzzle.

use wayfind_core::traits::Heuristic;

use crate::state::TileState;
use crate::transitions::TileTransitions;

/// Sum over tiles of the tile's Manhattan distance to its goal position,
/// weighted by that tile's move cost. Admissible and consistent for every
/// per-tile cost model, since each tile must make at least that many moves
/// at that cost. The blank contributes nothing.
///
/// The per-(tile, position) values are precomputed against a fixed goal.
pub struct TileManhattan {
    /// `tile_h_value[tile][pos]`: weighted distance of `tile` at `pos` from
    /// its goal position.
    tile_h_value: Vec<Vec<f64>>,
}

impl TileManhattan {
    pub fn new(goal: &TileState, ops: &TileTransitions) -> Self {
        let mut h = TileManhattan { tile_h_value: vec![] };
        h.set_goal(goal, ops);
        h
    }

    pub fn set_goal(&mut self, goal: &TileState, ops: &TileTransitions) {
        let cols = goal.cols();
        let size = goal.rows() * cols;

        self.tile_h_value = vec![vec![0.0; size]; size];
        for goal_pos in 0..size {
            let tile = goal.permutation()[goal_pos] as usize;
            if tile == 0 {
                continue;
            }
            for pos in 0..size {
                let col_diff = (goal_pos % cols).abs_diff(pos % cols);
                let row_diff = (goal_pos / cols).abs_diff(pos / cols);
                self.tile_h_value[tile][pos] =
                    (col_diff + row_diff) as f64 * ops.tile_move_cost(tile);
            }
        }
    }
}

impl Heuristic<TileState> for TileManhattan {
    fn h_value(&mut self, state: &TileState) -> f64 {
        let mut h_value = 0.0;
        for (pos, &tile) in state.permutation().iter().enumerate() {
            if pos != state.blank() {
                h_value += self.tile_h_value[tile as usize][pos];
            }
        }
        h_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::TileCost;
    use wayfind_core::fp::fp_equal;
    use wayfind_core::traits::TransitionSystem;

    #[test]
    fn goal_state_scores_zero() {
        let goal = TileState::goal(3, 3);
        let ops = TileTransitions::new(3, 3, TileCost::Unit);
        let mut h = TileManhattan::new(&goal, &ops);
        assert_eq!(h.h_value(&goal), 0.0);
    }

    #[test]
    fn displaced_tiles_sum_their_distances() {
        let goal = TileState::goal(3, 3);
        let ops = TileTransitions::new(3, 3, TileCost::Unit);
        let mut h = TileManhattan::new(&goal, &ops);

        // Tile 1 at position 0 (one column off), blank at position 1.
        let state = TileState::new(vec![1, 0, 2, 3, 4, 5, 6, 7, 8], 3, 3).unwrap();
        assert_eq!(h.h_value(&state), 1.0);

        // Tile 5 moved to the opposite corner: from (2, 1) to (0, 0) is 3.
        let state = TileState::new(vec![5, 1, 2, 3, 4, 0, 6, 7, 8], 3, 3).unwrap();
        assert_eq!(h.h_value(&state), 3.0);
    }

    #[test]
    fn heavy_costs_scale_the_estimate() {
        let goal = TileState::goal(3, 3);
        let ops = TileTransitions::new(3, 3, TileCost::Heavy);
        let mut h = TileManhattan::new(&goal, &ops);

        let state = TileState::new(vec![5, 1, 2, 3, 4, 0, 6, 7, 8], 3, 3).unwrap();
        assert_eq!(h.h_value(&state), 15.0);
    }

    #[test]
    fn estimate_never_exceeds_the_true_cost_on_a_short_walk() {
        // Walk the blank around; h must stay a lower bound on moves made.
        let goal = TileState::goal(2, 2);
        let ops = TileTransitions::new(2, 2, TileCost::Unit);
        let mut h = TileManhattan::new(&goal, &ops);

        let mut state = goal.clone();
        let mut cost = 0.0;
        for action in [
            crate::transitions::BlankSlide::Down,
            crate::transitions::BlankSlide::Right,
            crate::transitions::BlankSlide::Up,
        ] {
            cost += ops.action_cost(&state, action);
            ops.apply_action(&mut state, action);
            assert!(h.h_value(&state) <= cost || fp_equal(h.h_value(&state), cost));
        }
    }
}
