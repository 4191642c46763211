//! Blank-slide moves for the sliding-tile puzzle.

use wayfind_core::traits::TransitionSystem;

use crate::state::TileState;

/// A move of the blank. `Dummy` is the reserved root sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlankSlide {
    Up,
    Right,
    Down,
    Left,
    Dummy,
}

impl BlankSlide {
    pub fn opposite(self) -> BlankSlide {
        match self {
            BlankSlide::Up => BlankSlide::Down,
            BlankSlide::Right => BlankSlide::Left,
            BlankSlide::Down => BlankSlide::Up,
            BlankSlide::Left => BlankSlide::Right,
            BlankSlide::Dummy => BlankSlide::Dummy,
        }
    }
}

/// The standard per-tile move cost models.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileCost {
    /// Every move costs 1.
    Unit,
    /// Moving tile `t` costs `t`.
    Heavy,
    /// Moving tile `t` costs `1 / t`.
    Inverse,
}

/// The sliding-tile transition system for a fixed puzzle size.
///
/// The cost of a move is the cost of the tile that slides (the tile the
/// blank swaps with), not of the blank itself. Applicable actions per blank
/// location are precomputed, in the fixed order up, right, down, left.
pub struct TileTransitions {
    rows: usize,
    cols: usize,
    tile_move_cost: Vec<f64>,
    loc_actions: Vec<Vec<BlankSlide>>,
}

impl TileTransitions {
    pub fn new(rows: usize, cols: usize, cost: TileCost) -> Self {
        let size = rows * cols;
        let tile_move_cost = (0..size)
            .map(|tile| match cost {
                _ if tile == 0 => 0.0,
                TileCost::Unit => 1.0,
                TileCost::Heavy => tile as f64,
                TileCost::Inverse => 1.0 / tile as f64,
            })
            .collect();
        Self::with_cost_table(rows, cols, tile_move_cost)
    }

    /// Uses an explicit per-tile cost table. `costs[0]` (the blank) is
    /// ignored.
    #[track_caller]
    pub fn with_costs(rows: usize, cols: usize, mut costs: Vec<f64>) -> Self {
        assert_eq!(
            costs.len(),
            rows * cols,
            "need one cost per tile, including the blank"
        );
        costs[0] = 0.0;
        Self::with_cost_table(rows, cols, costs)
    }

    fn with_cost_table(rows: usize, cols: usize, tile_move_cost: Vec<f64>) -> Self {
        let mut ops = TileTransitions {
            rows,
            cols,
            tile_move_cost,
            loc_actions: vec![],
        };
        use BlankSlide::*;
        let mut loc_actions = Vec::with_capacity(rows * cols);
        for blank in 0..rows * cols {
            loc_actions.push(
                [Up, Right, Down, Left]
                    .into_iter()
                    .filter(|&action| ops.applicable_in(action, blank))
                    .collect(),
            );
        }
        ops.loc_actions = loc_actions;
        ops
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cost of moving `tile`.
    pub fn tile_move_cost(&self, tile: usize) -> f64 {
        self.tile_move_cost[tile]
    }

    fn applicable_in(&self, action: BlankSlide, blank: usize) -> bool {
        match action {
            BlankSlide::Up => blank >= self.cols,
            BlankSlide::Right => blank % self.cols < self.cols - 1,
            BlankSlide::Down => blank < (self.rows - 1) * self.cols,
            BlankSlide::Left => blank % self.cols > 0,
            BlankSlide::Dummy => false,
        }
    }

    /// The position the blank moves to, which holds the tile that slides.
    fn target_loc(&self, blank: usize, action: BlankSlide) -> usize {
        match action {
            BlankSlide::Up => blank - self.cols,
            BlankSlide::Right => blank + 1,
            BlankSlide::Down => blank + self.cols,
            BlankSlide::Left => blank - 1,
            BlankSlide::Dummy => blank,
        }
    }

    fn moving_tile(&self, state: &TileState, action: BlankSlide) -> usize {
        state.permutation[self.target_loc(state.blank, action)] as usize
    }
}

impl TransitionSystem for TileTransitions {
    type State = TileState;
    type Action = BlankSlide;

    fn get_actions(&self, state: &TileState, actions: &mut Vec<BlankSlide>) {
        actions.extend_from_slice(&self.loc_actions[state.blank]);
    }

    fn action_cost(&self, state: &TileState, action: BlankSlide) -> f64 {
        self.tile_move_cost[self.moving_tile(state, action)]
    }

    fn apply_action(&self, state: &mut TileState, action: BlankSlide) {
        let target = self.target_loc(state.blank, action);
        state.permutation[state.blank] = state.permutation[target];
        state.permutation[target] = 0;
        state.blank = target;
    }

    fn dummy_action(&self) -> BlankSlide {
        BlankSlide::Dummy
    }

    fn is_applicable(&self, state: &TileState, action: BlankSlide) -> bool {
        self.applicable_in(action, state.blank)
    }

    fn is_invertible(&self, _state: &TileState, action: BlankSlide) -> bool {
        action != BlankSlide::Dummy
    }

    fn inverse(&self, _state: &TileState, action: BlankSlide) -> BlankSlide {
        action.opposite()
    }
}
