//! Sliding-tile puzzle domain for `wayfind`.
//!
//! Supplies the four search capabilities for rows × cols sliding-tile
//! puzzles: [`TileTransitions`] with unit, heavy, inverse, or custom
//! per-tile move costs, the [`TileManhattan`] heuristic, and the perfect
//! [`PermutationHash`]. Goal tests come from
//! [`wayfind_core::traits::SingleGoalTest`] over a [`TileState`].

mod hash;
mod heuristic;
mod state;
mod transitions;

pub use self::hash::*;
pub use self::heuristic::*;
pub use self::state::*;
pub use self::transitions::*;
