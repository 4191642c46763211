//! Grid pathfinding as a transition system over `(x, y)` locations.

use wayfind_core::fp::fp_less;
use wayfind_core::traits::TransitionSystem;

use crate::map::GridMap;

/// The default cost of a diagonal move.
pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// A move on the grid. `Dummy` is the reserved root sentinel; it is never
/// applicable and never enumerated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GridDir {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Dummy,
}

impl GridDir {
    /// The `(dx, dy)` displacement of this move. North is negative y.
    pub fn offset(self) -> (i32, i32) {
        match self {
            GridDir::North => (0, -1),
            GridDir::NorthEast => (1, -1),
            GridDir::East => (1, 0),
            GridDir::SouthEast => (1, 1),
            GridDir::South => (0, 1),
            GridDir::SouthWest => (-1, 1),
            GridDir::West => (-1, 0),
            GridDir::NorthWest => (-1, -1),
            GridDir::Dummy => (0, 0),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            GridDir::NorthEast | GridDir::SouthEast | GridDir::SouthWest | GridDir::NorthWest
        )
    }

    pub fn opposite(self) -> GridDir {
        match self {
            GridDir::North => GridDir::South,
            GridDir::NorthEast => GridDir::SouthWest,
            GridDir::East => GridDir::West,
            GridDir::SouthEast => GridDir::NorthWest,
            GridDir::South => GridDir::North,
            GridDir::SouthWest => GridDir::NorthEast,
            GridDir::West => GridDir::East,
            GridDir::NorthWest => GridDir::SouthEast,
            GridDir::Dummy => GridDir::Dummy,
        }
    }
}

/// 4- or 8-connected movement on a [`GridMap`].
///
/// Straight moves cost 1; diagonal moves cost the configured diagonal cost
/// and require both adjacent orthogonal cells and the corner cell to be
/// traversable (no corner cutting).
pub struct GridTransitions {
    map: GridMap,
    four_connected: bool,
    diag_cost: f64,
}

impl GridTransitions {
    /// 4-connected transitions over `map`.
    pub fn new(map: GridMap) -> Self {
        GridTransitions {
            map,
            four_connected: true,
            diag_cost: SQRT_2,
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn set_4_connected(&mut self) {
        self.four_connected = true;
    }

    pub fn set_8_connected(&mut self) {
        self.four_connected = false;
    }

    pub fn is_4_connected(&self) -> bool {
        self.four_connected
    }

    pub fn is_8_connected(&self) -> bool {
        !self.four_connected
    }

    /// Sets the diagonal move cost. Rejects negative costs, returning false
    /// and leaving the cost unchanged.
    pub fn set_diagonal_cost(&mut self, cost: f64) -> bool {
        if fp_less(cost, 0.0) {
            return false;
        }
        self.diag_cost = cost;
        true
    }

    pub fn diagonal_cost(&self) -> f64 {
        self.diag_cost
    }

    fn can_move(&self, (x, y): (i32, i32), dir: GridDir) -> bool {
        let (dx, dy) = dir.offset();
        if dir.is_diagonal() {
            if self.four_connected {
                return false;
            }
            // Both orthogonal cells and the corner must be open.
            self.map.get(x + dx, y) && self.map.get(x, y + dy) && self.map.get(x + dx, y + dy)
        } else {
            self.map.get(x + dx, y + dy)
        }
    }
}

impl TransitionSystem for GridTransitions {
    type State = (i32, i32);
    type Action = GridDir;

    fn get_actions(&self, state: &(i32, i32), actions: &mut Vec<GridDir>) {
        debug_assert!(
            self.map.get(state.0, state.1),
            "expanding an untraversable location ({}, {})",
            state.0,
            state.1
        );
        use GridDir::*;
        for dir in [North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest] {
            if self.can_move(*state, dir) {
                actions.push(dir);
            }
        }
    }

    fn action_cost(&self, _state: &(i32, i32), action: GridDir) -> f64 {
        if action.is_diagonal() {
            self.diag_cost
        } else {
            1.0
        }
    }

    fn apply_action(&self, state: &mut (i32, i32), action: GridDir) {
        let (dx, dy) = action.offset();
        state.0 += dx;
        state.1 += dy;
    }

    fn dummy_action(&self) -> GridDir {
        GridDir::Dummy
    }

    fn is_applicable(&self, state: &(i32, i32), action: GridDir) -> bool {
        if action == GridDir::Dummy {
            return false;
        }
        self.can_move(*state, action)
    }

    fn is_invertible(&self, _state: &(i32, i32), action: GridDir) -> bool {
        action != GridDir::Dummy
    }

    fn inverse(&self, _state: &(i32, i32), action: GridDir) -> GridDir {
        action.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3x3 map with a blocked center:
    //   ...
    //   .@.
    //   ...
    fn ring_map() -> GridMap {
        let mut map = GridMap::empty(3, 3);
        map.set(1, 1, false);
        map
    }

    #[test]
    fn four_connected_enumerates_open_orthogonals() {
        let ops = GridTransitions::new(ring_map());
        let mut actions = vec![];
        ops.get_actions(&(0, 0), &mut actions);
        assert_eq!(actions, vec![GridDir::East, GridDir::South]);

        actions.clear();
        ops.get_actions(&(1, 0), &mut actions);
        // South is the blocked center.
        assert_eq!(actions, vec![GridDir::East, GridDir::West]);
    }

    #[test]
    fn eight_connected_blocks_corner_cutting() {
        let mut ops = GridTransitions::new(ring_map());
        ops.set_8_connected();

        // From (0, 0), the south-east diagonal passes the blocked center.
        assert!(!ops.is_applicable(&(0, 0), GridDir::SouthEast));
        let mut actions = vec![];
        ops.get_actions(&(0, 0), &mut actions);
        assert_eq!(actions, vec![GridDir::East, GridDir::South]);

        // On an open map, the diagonal is fine.
        let mut open = GridTransitions::new(GridMap::empty(3, 3));
        open.set_8_connected();
        assert!(open.is_applicable(&(0, 0), GridDir::SouthEast));
    }

    #[test]
    fn costs_distinguish_straight_and_diagonal() {
        let mut ops = GridTransitions::new(GridMap::empty(3, 3));
        ops.set_8_connected();
        assert_eq!(ops.action_cost(&(0, 0), GridDir::East), 1.0);
        assert_eq!(ops.action_cost(&(0, 0), GridDir::SouthEast), SQRT_2);

        assert!(ops.set_diagonal_cost(1.5));
        assert_eq!(ops.action_cost(&(0, 0), GridDir::SouthEast), 1.5);
        assert!(!ops.set_diagonal_cost(-1.0));
        assert_eq!(ops.diagonal_cost(), 1.5);
    }

    #[test]
    fn actions_move_and_invert() {
        let ops = GridTransitions::new(GridMap::empty(3, 3));
        let mut state = (1, 1);
        ops.apply_action(&mut state, GridDir::North);
        assert_eq!(state, (1, 0));
        ops.apply_action(&mut state, GridDir::SouthEast);
        assert_eq!(state, (2, 1));

        assert_eq!(ops.inverse(&state, GridDir::SouthEast), GridDir::NorthWest);
        assert!(!ops.is_invertible(&state, GridDir::Dummy));
        assert!(!ops.is_applicable(&state, GridDir::Dummy));
    }

    #[test]
    fn edges_of_the_map_are_walls() {
        let ops = GridTransitions::new(GridMap::empty(2, 2));
        assert!(!ops.is_applicable(&(0, 0), GridDir::North));
        assert!(!ops.is_applicable(&(0, 0), GridDir::West));
        assert!(ops.is_applicable(&(0, 0), GridDir::East));
    }
}
