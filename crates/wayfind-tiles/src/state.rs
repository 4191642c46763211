//! Sliding-tile puzzle states.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("permutation has {got} entries, expected {expected}")]
    WrongSize { got: usize, expected: usize },
    #[error("permutation does not contain value {0} exactly once")]
    NotAPermutation(u8),
}

/// A sliding-tile puzzle position: a permutation of `rows * cols` values
/// laid out row-major, where 0 is the blank.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TileState {
    pub(crate) permutation: Vec<u8>,
    rows: usize,
    cols: usize,
    pub(crate) blank: usize,
}

impl TileState {
    /// The canonical goal state: tiles in order, blank in the top-left.
    pub fn goal(rows: usize, cols: usize) -> Self {
        TileState {
            permutation: (0..(rows * cols) as u8).collect(),
            rows,
            cols,
            blank: 0,
        }
    }

    /// Builds a state from an explicit permutation, validating that it is
    /// one.
    pub fn new(permutation: Vec<u8>, rows: usize, cols: usize) -> Result<Self, TileError> {
        let size = rows * cols;
        if permutation.len() != size {
            return Err(TileError::WrongSize {
                got: permutation.len(),
                expected: size,
            });
        }
        let mut seen = vec![false; size];
        for &value in &permutation {
            if (value as usize) >= size || seen[value as usize] {
                return Err(TileError::NotAPermutation(value));
            }
            seen[value as usize] = true;
        }

        let blank = permutation.iter().position(|&v| v == 0).unwrap();
        Ok(TileState {
            permutation,
            rows,
            cols,
            blank,
        })
    }

    pub fn permutation(&self) -> &[u8] {
        &self.permutation
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The blank's position in the permutation.
    pub fn blank(&self) -> usize {
        self.blank
    }
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}x{})-[", self.rows, self.cols)?;
        for (i, value) in self.permutation.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", if i % self.cols == 0 { "," } else { " " })?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_state_is_the_identity() {
        let goal = TileState::goal(2, 3);
        assert_eq!(goal.permutation(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(goal.blank(), 0);
    }

    #[test]
    fn construction_finds_the_blank() {
        let state = TileState::new(vec![3, 1, 2, 0], 2, 2).unwrap();
        assert_eq!(state.blank(), 3);
    }

    #[test]
    fn construction_validates_the_permutation() {
        assert!(matches!(
            TileState::new(vec![0, 1, 2], 2, 2),
            Err(TileError::WrongSize { got: 3, expected: 4 })
        ));
        assert!(matches!(
            TileState::new(vec![0, 1, 1, 3], 2, 2),
            Err(TileError::NotAPermutation(1))
        ));
        assert!(matches!(
            TileState::new(vec![0, 1, 2, 4], 2, 2),
            Err(TileError::NotAPermutation(4))
        ));
    }

    #[test]
    fn display_groups_rows() {
        let state = TileState::goal(2, 2);
        assert_eq!(state.to_string(), "(2x2)-[0 1,2 3]");
    }
}
