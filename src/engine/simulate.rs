//! Trial application of a single move.

use crate::board::{Board, Move, MoveError};

/// Play `mv` on a copy of `position`. The input is never modified.
///
/// Fails with [`MoveError::IllegalMove`] when `mv` is not a legal move of
/// this exact position.
pub fn simulate(position: &Board, mv: Move) -> Result<Board, MoveError> {
    position.apply_move(mv)
}
