//! Chess board representation and game rules.
//!
//! Uses bitboards for move generation and attack queries. Supports full chess
//! rules including castling, en passant, promotions, the fifty-move rule and
//! threefold repetition.
//!
//! # Example
//! ```
//! use stonefish::board::{Board, Color};
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 20);
//! assert_eq!(board.moves_for_side(Color::Black).len(), 20);
//! ```

mod attack_tables;
mod error;
mod fen;
mod make_unmake;
pub(crate) mod masks;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveError, MoveParseError, PositionError, SquareError};
pub use fen::START_FEN;
pub use state::{Board, UnmakeInfo, FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    Square,
};

pub(crate) use types::{bit_for_square, PROMOTION_PIECES};
