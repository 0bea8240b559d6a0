use std::collections::HashMap;

use super::error::PositionError;
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};

/// Number of halfmoves without a capture or pawn move that ends the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of a position that make a threefold repetition.
pub const REPETITION_DRAW_COUNT: u32 = 3;

#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<(Color, Piece, Square)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_hash: u64,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
}

/// Occurrence counts of every position key reached since the board was set up.
///
/// Updated by `make_move`/`unmake_move`, so repetition queries never need to
/// replay the game.
#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, hash: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&hash);
        } else {
            self.counts.insert(hash, count);
        }
    }

    pub(crate) fn increment(&mut self, hash: u64) -> u32 {
        let next = self.get(hash).saturating_add(1);
        self.set(hash, next);
        next
    }

    pub(crate) fn decrement(&mut self, hash: u64) {
        let next = self.get(hash).saturating_sub(1);
        self.set(hash, next);
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) white_to_move: bool,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) hash: u64, // Zobrist hash
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<Move>,
    pub(crate) repetition_counts: RepetitionTable,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (i, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square(0, i), Color::White, *piece);
            board.set_piece(Square(7, i), Color::Black, *piece);
            board.set_piece(Square(1, i), Color::White, Piece::Pawn);
            board.set_piece(Square(6, i), Color::Black, Piece::Pawn);
        }

        board.castling_rights = CastlingRights::all();
        board.white_to_move = true;
        board.hash = board.calculate_initial_hash();
        board.repetition_counts.set(board.hash, 1);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard(0); 6]; 2],
            occupied: [Bitboard(0); 2],
            all_occupied: Bitboard(0),
            white_to_move: true,
            en_passant_target: None,
            castling_rights: CastlingRights::none(),
            hash: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            repetition_counts: RepetitionTable::new(),
        }
    }

    /// Position key: equal for positions with the same placement, side to
    /// move, castling rights and en passant file.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Moves played on this board since it was set up, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// How many times the position with key `hash` has occurred, counting
    /// the setup position and the current one.
    pub fn repetition_count(&self, hash: u64) -> u32 {
        self.repetition_counts.get(hash)
    }

    /// Bitboard of one color's pieces of one type.
    #[inline]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).iter().next()
    }

    /// Fifty-move rule or threefold repetition.
    pub fn is_draw(&self) -> bool {
        if self.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            return true;
        }
        self.repetition_counts.get(self.hash) >= REPETITION_DRAW_COUNT
    }

    /// Neither side can ever deliver mate: bare kings, a single minor piece,
    /// or only same-colored bishops.
    pub fn is_insufficient_material(&self) -> bool {
        let both = |piece: Piece| {
            self.pieces(Color::White, piece)
                .or(self.pieces(Color::Black, piece))
        };

        if !both(Piece::Pawn).is_empty()
            || !both(Piece::Rook).is_empty()
            || !both(Piece::Queen).is_empty()
        {
            return false;
        }

        let knights = both(Piece::Knight).popcount();
        let bishops = both(Piece::Bishop);

        if knights + bishops.popcount() <= 1 {
            return true;
        }

        if knights == 0 {
            return bishops_all_same_color(bishops);
        }

        false
    }

    /// Check that the board is a playable game state.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            let found = self.pieces(color, Piece::King).popcount();
            if found != 1 {
                return Err(PositionError::KingCount { color, found });
            }
        }
        let waiting = self.side_to_move().opponent();
        if self.is_in_check(waiting) {
            return Err(PositionError::OpponentInCheck { color: waiting });
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

fn bishops_all_same_color(bishops: Bitboard) -> bool {
    bishops.and(Bitboard::LIGHT_SQUARES).is_empty() || bishops.and(Bitboard::DARK_SQUARES).is_empty()
}
