use crate::zobrist::ZOBRIST;

use super::movegen::castle_rook_squares;
use super::{bit_for_square, Board, Color, Move, MoveError, Piece, Square, UnmakeInfo};

impl Board {
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 |= bit;
        self.occupied[c_idx].0 |= bit;
        self.all_occupied.0 |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 &= !bit;
        self.occupied[c_idx].0 &= !bit;
        self.all_occupied.0 &= !bit;
    }

    /// Color and type of the piece on `sq`, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = bit_for_square(sq).0;
        if self.all_occupied.0 & bit == 0 {
            return None;
        }

        let color = if self.occupied[Color::White.index()].0 & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces(color, *piece).0 & bit != 0)
            .map(|piece| (color, piece))
    }

    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.all_occupied.0 & bit_for_square(sq).0 == 0
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    pub(crate) fn calculate_initial_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.black_to_move_key;
        }

        hash ^= ZOBRIST.castling(self.castling_rights.as_u8());

        if let Some(ep_square) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_keys[ep_square.file()];
        }

        hash
    }

    /// Play `m` for the side to move, updating hash, rights, clocks, history
    /// and repetition counts.
    ///
    /// `m` must come from `legal_moves()` for this exact position.
    ///
    /// # Panics
    ///
    /// Panics if the origin square of `m` is empty.
    pub fn make_move(&mut self, m: Move) -> UnmakeInfo {
        let mut current_hash = self.hash;
        let color = self.side_to_move();

        let info = UnmakeInfo {
            captured: None,
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_hash: self.hash,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
        };

        current_hash ^= ZOBRIST.black_to_move_key;
        if let Some(old_ep) = self.en_passant_target {
            current_hash ^= ZOBRIST.en_passant_keys[old_ep.file()];
        }
        current_hash ^= ZOBRIST.castling(self.castling_rights.as_u8());

        let mut captured = None;
        if let Some(capture_sq) = m.captured_square() {
            if let Some((cap_color, cap_piece)) = self.piece_at(capture_sq) {
                self.remove_piece(capture_sq, cap_color, cap_piece);
                current_hash ^= ZOBRIST.piece(cap_color, cap_piece, capture_sq);
                captured = Some((cap_color, cap_piece, capture_sq));
            }
        }

        let (_, moving_piece) = self
            .piece_at(m.from())
            .expect("make_move: origin square is empty");
        self.remove_piece(m.from(), color, moving_piece);
        current_hash ^= ZOBRIST.piece(color, moving_piece, m.from());

        let placed = m.promotion().unwrap_or(moving_piece);
        self.set_piece(m.to(), color, placed);
        current_hash ^= ZOBRIST.piece(color, placed, m.to());

        if m.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(m.to());
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            current_hash ^= ZOBRIST.piece(color, Piece::Rook, rook_from);
            current_hash ^= ZOBRIST.piece(color, Piece::Rook, rook_to);
        }

        if moving_piece == Piece::King {
            self.castling_rights.clear_color(color);
        }
        self.castling_rights.clear_for_corner(m.from().rank(), m.from().file());
        self.castling_rights.clear_for_corner(m.to().rank(), m.to().file());
        current_hash ^= ZOBRIST.castling(self.castling_rights.as_u8());

        self.en_passant_target = None;
        if m.is_double_pawn_push() {
            let ep_sq = Square((m.from().rank() + m.to().rank()) / 2, m.from().file());
            self.en_passant_target = Some(ep_sq);
            current_hash ^= ZOBRIST.en_passant_keys[ep_sq.file()];
        }

        if moving_piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.white_to_move = !self.white_to_move;
        self.hash = current_hash;
        self.history.push(m);
        self.repetition_counts.increment(current_hash);

        UnmakeInfo { captured, ..info }
    }

    /// Undo `m`, which must be the last move made with `make_move`.
    pub fn unmake_move(&mut self, m: Move, info: UnmakeInfo) {
        self.repetition_counts.decrement(self.hash);
        self.history.pop();

        self.white_to_move = !self.white_to_move;
        let color = self.side_to_move();

        if let Some((_, placed)) = self.piece_at(m.to()) {
            self.remove_piece(m.to(), color, placed);
            let original = if m.is_promotion() { Piece::Pawn } else { placed };
            self.set_piece(m.from(), color, original);
        }

        if m.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(m.to());
            self.remove_piece(rook_to, color, Piece::Rook);
            self.set_piece(rook_from, color, Piece::Rook);
        }

        if let Some((cap_color, cap_piece, cap_sq)) = info.captured {
            self.set_piece(cap_sq, cap_color, cap_piece);
        }

        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.hash = info.previous_hash;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;
    }

    /// Play `m` if it is legal here, otherwise leave the board untouched.
    pub fn play(&mut self, m: Move) -> Result<(), MoveError> {
        if !self.legal_moves().contains(m) {
            return Err(MoveError::IllegalMove {
                mv: m,
                fen: self.to_fen(),
            });
        }
        self.make_move(m);
        Ok(())
    }

    /// A copy of this board with `m` played, or an error if `m` is not legal.
    pub fn apply_move(&self, m: Move) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.play(m)?;
        Ok(next)
    }

    /// Start from `start` and play `moves` in order.
    pub fn replay(start: &Board, moves: &[Move]) -> Result<Board, MoveError> {
        let mut board = start.clone();
        for m in moves {
            board.play(*m)?;
        }
        Ok(board)
    }
}
