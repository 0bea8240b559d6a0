mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::attack_tables::{slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

type PieceBoards = [[Bitboard; 6]; 2];

/// True if any `attacker` piece in `pieces` attacks `square`.
fn attacked_in(pieces: &PieceBoards, square: Square, attacker: Color) -> bool {
    let target_idx = square.as_index();
    let own = &pieces[attacker.index()];
    let occupancy = pieces
        .iter()
        .flat_map(|side| side.iter())
        .fold(0u64, |acc, bb| acc | bb.0);

    // Pawns of `attacker` that hit `square` sit where the other color's pawn attacks reach
    let pawn_sources = PAWN_ATTACKS[attacker.opponent().index()][target_idx];
    if own[Piece::Pawn.index()].0 & pawn_sources != 0 {
        return true;
    }
    if own[Piece::Knight.index()].0 & KNIGHT_ATTACKS[target_idx] != 0 {
        return true;
    }
    if own[Piece::King.index()].0 & KING_ATTACKS[target_idx] != 0 {
        return true;
    }

    let queens = own[Piece::Queen.index()].0;
    let rook_like = own[Piece::Rook.index()].0 | queens;
    let bishop_like = own[Piece::Bishop.index()].0 | queens;

    slider_attacks(target_idx, occupancy, false) & rook_like != 0
        || slider_attacks(target_idx, occupancy, true) & bishop_like != 0
}

impl Board {
    /// Build a move from `from` to `to` for `color`, flagged as a capture when
    /// an enemy piece stands on `to`.
    fn create_move(&self, color: Color, from: Square, to: Square, promotion: Option<Piece>) -> Move {
        let is_capture = self.color_on(to) == Some(color.opponent());
        match (promotion, is_capture) {
            (Some(piece), true) => Move::new_promotion_capture(from, to, piece),
            (Some(piece), false) => Move::new_promotion(from, to, piece),
            (None, true) => Move::capture(from, to),
            (None, false) => Move::quiet(from, to),
        }
    }

    /// Moves for `color` that obey piece movement but may leave its king attacked.
    ///
    /// Ordered by piece type (pawns first) and then by origin square.
    fn generate_pseudo_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();

        for from in self.pieces(color, Piece::Pawn).iter() {
            self.generate_pawn_moves(color, from, &mut moves);
        }
        for from in self.pieces(color, Piece::Knight).iter() {
            self.generate_knight_moves(color, from, &mut moves);
        }
        for from in self.pieces(color, Piece::Bishop).iter() {
            self.generate_slider_moves(color, from, SliderType::Bishop, &mut moves);
        }
        for from in self.pieces(color, Piece::Rook).iter() {
            self.generate_slider_moves(color, from, SliderType::Rook, &mut moves);
        }
        for from in self.pieces(color, Piece::Queen).iter() {
            self.generate_slider_moves(color, from, SliderType::Queen, &mut moves);
        }
        for from in self.pieces(color, Piece::King).iter() {
            self.generate_king_moves(color, from, &mut moves);
        }
        moves
    }

    /// Piece placement after `mv` is played by `color`, without touching
    /// clocks, rights or history.
    fn pieces_after(&self, color: Color, mv: Move) -> PieceBoards {
        let mut pieces = self.pieces;
        let (from, to) = (mv.from(), mv.to());
        let c_idx = color.index();
        let o_idx = color.opponent().index();

        if let Some(captured_sq) = mv.captured_square() {
            let bit = Bitboard::from_square(captured_sq).0;
            for bb in pieces[o_idx].iter_mut() {
                bb.0 &= !bit;
            }
        }

        let moving = self.piece_on(from).unwrap_or(Piece::Pawn);
        let placed = mv.promotion().unwrap_or(moving);
        pieces[c_idx][moving.index()].0 &= !Bitboard::from_square(from).0;
        pieces[c_idx][placed.index()].0 |= Bitboard::from_square(to).0;

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            let rooks = &mut pieces[c_idx][Piece::Rook.index()];
            rooks.0 &= !Bitboard::from_square(rook_from).0;
            rooks.0 |= Bitboard::from_square(rook_to).0;
        }
        pieces
    }

    /// True if `mv` does not leave `color`'s king attacked.
    fn keeps_king_safe(&self, color: Color, mv: Move) -> bool {
        let after = self.pieces_after(color, mv);
        match after[color.index()][Piece::King.index()].iter().next() {
            Some(king_sq) => !attacked_in(&after, king_sq, color.opponent()),
            None => true,
        }
    }

    /// Legal moves for `color` in this placement, whichever side is to move.
    ///
    /// When `color` is not the side to move, the position is treated as if
    /// it were `color`'s turn: en passant is not available to it, since the
    /// en passant target belongs to the side to move.
    pub fn moves_for_side(&self, color: Color) -> MoveList {
        let pseudo_moves = self.generate_pseudo_moves(color);
        let mut legal_moves = MoveList::new();
        for mv in pseudo_moves {
            if self.keeps_king_safe(color, mv) {
                legal_moves.push(mv);
            }
        }
        legal_moves
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.moves_for_side(self.side_to_move())
    }

    /// True if `square` is attacked by any piece of `attacker_color`.
    pub fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        attacked_in(&self.pieces, square, attacker_color)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    /// True if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move())
    }

    /// True if playing `mv` for the side to move attacks the enemy king.
    pub fn gives_check(&self, mv: Move) -> bool {
        let color = self.side_to_move();
        let after = self.pieces_after(color, mv);
        match after[color.opponent().index()][Piece::King.index()].iter().next() {
            Some(king_sq) => attacked_in(&after, king_sq, color),
            None => false,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in moves.iter() {
            let info = self.make_move(*m);
            nodes += self.perft(depth - 1);
            self.unmake_move(*m, info);
        }

        nodes
    }
}

/// Rook origin and destination for a castling move whose king lands on `king_to`.
pub(crate) const fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    if king_to.file() == 6 {
        (Square(king_to.rank(), 7), Square(king_to.rank(), 5))
    } else {
        (Square(king_to.rank(), 0), Square(king_to.rank(), 3))
    }
}
