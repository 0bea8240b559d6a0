use super::super::attack_tables::KING_ATTACKS;
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    pub(crate) fn generate_king_moves(&self, color: Color, from: Square, moves: &mut MoveList) {
        let back_rank = color.back_rank();
        let own_occ = self.occupied_by(color).0;
        let targets = Bitboard(KING_ATTACKS[from.as_index()] & !own_occ);

        for to_sq in targets.iter() {
            moves.push(self.create_move(color, from, to_sq, None));
        }

        if from != Square(back_rank, 4) {
            return;
        }
        let rights = self.castling_rights;
        let enemy = color.opponent();
        // King may not start, pass or land on an attacked square
        let path_safe = |squares: [Square; 3]| {
            squares
                .iter()
                .all(|sq| !self.is_square_attacked(*sq, enemy))
        };

        if rights.has(color, true)
            && self.is_empty(Square(back_rank, 5))
            && self.is_empty(Square(back_rank, 6))
            && self.piece_at(Square(back_rank, 7)) == Some((color, Piece::Rook))
            && path_safe([from, Square(back_rank, 5), Square(back_rank, 6)])
        {
            moves.push(Move::castle_kingside(from, Square(back_rank, 6)));
        }
        if rights.has(color, false)
            && self.is_empty(Square(back_rank, 1))
            && self.is_empty(Square(back_rank, 2))
            && self.is_empty(Square(back_rank, 3))
            && self.piece_at(Square(back_rank, 0)) == Some((color, Piece::Rook))
            && path_safe([from, Square(back_rank, 3), Square(back_rank, 2)])
        {
            moves.push(Move::castle_queenside(from, Square(back_rank, 2)));
        }
    }
}
