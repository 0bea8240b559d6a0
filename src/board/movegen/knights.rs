use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Board, Color, MoveList, Square};

impl Board {
    pub(crate) fn generate_knight_moves(&self, color: Color, from: Square, moves: &mut MoveList) {
        let own_occ = self.occupied_by(color).0;
        let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()] & !own_occ);

        for to_sq in targets.iter() {
            moves.push(self.create_move(color, from, to_sq, None));
        }
    }
}
