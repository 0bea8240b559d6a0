use super::super::attack_tables::slider_attacks;
use super::super::{Bitboard, Board, Color, MoveList, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        color: Color,
        from: Square,
        slider: SliderType,
        moves: &mut MoveList,
    ) {
        let own_occ = self.occupied_by(color).0;
        let occupancy = self.all_occupied.0;
        let from_idx = from.as_index();

        let targets_raw = match slider {
            SliderType::Bishop => slider_attacks(from_idx, occupancy, true),
            SliderType::Rook => slider_attacks(from_idx, occupancy, false),
            SliderType::Queen => {
                slider_attacks(from_idx, occupancy, false) | slider_attacks(from_idx, occupancy, true)
            }
        } & !own_occ;

        for to_sq in Bitboard(targets_raw).iter() {
            moves.push(self.create_move(color, from, to_sq, None));
        }
    }
}
