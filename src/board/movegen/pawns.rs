use super::super::{Board, Color, Move, MoveList, Square, PROMOTION_PIECES};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, color: Color, from: Square, moves: &mut MoveList) {
        let dir = color.pawn_direction();
        let promotion_rank = color.pawn_promotion_rank();

        let Some(forward_sq) = from.offset(dir, 0) else {
            return;
        };

        if self.is_empty(forward_sq) {
            if forward_sq.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(self.create_move(color, from, forward_sq, Some(promo)));
                }
            } else {
                moves.push(Move::quiet(from, forward_sq));
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double_sq) = from.offset(2 * dir, 0) {
                        if self.is_empty(double_sq) {
                            moves.push(Move::double_pawn_push(from, double_sq));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target_sq) = from.offset(dir, df) else {
                continue;
            };
            match self.color_on(target_sq) {
                Some(target_color) if target_color != color => {
                    if target_sq.rank() == promotion_rank {
                        for promo in PROMOTION_PIECES {
                            moves.push(self.create_move(color, from, target_sq, Some(promo)));
                        }
                    } else {
                        moves.push(Move::capture(from, target_sq));
                    }
                }
                Some(_) => {}
                None => {
                    if color == self.side_to_move() && Some(target_sq) == self.en_passant_target {
                        moves.push(Move::en_passant(from, target_sq));
                    }
                }
            }
        }
    }
}
