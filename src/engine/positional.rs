//! Static structural evaluation of one side's pieces.

use crate::board::masks::{pawn_shield, ADJACENT_FILES, PASSED_PAWN_MASK, PAWN_SUPPORT_MASK};
use crate::board::{Bitboard, Board, Color, Piece, Square};

use super::PositionalWeights;

const CENTER_SQUARES: [Square; 4] = [Square(3, 3), Square(3, 4), Square(4, 3), Square(4, 4)];

/// Sum of structural bonuses and penalties for `color`'s pieces.
///
/// Only piece placement is read; the result does not depend on side to move,
/// clocks or history.
pub fn positional_points(position: &Board, color: Color, weights: &PositionalWeights) -> f64 {
    let own_pawns = position.pieces(color, Piece::Pawn);
    let enemy_pawns = position.pieces(color.opponent(), Piece::Pawn);
    let all_pawns = own_pawns.or(enemy_pawns);

    let mut points = 0.0;
    for sq in own_pawns.iter() {
        points += pawn_points(color, sq, own_pawns, enemy_pawns, weights);
    }
    for sq in position.pieces(color, Piece::Knight).iter() {
        points += knight_points(sq, weights);
    }
    for sq in position.pieces(color, Piece::Bishop).iter() {
        if sq.rank() != color.back_rank() {
            points += weights.bishop_developed;
        }
    }
    for sq in position.pieces(color, Piece::Rook).iter() {
        if all_pawns.and(Bitboard::file_mask(sq.file())).is_empty() {
            points += weights.rook_open_file;
        }
    }
    if let Some(king_sq) = position.king_square(color) {
        points += king_points(color, king_sq, own_pawns, weights);
    }
    points
}

fn pawn_points(
    color: Color,
    sq: Square,
    own_pawns: Bitboard,
    enemy_pawns: Bitboard,
    weights: &PositionalWeights,
) -> f64 {
    let mut points = 0.0;
    if CENTER_SQUARES.contains(&sq) {
        points += weights.pawn_center;
    }
    if own_pawns.and(ADJACENT_FILES[sq.file()]).is_empty() {
        points += weights.isolated_pawn;
    }
    if own_pawns.and(Bitboard::file_mask(sq.file())).popcount() >= 2 {
        points += weights.doubled_pawn;
    }
    if enemy_pawns
        .and(PASSED_PAWN_MASK[color.index()][sq.as_index()])
        .is_empty()
    {
        points += weights.passed_pawn;
        if !own_pawns
            .and(PAWN_SUPPORT_MASK[color.index()][sq.as_index()])
            .is_empty()
        {
            points += weights.passed_pawn_supported;
        }
    }
    points
}

fn knight_points(sq: Square, weights: &PositionalWeights) -> f64 {
    let (rank, file) = (sq.rank(), sq.file());
    let mut points = 0.0;
    if (2..=5).contains(&file) && (2..=5).contains(&rank) {
        points += weights.knight_center;
    }
    if file == 0 || file == 7 || rank == 0 || rank == 7 {
        points += weights.rim_knight;
    }
    points
}

fn king_points(
    color: Color,
    king_sq: Square,
    own_pawns: Bitboard,
    weights: &PositionalWeights,
) -> f64 {
    let mut points = 0.0;
    let back = color.back_rank();
    if king_sq == Square(back, 6) || king_sq == Square(back, 2) {
        points += weights.king_castled;
    }
    let shield = pawn_shield(color, king_sq);
    let missing = shield.popcount() - shield.and(own_pawns).popcount();
    if missing >= 2 {
        points += weights.exposed_king;
    }
    points
}
