//! Threat analysis: which pieces of a side can be captured right now, and by what.
//!
//! All queries look at legal captures of the *capturing* side through
//! [`Board::moves_for_side`], whether or not that side is to move.

use std::collections::BTreeMap;

use crate::board::{Board, Color, Move, Piece, Square};

/// One legal capture of a threatened piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attacker {
    pub from: Square,
    pub piece: Piece,
    pub value: u32,
}

/// A piece that the opponent can capture immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreatEntry {
    pub square: Square,
    pub color: Color,
    pub piece: Piece,
    pub value: u32,
    /// In move generation order. A promoting capture appears once per
    /// promotion choice.
    pub attackers: Vec<Attacker>,
}

/// Threatened pieces keyed by the square they stand on.
pub type ThreatMap = BTreeMap<Square, ThreatEntry>;

/// Material value of the piece `mv` removes from `position`, if any.
fn captured_value(position: &Board, mv: Move) -> Option<u32> {
    let sq = mv.captured_square()?;
    position.piece_on(sq).map(Piece::material)
}

/// Every piece of `color` that the opponent can legally capture.
///
/// En passant victims are keyed by the square the pawn actually occupies,
/// not the landing square.
pub fn threat_map(position: &Board, color: Color) -> ThreatMap {
    let mut map = ThreatMap::new();
    for mv in position.moves_for_side(color.opponent()).iter() {
        let Some(target) = mv.captured_square() else {
            continue;
        };
        let Some((owner, piece)) = position.piece_at(target) else {
            continue;
        };
        if owner != color {
            continue;
        }
        let Some(attacker_piece) = position.piece_on(mv.from()) else {
            continue;
        };

        let entry = map.entry(target).or_insert_with(|| ThreatEntry {
            square: target,
            color: owner,
            piece,
            value: piece.material(),
            attackers: Vec::new(),
        });
        entry.attackers.push(Attacker {
            from: mv.from(),
            piece: attacker_piece,
            value: attacker_piece.material(),
        });
    }
    map
}

/// Largest material value `color` could capture with one legal move.
pub fn max_capture_value(position: &Board, color: Color) -> u32 {
    position
        .moves_for_side(color)
        .iter()
        .filter_map(|&mv| captured_value(position, mv))
        .max()
        .unwrap_or(0)
}

/// Largest material value the opponent of `color` could capture from it.
pub fn opponent_max_capture_after(position: &Board, color: Color) -> u32 {
    max_capture_value(position, color.opponent())
}

/// Number of legal captures `by` has against whatever stands on `square`.
pub fn attackers_of(position: &Board, square: Square, by: Color) -> usize {
    position
        .moves_for_side(by)
        .iter()
        .filter(|mv| mv.captured_square() == Some(square))
        .count()
}
