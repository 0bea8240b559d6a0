//! Pre-computed bitboard masks for pawn-structure and king-shield terms.

use super::types::{Bitboard, Color, Square};

/// Files adjacent to each file (0-7)
/// e.g., `ADJACENT_FILES`[3] = files c and e for file d
pub(crate) const ADJACENT_FILES: [Bitboard; 8] = {
    let mut masks = [Bitboard(0); 8];
    let mut f = 0;
    while f < 8 {
        let mut adj = 0u64;
        if f > 0 {
            adj |= Bitboard::FILE_A.0 << (f - 1);
        }
        if f < 7 {
            adj |= Bitboard::FILE_A.0 << (f + 1);
        }
        masks[f] = Bitboard(adj);
        f += 1;
    }
    masks
};

/// Passed pawn masks - squares that would block a pawn from being passed
/// `PASSED_PAWN_MASK`[color][square] = enemy pawns on these squares block passed status
pub(crate) const PASSED_PAWN_MASK: [[Bitboard; 64]; 2] = {
    let mut masks = [[Bitboard(0); 64]; 2];

    let mut sq = 0;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;
        let lo = if file > 0 { file - 1 } else { 0 };
        let hi = if file < 7 { file + 1 } else { 7 };

        let mut r = 0;
        while r < 8 {
            let mut f = lo;
            while f <= hi {
                let bit = 1u64 << (r * 8 + f);
                // White looks at ranks ahead, Black at ranks behind
                if r > rank {
                    masks[0][sq].0 |= bit;
                }
                if r < rank {
                    masks[1][sq].0 |= bit;
                }
                f += 1;
            }
            r += 1;
        }
        sq += 1;
    }
    masks
};

/// Squares diagonally behind a pawn, where a friendly pawn supports it
/// `PAWN_SUPPORT_MASK`[color][square]
pub(crate) const PAWN_SUPPORT_MASK: [[Bitboard; 64]; 2] = {
    let mut masks = [[Bitboard(0); 64]; 2];

    let mut sq = 0;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;

        if rank > 0 {
            if file > 0 {
                masks[0][sq].0 |= 1u64 << ((rank - 1) * 8 + file - 1);
            }
            if file < 7 {
                masks[0][sq].0 |= 1u64 << ((rank - 1) * 8 + file + 1);
            }
        }
        if rank < 7 {
            if file > 0 {
                masks[1][sq].0 |= 1u64 << ((rank + 1) * 8 + file - 1);
            }
            if file < 7 {
                masks[1][sq].0 |= 1u64 << ((rank + 1) * 8 + file + 1);
            }
        }
        sq += 1;
    }
    masks
};

/// Shield squares in front of a king on `king_sq`: the king's file and its
/// neighbours on rank 2 (White) or rank 7 (Black), clipped to the board.
pub(crate) fn pawn_shield(color: Color, king_sq: Square) -> Bitboard {
    let shield_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };
    let files = ADJACENT_FILES[king_sq.file()].or(Bitboard::file_mask(king_sq.file()));
    files.and(Bitboard::rank_mask(shield_rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_mask_covers_three_files_ahead() {
        // White pawn on e4: d5..f8 is 3 files x 4 ranks
        let mask = PASSED_PAWN_MASK[0][Square(3, 4).as_index()];
        assert_eq!(mask.popcount(), 12);
        assert!(mask.contains(Square(4, 3)));
        assert!(!mask.contains(Square(3, 3)));

        // Black pawn on a5: a1..b4
        let mask = PASSED_PAWN_MASK[1][Square(4, 0).as_index()];
        assert_eq!(mask.popcount(), 8);
    }

    #[test]
    fn test_support_mask() {
        let mask = PAWN_SUPPORT_MASK[0][Square(3, 4).as_index()];
        assert!(mask.contains(Square(2, 3)));
        assert!(mask.contains(Square(2, 5)));
        assert_eq!(mask.popcount(), 2);
    }

    #[test]
    fn test_pawn_shield_clipped_at_edge() {
        assert_eq!(pawn_shield(Color::White, Square(0, 6)).popcount(), 3);
        assert_eq!(pawn_shield(Color::Black, Square(7, 7)).popcount(), 2);
        assert!(pawn_shield(Color::Black, Square(7, 7)).contains(Square(6, 6)));
    }
}
