//! Precomputed attack tables.
//!
//! Leaper attacks (knight, king, pawn) are plain lookups. Slider attacks walk
//! the precomputed ray in each direction and cut it at the nearest blocker.

use once_cell::sync::Lazy;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        *slot = mask;
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` attacks.
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

const DIR_N: usize = 0;
const DIR_S: usize = 1;
const DIR_E: usize = 2;
const DIR_W: usize = 3;
const DIR_NE: usize = 4;
const DIR_NW: usize = 5;
const DIR_SE: usize = 6;
const DIR_SW: usize = 7;

const ROOK_DIRS: [usize; 4] = [DIR_N, DIR_S, DIR_E, DIR_W];
const BISHOP_DIRS: [usize; 4] = [DIR_NE, DIR_NW, DIR_SE, DIR_SW];

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    let dirs = [
        (1, 0),   // N
        (-1, 0),  // S
        (0, 1),   // E
        (0, -1),  // W
        (1, 1),   // NE
        (1, -1),  // NW
        (-1, 1),  // SE
        (-1, -1), // SW
    ];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for (d, (dr, df)) in dirs.iter().enumerate() {
            let mut mask = 0u64;
            let mut nr = r + dr;
            let mut nf = f + df;
            while (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
                nr += dr;
                nf += df;
            }
            rays[d][sq] = mask;
        }
    }
    rays
});

fn is_increasing_dir(dir: usize) -> bool {
    matches!(dir, DIR_N | DIR_E | DIR_NE | DIR_NW)
}

fn ray_attacks(from_idx: usize, dir: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][from_idx];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let blocker_idx = if is_increasing_dir(dir) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][blocker_idx]
}

/// Sliding attacks from `square` given the full board occupancy.
/// `bishop` = true for diagonal attacks, false for orthogonal ones.
pub(crate) fn slider_attacks(square: usize, occupancy: u64, bishop: bool) -> u64 {
    let dirs = if bishop { &BISHOP_DIRS } else { &ROOK_DIRS };
    dirs.iter()
        .fold(0u64, |acc, &dir| acc | ray_attacks(square, dir, occupancy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_A: u64 = 0x0101010101010101;

    #[test]
    fn test_rook_attacks_empty_board() {
        // Rook on e4 (square 28) sees the whole rank and file
        let attacks = slider_attacks(28, 0, false);
        let expected = ((0xFFu64 << 24) | (FILE_A << 4)) & !(1u64 << 28);
        assert_eq!(attacks, expected);
    }

    #[test]
    fn test_rook_attacks_with_blockers() {
        let blockers = (1u64 << 44) | (1u64 << 26); // e6 and c4
        let attacks = slider_attacks(28, blockers, false);
        assert!(attacks & (1u64 << 44) != 0);
        assert!(attacks & (1u64 << 52) == 0);
        assert!(attacks & (1u64 << 26) != 0);
        assert!(attacks & (1u64 << 25) == 0);
    }

    #[test]
    fn test_bishop_attacks_with_blockers() {
        let attacks = slider_attacks(28, 1u64 << 46, true); // blocker on g6
        assert!(attacks & (1u64 << 46) != 0);
        assert!(attacks & (1u64 << 55) == 0);
        assert!(attacks & (1u64 << 7) != 0); // h1
        assert!(attacks & (1u64 << 56) != 0); // a8
    }

    #[test]
    fn test_leaper_tables() {
        assert_eq!(KNIGHT_ATTACKS[0].count_ones(), 2);
        assert_eq!(KNIGHT_ATTACKS[27].count_ones(), 8);
        assert_eq!(KING_ATTACKS[0].count_ones(), 3);
        // White pawn on e2 attacks d3 and f3
        assert_eq!(PAWN_ATTACKS[0][12], (1u64 << 19) | (1u64 << 21));
        // Black pawn on a7 attacks b6 only
        assert_eq!(PAWN_ATTACKS[1][48], 1u64 << 41);
    }
}
