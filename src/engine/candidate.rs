use std::cmp::Ordering;
use std::fmt;

use crate::board::{Board, Move, Piece};

/// How acceptable a move is to the mate/draw policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SafetyBucket {
    /// No mate against the mover and no unwanted draw.
    SafeNonDrawish,
    /// No mate against the mover, but it steers towards a draw the mover
    /// does not want.
    SafeOrDrawish,
    /// The opponent can mate immediately afterwards.
    Unsafe,
}

impl fmt::Display for SafetyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SafetyBucket::SafeNonDrawish => "safe",
            SafetyBucket::SafeOrDrawish => "drawish",
            SafetyBucket::Unsafe => "unsafe",
        };
        f.write_str(name)
    }
}

/// A scored legal move.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    pub score: f64,
    pub gives_check: bool,
    /// A non-pawn piece leaves its own back rank.
    pub develops: bool,
    pub key: String,
    pub bucket: SafetyBucket,
    /// The move hands the opponent a big capture without winning or saving
    /// as much.
    pub dominated: bool,
}

impl Candidate {
    /// Candidate for `mv` with the move-shape attributes filled in and a zero
    /// score.
    pub(crate) fn new(position: &Board, mv: Move) -> Self {
        let mover = position.side_to_move();
        let develops = matches!(position.piece_on(mv.from()), Some(piece) if piece != Piece::Pawn)
            && mv.from().rank() == mover.back_rank();
        Candidate {
            mv,
            score: 0.0,
            gives_check: position.gives_check(mv),
            develops,
            key: mv.lexical_key(),
            bucket: SafetyBucket::SafeNonDrawish,
            dominated: false,
        }
    }

    /// Best-first ordering: higher score, then checks, then developing moves,
    /// then the smaller lexical key. Total over all candidates of one position.
    pub fn rank(&self, other: &Candidate) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.gives_check.cmp(&self.gives_check))
            .then_with(|| other.develops.cmp(&self.develops))
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// The best-ranked candidate among those accepted by `filter`.
pub(crate) fn best_where<'a>(
    candidates: &'a [Candidate],
    filter: impl Fn(&Candidate) -> bool,
) -> Option<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| filter(c))
        .min_by(|a, b| a.rank(b))
}
