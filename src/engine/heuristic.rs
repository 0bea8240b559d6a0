//! One-ply scoring engine with a mate/draw policy gate.

use log::{debug, error, trace};

use crate::board::{Board, Color, Move, MoveError, MoveList, Piece};

use super::candidate::{best_where, Candidate, SafetyBucket};
use super::policy::{gives_mate, is_drawish, opponent_has_mate_in_one, PolicyContext};
use super::positional::positional_points;
use super::simulate::simulate;
use super::threats::{
    attackers_of, max_capture_value, opponent_max_capture_after, threat_map, ThreatMap,
};
use super::{playable, EngineParams, MoveSelector};

/// Scores every legal move on the position it produces and picks the best
/// one that does not walk into mate or an unwanted draw.
#[derive(Clone, Debug)]
pub struct HeuristicEngine {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    params: EngineParams,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        HeuristicEngine::new()
    }
}

impl HeuristicEngine {
    /// Full pipeline: tactics, positional terms, mate and draw policy.
    pub fn new() -> Self {
        HeuristicEngine {
            id: "heuristic",
            name: "Stonefish Heuristic",
            description: "Tactical core with positional scoring and mate/draw policy",
            params: EngineParams::default(),
        }
    }

    /// Tactics only, skipping moves that hang a queen-sized capture.
    pub fn reactive() -> Self {
        HeuristicEngine {
            id: "reactive",
            name: "Stonefish Reactive",
            description: "Material and threat scoring that avoids dominated moves",
            params: EngineParams::reactive(),
        }
    }

    /// Same identity as [`HeuristicEngine::new`] with custom weights.
    pub fn with_params(params: EngineParams) -> Self {
        HeuristicEngine {
            params,
            ..HeuristicEngine::new()
        }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Score every legal move of the side to move, in generation order.
    ///
    /// An error means the move generator produced a move the simulator
    /// rejects.
    pub fn candidates(&self, position: &Board) -> Result<Vec<Candidate>, MoveError> {
        self.score_moves(position, &position.legal_moves())
    }

    fn score_moves(
        &self,
        position: &Board,
        legal: &MoveList,
    ) -> Result<Vec<Candidate>, MoveError> {
        let mover = position.side_to_move();
        let threats_before = threat_map(position, mover);
        let in_check = position.is_in_check(mover);
        let context = PolicyContext::new(position, &self.params);

        legal
            .iter()
            .map(|&mv| self.score_move(position, mv, &threats_before, in_check, &context))
            .collect()
    }

    fn score_move(
        &self,
        position: &Board,
        mv: Move,
        threats_before: &ThreatMap,
        in_check: bool,
        context: &PolicyContext,
    ) -> Result<Candidate, MoveError> {
        let p = &self.params;
        let mover = context.mover;
        let sim = simulate(position, mv)?;

        let moving_value = position.piece_on(mv.from()).map_or(0, Piece::material);
        let captured_value = mv
            .captured_square()
            .and_then(|sq| position.piece_on(sq))
            .map_or(0, Piece::material);
        let capture_score = if mv.is_capture() {
            f64::from(captured_value) - f64::from(moving_value)
        } else {
            0.0
        };

        let mut value_saved = if threats_before.is_empty() {
            0
        } else {
            let threats_after = threat_map(&sim, mover);
            saved_material(mv, &sim, mover, threats_before, &threats_after).min(p.value_saved_cap)
        };
        if in_check && !sim.is_in_check(mover) {
            value_saved += p.check_escape_bonus;
        }

        let opponent_max = opponent_max_capture_after(&sim, mover);
        let created_threat = max_capture_value(&sim, mover);
        let local_penalty = if attackers_of(&sim, mv.to(), mover.opponent()) > 0 {
            p.local_penalty
        } else {
            0.0
        };
        let positional = if p.use_positional {
            positional_points(&sim, mover, &p.positional)
        } else {
            0.0
        };

        let mut candidate = Candidate::new(position, mv);
        candidate.score = capture_score + f64::from(value_saved)
            - p.opponent_capture_weight * f64::from(opponent_max)
            + p.created_threat_weight * f64::from(created_threat)
            - local_penalty
            + positional;
        candidate.dominated = !in_check
            && opponent_max >= p.dominated_threshold
            && captured_value < p.dominated_threshold
            && value_saved < p.dominated_threshold;
        if p.use_policy_gate {
            candidate.bucket = if opponent_has_mate_in_one(&sim) {
                SafetyBucket::Unsafe
            } else if !context.draw_allowed && is_drawish(&sim) {
                SafetyBucket::SafeOrDrawish
            } else {
                SafetyBucket::SafeNonDrawish
            };
        }

        trace!(
            "{}: {} score={:.2} capture={} saved={} opp={} created={} local={} pos={:.2} bucket={}",
            self.id,
            mv,
            candidate.score,
            capture_score,
            value_saved,
            opponent_max,
            created_threat,
            local_penalty,
            positional,
            candidate.bucket
        );
        Ok(candidate)
    }

    fn choose(&self, candidates: &[Candidate]) -> Option<Candidate> {
        let skip_dominated = self.params.skip_dominated;
        let eligible = |c: &Candidate| !(skip_dominated && c.dominated);

        [SafetyBucket::SafeNonDrawish, SafetyBucket::SafeOrDrawish]
            .into_iter()
            .find_map(|bucket| best_where(candidates, |c| c.bucket == bucket && eligible(c)))
            .or_else(|| best_where(candidates, eligible))
            .or_else(|| best_where(candidates, |_| true))
            .cloned()
    }
}

/// Total value of previously threatened pieces of `color` that can no
/// longer be captured once `mv` has been played.
///
/// The moving piece counts when it arrives safely as the same piece, or as
/// the piece a threatened pawn promoted to.
fn saved_material(
    mv: Move,
    sim: &Board,
    color: Color,
    threats_before: &ThreatMap,
    threats_after: &ThreatMap,
) -> u32 {
    threats_before
        .iter()
        .filter(|&(&square, entry)| {
            if square == mv.from() {
                let dest = mv.to();
                let arrived = match sim.piece_at(dest) {
                    Some((owner, piece)) if owner == color => {
                        piece == entry.piece || (entry.piece == Piece::Pawn && mv.is_promotion())
                    }
                    _ => false,
                };
                arrived && !threats_after.contains_key(&dest)
            } else {
                matches!(sim.piece_at(square), Some((owner, _)) if owner == color)
                    && !threats_after.contains_key(&square)
            }
        })
        .map(|(_, entry)| entry.value)
        .sum()
}

impl MoveSelector for HeuristicEngine {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn select_move(&self, position: &Board) -> Option<Move> {
        if !playable(self.id, position) {
            return None;
        }
        let legal = position.legal_moves();
        if legal.is_empty() {
            debug!("{}: no legal moves in '{}'", self.id, position.to_fen());
            return None;
        }
        self.select_from(position, &legal)
    }
}

impl HeuristicEngine {
    /// Pick among `legal`, which must be the legal moves of `position`.
    ///
    /// A move the simulator rejects aborts scoring entirely: debug builds
    /// panic, release builds log it and play the first legal move.
    fn select_from(&self, position: &Board, legal: &MoveList) -> Option<Move> {
        if self.params.use_policy_gate {
            if let Some(mate) = legal.iter().copied().find(|&mv| gives_mate(position, mv)) {
                debug!("{}: mate in one with {mate}", self.id);
                return Some(mate);
            }
        }

        let candidates = match self.score_moves(position, legal) {
            Ok(candidates) => candidates,
            Err(err) => {
                error!("{}: move generator and simulator disagree: {err}", self.id);
                debug_assert!(false, "move generator and simulator disagree: {err}");
                return legal.first();
            }
        };
        match self.choose(&candidates) {
            Some(best) => {
                debug!(
                    "{}: chose {} (score {:.2}, {})",
                    self.id, best.mv, best.score, best.bucket
                );
                Some(best.mv)
            }
            None => {
                let fallback = legal.first();
                debug!("{}: no scored candidates, falling back to {fallback:?}", self.id);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn select(engine: &HeuristicEngine, fen: &str) -> Option<String> {
        engine
            .select_move(&Board::from_fen(fen))
            .map(|mv| mv.to_string())
    }

    fn candidate<'a>(candidates: &'a [Candidate], uci: &str) -> &'a Candidate {
        candidates
            .iter()
            .find(|c| c.mv.to_string() == uci)
            .unwrap_or_else(|| panic!("no candidate {uci}"))
    }

    #[test]
    fn test_takes_mate_in_one() {
        let engine = HeuristicEngine::new();
        let mv = select(&engine, "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        assert_eq!(mv.as_deref(), Some("a1a8"));
    }

    #[test]
    fn test_score_of_winning_capture() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let candidates = engine.candidates(&board).unwrap();
        let take = candidate(&candidates, "d1d5");
        // 9 - 5 captured, rook saved (5), open file +0.5, bare king -0.6
        assert!((take.score - 8.9).abs() < 1e-9, "score = {}", take.score);
        assert_eq!(take.bucket, SafetyBucket::SafeNonDrawish);
        assert_eq!(engine.select_move(&board), Some(take.mv));
    }

    #[test]
    fn test_moves_attacked_queen_to_safety() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("4k3/8/8/3p4/4Q3/8/8/4K3 w - - 0 1");
        let mv = engine.select_move(&board).unwrap();
        assert_eq!(mv.from(), Square(3, 4));
        let after = board.apply_move(mv).unwrap();
        assert!(threat_map(&after, Color::White).is_empty());
    }

    #[test]
    fn test_avoids_completing_repetition_when_ahead() {
        let engine = HeuristicEngine::new();
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K1N1 b - - 0 1");
        for uci in ["e8e7", "g1f3", "e7e8", "f3g1", "e8e7", "g1f3", "e7e8"] {
            board.make_move_uci(uci).unwrap();
        }
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(
            candidate(&candidates, "f3g1").bucket,
            SafetyBucket::SafeOrDrawish
        );
        let chosen = engine.select_move(&board).unwrap();
        assert_ne!(chosen.to_string(), "f3g1");
    }

    #[test]
    fn test_accepts_draws_when_behind() {
        let engine = HeuristicEngine::new();
        let mut board = Board::from_fen("4k1n1/8/8/8/8/8/8/R3K1N1 w - - 0 1");
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
            board.make_move_uci(uci).unwrap();
        }
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(
            candidate(&candidates, "f6g8").bucket,
            SafetyBucket::SafeNonDrawish
        );

        // Capturing the last white piece leaves bare kings.
        let board = Board::from_fen("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1");
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(
            candidate(&candidates, "e8e7").bucket,
            SafetyBucket::SafeNonDrawish
        );
    }

    #[test]
    fn test_accepts_stalemate_when_behind() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("rb5k/p1p2K2/P1P4P/6P1/8/8/8/8 w - - 0 1");
        let context = PolicyContext::new(&board, engine.params());
        assert_eq!(context.balance, -6);
        assert!(context.draw_allowed);

        let stalemate = board.parse_move("g5g6").unwrap();
        assert!(board.apply_move(stalemate).unwrap().is_stalemate());
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(
            candidate(&candidates, "g5g6").bucket,
            SafetyBucket::SafeNonDrawish
        );
    }

    #[test]
    fn test_avoids_stalemate_when_ahead() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("7k/5K2/7P/6P1/8/8/Q7/8 w - - 0 1");
        assert!(!PolicyContext::new(&board, engine.params()).draw_allowed);

        let stalemate = board.parse_move("g5g6").unwrap();
        assert!(board.apply_move(stalemate).unwrap().is_stalemate());
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(
            candidate(&candidates, "g5g6").bucket,
            SafetyBucket::SafeOrDrawish
        );
        assert_ne!(engine.select_move(&board), Some(stalemate));
    }

    #[test]
    fn test_escape_bonus_when_in_check() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1");
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(candidates.len(), 3);
        for c in candidates.iter().filter(|c| !c.mv.is_capture()) {
            assert!(c.score > 100.0, "{} scored {}", c.mv, c.score);
        }
        // The king capture pays its full sentinel value in the capture term.
        assert!(candidate(&candidates, "e8e7").score < 50.0);
    }

    #[test]
    fn test_unsafe_move_is_avoided() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1");
        let candidates = engine.candidates(&board).unwrap();
        assert_eq!(candidate(&candidates, "g8h8").bucket, SafetyBucket::Unsafe);
        assert_eq!(candidate(&candidates, "h7h6").bucket, SafetyBucket::SafeNonDrawish);
        assert_eq!(candidate(&candidates, "g8f8").bucket, SafetyBucket::SafeNonDrawish);
        let chosen = engine.select_move(&board).unwrap();
        assert_ne!(candidate(&candidates, &chosen.to_string()).bucket, SafetyBucket::Unsafe);
    }

    #[test]
    fn test_reactive_flags_dominated_moves() {
        let engine = HeuristicEngine::reactive();
        let board = Board::from_fen("4k3/8/2p5/8/8/8/8/3QK3 w - - 0 1");
        let candidates = engine.candidates(&board).unwrap();
        assert!(candidate(&candidates, "d1d5").dominated);
        assert!(!candidate(&candidates, "d1d2").dominated);
        assert!(candidates.iter().all(|c| c.bucket == SafetyBucket::SafeNonDrawish));

        let chosen = engine.select_move(&board).unwrap();
        assert!(!candidate(&candidates, &chosen.to_string()).dominated);
    }

    #[test]
    fn test_reactive_has_no_positional_terms() {
        let engine = HeuristicEngine::reactive();
        let candidates = engine.candidates(&Board::new()).unwrap();
        let knight = candidate(&candidates, "g1f3");
        assert_eq!(knight.score, 0.0);
    }

    #[test]
    fn test_custom_params_keep_identity() {
        let params = EngineParams {
            use_positional: false,
            ..EngineParams::default()
        };
        let engine = HeuristicEngine::with_params(params);
        assert_eq!(engine.id(), "heuristic");
        assert!(!engine.params().use_positional);
        assert!(engine.params().use_policy_gate);

        let candidates = engine.candidates(&Board::new()).unwrap();
        assert_eq!(candidate(&candidates, "g1f3").score, 0.0);
    }

    #[test]
    fn test_no_move_without_legal_moves() {
        let engine = HeuristicEngine::new();
        assert_eq!(select(&engine, "R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1"), None);
        assert_eq!(select(&engine, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), None);
    }

    #[test]
    fn test_rejects_unplayable_positions() {
        let engine = HeuristicEngine::new();
        assert_eq!(select(&engine, "8/8/8/8/8/8/8/4K3 w - - 0 1"), None);
        assert_eq!(select(&engine, "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"), None);
    }

    #[test]
    fn test_scoring_rejects_foreign_move() {
        let engine = HeuristicEngine::reactive();
        let board = Board::new();
        let other = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let mut legal = MoveList::new();
        legal.push(board.parse_move("g1f3").unwrap());
        legal.push(other.parse_move("a1a8").unwrap());
        assert!(matches!(
            engine.score_moves(&board, &legal),
            Err(MoveError::IllegalMove { .. })
        ));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "disagree"))]
    fn test_foreign_move_aborts_selection() {
        let engine = HeuristicEngine::reactive();
        let board = Board::new();
        let other = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let mut legal = MoveList::new();
        legal.push(board.parse_move("a2a3").unwrap());
        legal.push(board.parse_move("g1f3").unwrap());
        legal.push(other.parse_move("a1a8").unwrap());
        // Release builds skip scoring and play the first move as listed.
        assert_eq!(engine.select_from(&board, &legal), legal.first());
    }

    #[test]
    fn test_same_input_same_move() {
        let engine = HeuristicEngine::new();
        let board = Board::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        );
        let first = engine.select_move(&board);
        assert!(first.is_some());
        assert_eq!(engine.select_move(&board), first);
        assert_eq!(engine.select_move(&board.clone()), first);
    }
}
