#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural bonuses and penalties used by the positional evaluator.
///
/// Penalties are stored as negative numbers and added like bonuses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionalWeights {
    pub pawn_center: f64,
    pub passed_pawn: f64,
    pub passed_pawn_supported: f64,
    pub isolated_pawn: f64,
    pub doubled_pawn: f64,
    pub knight_center: f64,
    pub rim_knight: f64,
    pub bishop_developed: f64,
    pub rook_open_file: f64,
    pub king_castled: f64,
    pub exposed_king: f64,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        PositionalWeights {
            pawn_center: 0.3,
            passed_pawn: 0.5,
            passed_pawn_supported: 0.2,
            isolated_pawn: -0.25,
            doubled_pawn: -0.3,
            knight_center: 0.4,
            rim_knight: -0.3,
            bishop_developed: 0.25,
            rook_open_file: 0.5,
            king_castled: 0.6,
            exposed_king: -0.6,
        }
    }
}

/// Weights, caps and switches of the one-ply scoring pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineParams {
    /// Multiplier on the best capture the opponent has after the move.
    pub opponent_capture_weight: f64,
    /// Multiplier on the best capture the mover has after the move.
    pub created_threat_weight: f64,
    /// Flat penalty when the opponent can capture on the destination square.
    pub local_penalty: f64,
    pub value_saved_cap: u32,
    /// Added to the saved value of every move that gets out of check.
    pub check_escape_bonus: u32,
    /// Draws are acceptable once the mover's material balance is at or below this.
    pub draw_deficit_threshold: i32,
    pub use_positional: bool,
    pub positional: PositionalWeights,
    /// Mate-in-one short-circuit, mate-against-self and draw buckets.
    pub use_policy_gate: bool,
    /// Skip moves that leave a capture of at least `dominated_threshold` for
    /// the opponent while neither capturing nor saving that much.
    pub skip_dominated: bool,
    pub dominated_threshold: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            opponent_capture_weight: 0.9,
            created_threat_weight: 0.25,
            local_penalty: 0.5,
            value_saved_cap: 30,
            check_escape_bonus: 100,
            draw_deficit_threshold: -4,
            use_positional: true,
            positional: PositionalWeights::default(),
            use_policy_gate: true,
            skip_dominated: false,
            dominated_threshold: 9,
        }
    }
}

impl EngineParams {
    /// Purely tactical scoring: no positional terms, no mate/draw gate, and
    /// the dominated-move filter switched on.
    #[must_use]
    pub fn reactive() -> Self {
        EngineParams {
            use_positional: false,
            use_policy_gate: false,
            skip_dominated: true,
            ..EngineParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactive_preset_keeps_tactical_weights() {
        let full = EngineParams::default();
        let reactive = EngineParams::reactive();
        assert_eq!(reactive.opponent_capture_weight, full.opponent_capture_weight);
        assert_eq!(reactive.value_saved_cap, 30);
        assert!(!reactive.use_positional);
        assert!(!reactive.use_policy_gate);
        assert!(reactive.skip_dominated);
        assert!(!full.skip_dominated);
    }
}
