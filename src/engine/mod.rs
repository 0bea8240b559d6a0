//! Move selection.
//!
//! Every engine implements [`MoveSelector`]: given a position (with its
//! history) it returns one legal move, or `None` when there is nothing to
//! play. Engines keep no state between calls beyond their configuration.
//!
//! # Example
//! ```
//! use stonefish::board::Board;
//! use stonefish::engine::EngineRegistry;
//!
//! let registry = EngineRegistry::with_defaults();
//! let engine = registry.default_engine();
//! let board = Board::new();
//! let mv = engine.select_move(&board).unwrap();
//! assert!(board.legal_moves().contains(mv));
//! ```

mod candidate;
mod heuristic;
mod params;
pub mod policy;
pub mod positional;
mod random;
mod registry;
pub mod simulate;
pub mod threats;

pub use candidate::{Candidate, SafetyBucket};
pub use heuristic::HeuristicEngine;
pub use params::{EngineParams, PositionalWeights};
pub use policy::PolicyContext;
pub use random::RandomEngine;
pub use registry::{EngineRegistry, UnknownEngine};
pub use threats::{Attacker, ThreatEntry, ThreatMap};

use crate::board::{Board, Move};

/// A move-selection strategy.
pub trait MoveSelector: Send + Sync {
    /// Short stable identifier used for registry lookups.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Choose a move for the side to move.
    ///
    /// Returns `None` if there are no legal moves or the position is not a
    /// playable game state. Identical inputs give identical output.
    fn select_move(&self, position: &Board) -> Option<Move>;
}

/// Log and reject positions that cannot be played from.
pub(crate) fn playable(engine_id: &str, position: &Board) -> bool {
    match position.validate() {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{engine_id}: refusing unusable position '{}': {err}", position.to_fen());
            false
        }
    }
}
