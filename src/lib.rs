pub mod board;
pub mod engine;
mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{EngineParams, EngineRegistry, HeuristicEngine, MoveSelector, RandomEngine};
