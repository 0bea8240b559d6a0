//! Draw detection tests.

use crate::board::{Board, Move, Piece, Square};

fn find_move(board: &Board, from: Square, to: Square, promotion: Option<Piece>) -> Move {
    for m in board.legal_moves().iter() {
        if m.from() == from && m.to() == to && m.promotion() == promotion {
            return *m;
        }
    }
    panic!("Expected move not found");
}

fn apply_uci(board: &mut Board, uci: &str) {
    board.make_move_uci(uci).expect("uci move not legal");
}

#[test]
fn test_fifty_move_rule_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1");
    assert!(board.is_draw());
}

#[test]
fn test_halfmove_resets_on_pawn_move() {
    let mut board = Board::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 99 1");
    let mv = find_move(&board, Square(1, 4), Square(3, 4), None);
    board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 0);
    assert!(!board.is_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut board = Board::new();
    let start_hash = board.hash();
    for _ in 0..2 {
        apply_uci(&mut board, "g1f3");
        apply_uci(&mut board, "g8f6");
        apply_uci(&mut board, "f3g1");
        apply_uci(&mut board, "f6g8");
    }
    assert_eq!(board.repetition_count(start_hash), 3);
    assert!(board.is_draw());
}

#[test]
fn test_repetition_count_tracks_each_occurrence() {
    let mut board = Board::new();
    apply_uci(&mut board, "g1f3");
    let after_nf3 = board.hash();
    assert_eq!(board.repetition_count(after_nf3), 1);

    apply_uci(&mut board, "g8f6");
    apply_uci(&mut board, "f3g1");
    apply_uci(&mut board, "f6g8");
    apply_uci(&mut board, "g1f3");
    assert_eq!(board.hash(), after_nf3);
    assert_eq!(board.repetition_count(after_nf3), 2);
    assert!(!board.is_draw());
}

#[test]
fn test_double_push_changes_key_even_without_capture() {
    // Same placement, but the en passant file is part of the key
    let with_ep = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
    let without_ep = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1");
    assert_ne!(with_ep.hash(), without_ep.hash());
}

#[test]
fn test_insufficient_material() {
    assert!(Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 1").is_insufficient_material());
    assert!(Board::from_fen("8/8/8/8/8/8/6N1/K1k5 w - - 0 1").is_insufficient_material());
    assert!(Board::from_fen("8/8/8/8/8/8/6B1/K1k5 w - - 0 1").is_insufficient_material());
    // Bishops on c1 and f8 (both dark squares)
    assert!(Board::from_fen("5b2/8/8/8/8/8/8/K1B4k w - - 0 1").is_insufficient_material());
    // Bishops on opposite colors can still mate
    assert!(!Board::from_fen("4b3/8/8/8/8/8/8/K1B4k w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("8/8/8/8/8/8/5NN1/K1k5 w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("8/8/8/8/8/8/6P1/K1k5 w - - 0 1").is_insufficient_material());
    assert!(!Board::from_fen("8/8/8/8/8/8/6R1/K1k5 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_checkmate_and_stalemate() {
    let mate = Board::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1");
    assert!(mate.is_checkmate());
    assert!(!mate.is_stalemate());

    let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(stalemate.is_stalemate());
    assert!(!stalemate.is_checkmate());
}
