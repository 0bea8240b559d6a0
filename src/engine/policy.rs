//! Mate and draw policy: one-ply mate detection plus the rules that decide
//! whether a move steers the game into a draw.

use crate::board::{Board, Color, Move, Piece, FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};

use super::EngineParams;

/// Own material minus the opponent's, on the 1/3/3/5/9 scale.
pub fn material_balance(position: &Board, color: Color) -> i32 {
    let side_total = |side: Color| -> i32 {
        Piece::ALL
            .iter()
            .map(|&piece| (position.pieces(side, piece).popcount() * piece.material()) as i32)
            .sum()
    };
    side_total(color) - side_total(color.opponent())
}

/// Per-decision facts the draw policy needs about the mover.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyContext {
    pub mover: Color,
    pub balance: i32,
    /// A mover this far behind is happy to take a draw.
    pub draw_allowed: bool,
    pub halfmove_clock: u32,
}

impl PolicyContext {
    pub fn new(position: &Board, params: &EngineParams) -> Self {
        let mover = position.side_to_move();
        let balance = material_balance(position, mover);
        PolicyContext {
            mover,
            balance,
            draw_allowed: balance <= params.draw_deficit_threshold,
            halfmove_clock: position.halfmove_clock(),
        }
    }
}

/// The game is drawn right now: fifty-move rule, threefold repetition,
/// insufficient material, or stalemate.
pub fn is_immediate_draw(position: &Board) -> bool {
    position.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
        || position.repetition_count(position.hash()) >= REPETITION_DRAW_COUNT
        || position.is_insufficient_material()
        || position.is_stalemate()
}

/// `position` is drawn, or the side to move can draw it with one reply.
pub fn is_drawish(position: &Board) -> bool {
    if is_immediate_draw(position) {
        return true;
    }
    any_reply(position, is_immediate_draw)
}

/// The side to move in `position` has a mating move.
pub fn opponent_has_mate_in_one(position: &Board) -> bool {
    any_reply(position, Board::is_checkmate)
}

/// Playing `mv` checkmates the opponent. `mv` must be legal in `position`.
pub fn gives_mate(position: &Board, mv: Move) -> bool {
    let mut scratch = position.clone();
    let info = scratch.make_move(mv);
    let mate = scratch.is_checkmate();
    scratch.unmake_move(mv, info);
    mate
}

/// Try every legal reply on one scratch copy and report whether any of the
/// resulting positions satisfies `test`.
fn any_reply(position: &Board, test: impl Fn(&Board) -> bool) -> bool {
    let mut scratch = position.clone();
    for mv in position.legal_moves() {
        let info = scratch.make_move(mv);
        let hit = test(&scratch);
        scratch.unmake_move(mv, info);
        if hit {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_balance() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(material_balance(&board, Color::White), 5);
        assert_eq!(material_balance(&board, Color::Black), -5);
        assert_eq!(material_balance(&Board::new(), Color::White), 0);
    }

    #[test]
    fn test_draw_allowed_only_when_far_enough_behind() {
        let params = EngineParams::default();
        let behind = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 7 40");
        let ctx = PolicyContext::new(&behind, &params);
        assert_eq!(ctx.mover, Color::Black);
        assert_eq!(ctx.balance, -5);
        assert!(ctx.draw_allowed);
        assert_eq!(ctx.halfmove_clock, 7);

        let ahead = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert!(!PolicyContext::new(&ahead, &params).draw_allowed);

        let pawn_down = Board::from_fen("4k3/8/8/8/8/8/3PP3/4K3 b - - 0 1");
        assert!(!PolicyContext::new(&pawn_down, &params).draw_allowed);
    }

    #[test]
    fn test_stalemate_is_drawish() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(board.is_stalemate());
        assert!(is_immediate_draw(&board));
        assert!(is_drawish(&board));
    }

    #[test]
    fn test_fifty_move_threshold() {
        let at = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 100 80");
        let below = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 98 80");
        assert!(is_immediate_draw(&at));
        assert!(!is_immediate_draw(&below));
    }

    #[test]
    fn test_reply_that_bares_the_kings() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
        assert!(!is_immediate_draw(&board));
        assert!(is_drawish(&board));
    }

    #[test]
    fn test_reply_that_completes_threefold() {
        let mut board = Board::new();
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
            board.make_move_uci(uci).unwrap();
        }
        assert!(!is_immediate_draw(&board));
        assert!(is_drawish(&board));

        let mv = board.parse_move("f6g8").unwrap();
        let repeated = board.apply_move(mv).unwrap();
        assert_eq!(repeated.repetition_count(repeated.hash()), 3);
        assert!(is_immediate_draw(&repeated));
    }

    #[test]
    fn test_start_position_not_drawish() {
        assert!(!is_drawish(&Board::new()));
    }

    #[test]
    fn test_back_rank_mate_detection() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        assert!(opponent_has_mate_in_one(&board));
        let mate = board.parse_move("a1a8").unwrap();
        assert!(gives_mate(&board, mate));
        let quiet = board.parse_move("a1a2").unwrap();
        assert!(!gives_mate(&board, quiet));
        assert!(!opponent_has_mate_in_one(&Board::new()));
    }

    #[test]
    fn test_scratch_copies_leave_input_untouched() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        let before = board.to_fen();
        let hash = board.hash();
        is_drawish(&board);
        opponent_has_mate_in_one(&board);
        assert_eq!(board.to_fen(), before);
        assert_eq!(board.hash(), hash);
    }
}
