use rookery::board::RandBoard;
use rookery::{Board, Move};

// Play random legal moves, then unwind the whole line and demand the board
// comes back byte for byte: FEN, zobrist key, pawn key, rule-50 and rights.
#[test]
fn random_walk_unwinds_exactly() {
    let mut board = Board::start_pos();
    let mut rng = Lcg::new(0x9E37_79B9);
    let mut fens: Vec<String> = Vec::new();
    let mut keys: Vec<u64> = Vec::new();
    let mut pawn_keys: Vec<u64> = Vec::new();

    let mut plies = 0;
    while plies < 120 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        fens.push(board.fen());
        keys.push(board.key());
        pawn_keys.push(board.pawn_key());
        let mv = moves[rng.next() % moves.len()];
        board.apply_move(mv);
        assert!(board.validate().is_ok(), "invariants after {}", mv);
        plies += 1;
    }

    while let Some(fen) = fens.pop() {
        board.undo_move();
        assert_eq!(board.fen(), fen);
        assert_eq!(board.key(), keys.pop().unwrap());
        assert_eq!(board.pawn_key(), pawn_keys.pop().unwrap());
        assert!(board.validate().is_ok());
    }
    assert_eq!(board.fen(), Board::start_pos().fen());
}

// Null moves interleave with real ones and unwind cleanly.
#[test]
fn null_moves_interleaved() {
    let mut board = Board::start_pos();
    let mut rng = Lcg::new(1234);
    for _ in 0..60 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        assert!(!board.legal_move(Move::null()));
        if !board.in_check() {
            let fen = board.fen();
            let key = board.key();
            board.apply_null_move();
            assert!(board.last_move().is_none());
            board.undo_null_move();
            assert_eq!(board.fen(), fen);
            assert_eq!(board.key(), key);
        }
        board.apply_move(moves[rng.next() % moves.len()]);
    }
}

#[test]
fn uci_move_application() {
    let mut board = Board::start_pos();
    assert!(board.apply_uci_move("e2e4"));
    assert!(board.apply_uci_move("c7c5"));
    assert!(board.apply_uci_move("g1f3"));
    assert!(!board.apply_uci_move("e1g1")); // cannot castle yet
    assert!(!board.apply_uci_move("zz99"));
    assert_eq!(board.moves_played(), 3);
    board.undo_move();
    board.undo_move();
    board.undo_move();
    assert_eq!(board.fen(), Board::start_pos().fen());
}

#[test]
fn clones_share_history_without_interfering() {
    let mut board = Board::start_pos();
    board.apply_uci_move("d2d4");
    let mut clone = board.shallow_clone();
    assert_eq!(clone.key(), board.key());

    // the clone plays its own continuation
    assert!(clone.apply_uci_move("g8f6"));
    assert_ne!(clone.key(), board.key());
    clone.undo_move();
    assert_eq!(clone.fen(), board.fen());
}

#[test]
fn random_boards_satisfy_invariants() {
    let boards = RandBoard::new().pseudo_random(88_431_002).many(12);
    for board in boards {
        assert!(board.validate().is_ok(), "bad random board {}", board.fen());
        let reparsed = Board::from_fen(&board.fen()).unwrap();
        assert_eq!(reparsed.key(), board.key());
    }
}

// Small deterministic generator so the walks reproduce on failure.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Lcg {
        Lcg(seed | 1)
    }

    fn next(&mut self) -> usize {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (self.0 >> 33) as usize
    }
}
