use rookery::board::perft::{perft, perft_parallel};
use rookery::Board;

// Known node counts; any disagreement pins a generator or make/unmake bug.

#[test]
fn perft_start_position() {
    let board = Board::start_pos();
    assert_eq!(perft(&board, 1), 20);
    assert_eq!(perft(&board, 2), 400);
    assert_eq!(perft(&board, 3), 8_902);
    assert_eq!(perft(&board, 4), 197_281);
    assert_eq!(perft_parallel(&board, 5), 4_865_609);
}

#[test]
fn perft_kiwipete() {
    let board = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    assert_eq!(perft(&board, 1), 48);
    assert_eq!(perft(&board, 2), 2_039);
    assert_eq!(perft(&board, 3), 97_862);
    assert_eq!(perft_parallel(&board, 4), 4_085_603);
}

#[test]
fn perft_endgame_pins() {
    let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&board, 1), 14);
    assert_eq!(perft(&board, 2), 191);
    assert_eq!(perft(&board, 3), 2_812);
    assert_eq!(perft(&board, 4), 43_238);
    assert_eq!(perft_parallel(&board, 5), 674_624);
}

#[test]
fn perft_position_four() {
    let board = Board::from_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2pP/R2Q1RK1 w kq - 0 1",
    )
    .unwrap();
    assert_eq!(perft(&board, 1), 6);
    assert_eq!(perft(&board, 2), 264);
    assert_eq!(perft(&board, 3), 9_467);
    assert_eq!(perft_parallel(&board, 4), 422_333);
}

#[test]
fn perft_position_five() {
    let board =
        Board::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    assert_eq!(perft(&board, 1), 44);
    assert_eq!(perft(&board, 2), 1_486);
    assert_eq!(perft(&board, 3), 62_379);
}

#[test]
fn perft_position_six() {
    let board = Board::from_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    )
    .unwrap();
    assert_eq!(perft(&board, 1), 46);
    assert_eq!(perft(&board, 2), 2_079);
    assert_eq!(perft(&board, 3), 89_890);
    assert_eq!(perft_parallel(&board, 4), 2_103_487);
}
