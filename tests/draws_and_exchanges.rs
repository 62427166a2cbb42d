use rookery::{Board, Move, PieceType, Sq};

#[test]
fn fifty_move_rule() {
    let mut board = Board::from_fen("7k/8/8/8/8/8/8/R6K w - - 99 80").unwrap();
    assert!(!board.is_draw(0));
    assert!(board.apply_uci_move("a1a2"));
    assert_eq!(board.rule50(), 100);
    assert!(board.is_draw(0));
}

#[test]
fn rule50_resets_on_pawn_moves_and_captures() {
    let mut board =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 30 40").unwrap();
    assert_eq!(board.rule50(), 30);
    assert!(board.apply_uci_move("g1f3"));
    assert_eq!(board.rule50(), 31);
    board.undo_move();
    assert!(board.apply_uci_move("e2e4"));
    assert_eq!(board.rule50(), 0);

    let mut board = Board::from_fen("4k3/8/8/3p4/3R4/8/8/4K3 w - - 12 30").unwrap();
    assert!(board.apply_uci_move("d4d5"));
    assert_eq!(board.rule50(), 0);
    assert_eq!(board.piece_last_captured(), PieceType::Pawn);
}

#[test]
fn threefold_repetition_shuffle() {
    let mut board = Board::start_pos();
    let shuffle = ["b1c3", "b8c6", "c3b1", "c6b8"];
    assert_eq!(board.repetition(), 0);
    for uci in shuffle {
        assert!(board.apply_uci_move(uci));
    }
    assert_eq!(board.repetition(), 4);
    assert!(!board.is_draw(3));
    // inside a search tree the first repetition already draws
    assert!(board.is_draw(5));
    for uci in shuffle {
        assert!(board.apply_uci_move(uci));
    }
    assert!(board.repetition() < 0);
    assert!(board.is_draw(0));
}

#[test]
fn repetition_window_respects_irreversible_moves() {
    let mut board = Board::start_pos();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        assert!(board.apply_uci_move(uci));
    }
    assert_eq!(board.repetition(), 4);
    // a pawn move cuts the window: nothing before it can repeat again
    assert!(board.apply_uci_move("e2e4"));
    assert_eq!(board.repetition(), 0);
    for uci in ["g8f6", "g1f3", "f6g8", "f3g1"] {
        assert!(board.apply_uci_move(uci));
    }
    // the post-pawn-move position repeats, but only as a fresh twofold;
    // the occurrences on the far side of e2e4 are out of reach, so the
    // distance stays positive and nothing is drawn yet
    assert_eq!(board.repetition(), 4);
    assert!(!board.is_draw(0));
}

#[test]
fn see_winning_and_losing_captures() {
    // rook takes an undefended pawn: wins exactly a pawn
    let board = Board::from_fen("4k3/8/8/3p4/8/8/3R4/4K3 w - - 0 1").unwrap();
    let rxp = Move::make(Sq::D2, Sq::D5);
    assert!(board.see_ge(rxp, PieceType::Pawn.value()));
    assert!(!board.see_ge(rxp, PieceType::Pawn.value() + 1));

    // rook takes a pawn defended by a pawn: loses rook for pawn
    let board = Board::from_fen("4k3/4p3/8/3p4/8/8/3R4/4K3 w - - 0 1").unwrap();
    let rxp = Move::make(Sq::D2, Sq::D5);
    assert!(!board.see_ge(rxp, 0));
    assert!(board.see_ge(
        rxp,
        PieceType::Pawn.value() - PieceType::Rook.value()
    ));

    // queen takes a rook defended by a knight: Q x R, N x Q nets R - Q
    let board = Board::from_fen("4k3/8/4n3/3r4/8/8/3Q4/4K3 w - - 0 1").unwrap();
    let qxr = Move::make(Sq::D2, Sq::D5);
    assert!(!board.see_ge(qxr, 0));
    assert!(board.see_ge(
        qxr,
        PieceType::Rook.value() - PieceType::Queen.value()
    ));
}

#[test]
fn see_xray_attackers_join_in() {
    // white: rooks doubled on the d-file; black: pawn d5 defended by pawn e6
    // RxP, pxR, RxP wins: P + P - R
    let board = Board::from_fen("4k3/8/4p3/3p4/8/8/3R4/3RK3 w - - 0 1").unwrap();
    let rxp = Move::make(Sq::D2, Sq::D5);
    let net = 2 * PieceType::Pawn.value() - PieceType::Rook.value();
    assert!(board.see_ge(rxp, net));
    assert!(!board.see_ge(rxp, net + 1));
}

#[test]
fn see_pinned_defender_may_not_recapture() {
    // the d5 pawn's only defender is a knight pinned to its king by the
    // e2 rook, so NxP simply wins the pawn
    let board = Board::from_fen("4k3/4n3/8/3p4/8/2N5/4R3/4K3 w - - 0 1").unwrap();
    let nxp = Move::make(Sq::C3, Sq::D5);
    assert!(board.see_ge(nxp, 0));
    assert!(board.see_ge(nxp, PieceType::Pawn.value()));
    assert!(!board.see_ge(nxp, PieceType::Pawn.value() + 1));
}

#[test]
fn see_quiet_move_threshold() {
    // a quiet move onto an attacked square evaluates against what can be
    // lost: threshold above zero fails when the mover hangs
    let board = Board::from_fen("4k3/8/8/3p4/8/4N3/8/4K3 w - - 0 1").unwrap();
    // Ne3-c4 walks into d5xc4
    let quiet = Move::make(Sq::E3, Sq::C4);
    assert!(board.see_ge(quiet, -PieceType::Knight.value()));
    assert!(!board.see_ge(quiet, 0));
}

#[test]
fn special_moves_see_zero() {
    let board =
        Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let castle = board
        .generate_moves()
        .iter()
        .find(|m| m.is_castle())
        .copied()
        .unwrap();
    assert!(board.see_ge(castle, 0));
    assert!(!board.see_ge(castle, 1));
}
