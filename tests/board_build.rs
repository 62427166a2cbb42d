use rookery::board::fen::ALL_TEST_FENS;
use rookery::{Board, FenError, PieceType, Side, Sq};

#[test]
fn start_pos_piece_counts() {
    let board = Board::start_pos();
    for side in [Side::White, Side::Black] {
        assert_eq!(board.count_piece(side, PieceType::Pawn), 8);
        assert_eq!(board.count_piece(side, PieceType::Knight), 2);
        assert_eq!(board.count_piece(side, PieceType::Bishop), 2);
        assert_eq!(board.count_piece(side, PieceType::Rook), 2);
        assert_eq!(board.count_piece(side, PieceType::Queen), 1);
        assert_eq!(board.count_piece(side, PieceType::King), 1);
    }
    assert_eq!(board.count_all_pieces(), 32);
    assert_eq!(board.occupied().count_bits(), 32);
    assert_eq!(
        board.side_bb(Side::White).count_bits(),
        board.side_bb(Side::Black).count_bits()
    );
}

#[test]
fn fen_round_trips() {
    for fen in ALL_TEST_FENS.iter() {
        let board = Board::from_fen(fen).unwrap_or_else(|e| panic!("{}: {}", fen, e));
        assert_eq!(&board.fen(), fen, "round trip failed");
        assert!(board.validate().is_ok(), "invariants broken for {}", fen);
    }
}

#[test]
fn set_fen_is_idempotent() {
    let mut board = Board::start_pos();
    board.clear();
    board.set_fen(rookery::START_FEN).unwrap();
    let first = board.fen();
    let first_key = board.key();
    board.clear();
    board.set_fen(rookery::START_FEN).unwrap();
    assert_eq!(board.fen(), first);
    assert_eq!(board.key(), first_key);
    assert_eq!(board, Board::start_pos());
}

#[test]
fn set_fen_failure_leaves_board_alone() {
    let mut board = Board::start_pos();
    let before = board.fen();
    assert!(board.set_fen("total nonsense").is_err());
    assert_eq!(board.fen(), before);
}

#[test]
fn typed_parse_errors() {
    assert!(matches!(
        Board::from_fen("8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::BadRankCount(7))
    ));
    assert!(matches!(
        Board::from_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::InvalidPieceLayout { .. })
    ));
    assert!(matches!(
        Board::from_fen("ppppppppp/8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::FileOverflow { rank: 0 })
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
        Err(FenError::BadSide(_))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w Z - 0 1"),
        Err(FenError::BadCastling('Z'))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
        Err(FenError::MissingCastleRook('K'))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - zz9 0 1"),
        Err(FenError::BadEnPassant(_))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        Err(FenError::BadCounter(4))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 0"),
        Err(FenError::BadCounter(5))
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
        Err(FenError::TooLong)
    ));
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/4K3"),
        Err(FenError::MissingField(1))
    ));
}

#[test]
fn spurious_ep_square_is_dropped() {
    // an ep square no pawn can capture must not survive parsing
    let board =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    assert_eq!(board.ep_square(), Sq::NONE);

    // with a black pawn on d4 the very same field is kept
    let board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2").unwrap();
    assert_eq!(board.ep_square(), Sq::E3);
}

#[test]
fn shredder_castling_letters_round_trip() {
    let fen = "1r2k2r/8/8/8/8/8/8/1R1K2R1 w GBhb - 0 1";
    let board = Board::from_fen(fen).unwrap();
    assert!(board.is_chess960());
    assert_eq!(board.fen(), fen);
}

#[test]
fn standard_fen_for_standard_position() {
    // the same rights print as KQkq on a classical board even when the
    // parser is forced into 960 mode
    let board = Board::from_fen_960(rookery::START_FEN).unwrap();
    assert!(board.is_chess960());
    let emitted = board.fen();
    // shredder letters for the classical layout are HAha
    assert!(emitted.contains("HAha"), "got {}", emitted);
}

#[test]
fn fullmove_counter_round_trip() {
    let fen = "4k3/8/8/8/8/8/8/4K3 b - - 12 34";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.rule50(), 12);
    assert_eq!(board.fen(), fen);
}
