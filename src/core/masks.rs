//! Raw constants: board dimensions, file/rank masks, starting occupancies and
//! display tables.

/// Number of players on a chessboard.
pub const SIDE_CNT: usize = 2;
/// Number of piece-type slots, including the `None` and `All` sentinels.
pub const PIECE_TYPE_CNT: usize = 8;
/// Number of colored-piece slots (two sides worth of piece types).
pub const PIECE_CNT: usize = 16;
/// Number of squares on a chessboard.
pub const SQ_CNT: usize = 64;
/// Number of files on a chessboard.
pub const FILE_CNT: usize = 8;
/// Number of ranks on a chessboard.
pub const RANK_CNT: usize = 8;
/// Number of castling directions per player.
pub const CASTLE_SIDES: usize = 2;
/// Number of distinct castle-rights bits.
pub const CASTLE_RIGHT_CNT: usize = 4;
/// Number of castle-rights bit combinations.
pub const ALL_CASTLE_RIGHTS: usize = 16;
/// Most pieces of one kind a single side can hold (8 pawns promoted + 2).
pub const MAX_PIECES_ONE_KIND: usize = 16;

/// Bits of file A.
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
/// Bits of file B.
pub const FILE_B: u64 = FILE_A << 1;
/// Bits of file C.
pub const FILE_C: u64 = FILE_A << 2;
/// Bits of file D.
pub const FILE_D: u64 = FILE_A << 3;
/// Bits of file E.
pub const FILE_E: u64 = FILE_A << 4;
/// Bits of file F.
pub const FILE_F: u64 = FILE_A << 5;
/// Bits of file G.
pub const FILE_G: u64 = FILE_A << 6;
/// Bits of file H.
pub const FILE_H: u64 = FILE_A << 7;

/// Bits of rank 1.
pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
/// Bits of rank 2.
pub const RANK_2: u64 = RANK_1 << 8;
/// Bits of rank 3.
pub const RANK_3: u64 = RANK_1 << 16;
/// Bits of rank 4.
pub const RANK_4: u64 = RANK_1 << 24;
/// Bits of rank 5.
pub const RANK_5: u64 = RANK_1 << 32;
/// Bits of rank 6.
pub const RANK_6: u64 = RANK_1 << 40;
/// Bits of rank 7.
pub const RANK_7: u64 = RANK_1 << 48;
/// Bits of rank 8.
pub const RANK_8: u64 = RANK_1 << 56;

/// All dark squares.
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
/// All light squares.
pub const LIGHT_SQUARES: u64 = !DARK_SQUARES;

/// File masks indexed from file A to file H.
pub static FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

/// Rank masks indexed from rank 1 to rank 8.
pub static RANK_BB: [u64; RANK_CNT] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

/// Offset of a one-square step north.
pub const NORTH: i8 = 8;
/// Offset of a one-square step south.
pub const SOUTH: i8 = -8;
/// Offset of a one-square step east.
pub const EAST: i8 = 1;
/// Offset of a one-square step west.
pub const WEST: i8 = -1;
/// Offset of a one-square step north-east.
pub const NORTH_EAST: i8 = 9;
/// Offset of a one-square step north-west.
pub const NORTH_WEST: i8 = 7;
/// Offset of a one-square step south-east.
pub const SOUTH_EAST: i8 = -7;
/// Offset of a one-square step south-west.
pub const SOUTH_WEST: i8 = -9;

/// Starting occupancy of the white pieces.
pub const START_WHITE_OCC: u64 = RANK_1 | RANK_2;
/// Starting occupancy of the black pieces.
pub const START_BLACK_OCC: u64 = RANK_7 | RANK_8;
/// Starting occupancy of both players.
pub const START_OCC_ALL: u64 = START_WHITE_OCC | START_BLACK_OCC;

/// Squares in the printing order used by `Display` impls: rank 8 first.
pub static SQ_DISPLAY_ORDER: [u8; SQ_CNT] = [
    56, 57, 58, 59, 60, 61, 62, 63, 48, 49, 50, 51, 52, 53, 54, 55, 40, 41, 42, 43, 44, 45, 46, 47,
    32, 33, 34, 35, 36, 37, 38, 39, 24, 25, 26, 27, 28, 29, 30, 31, 16, 17, 18, 19, 20, 21, 22, 23,
    8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7,
];

/// Algebraic name of each square index.
///
/// ```
/// use rookery::core::masks::SQ_DISPLAY;
///
/// assert_eq!(SQ_DISPLAY[0], "a1");
/// assert_eq!(SQ_DISPLAY[63], "h8");
/// ```
pub static SQ_DISPLAY: [&str; SQ_CNT] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// FEN character of each (side, piece-type) pair; white uppercase.
pub static PIECE_DISPLAYS: [[char; PIECE_TYPE_CNT]; SIDE_CNT] = [
    ['.', 'P', 'N', 'B', 'R', 'Q', 'K', '*'],
    ['.', 'p', 'n', 'b', 'r', 'q', 'k', '*'],
];

/// File letters indexed from file A.
pub static FILE_DISPLAYS: [char; FILE_CNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digits indexed from rank 1.
pub static RANK_DISPLAYS: [char; RANK_CNT] = ['1', '2', '3', '4', '5', '6', '7', '8'];
