//! Zero-sized dispatch types for compile-time monomorphization of the move
//! generator.
//!
//! The generator is instantiated once per (side, generation kind) pair so
//! every per-side shift and per-kind branch folds away at compile time. The
//! dummy types here are not meant to replace [`Side`], [`GenKind`] or
//! [`PieceType`] anywhere else.
//!
//! [`Side`]: ../enum.Side.html
//! [`GenKind`]: ../enum.GenKind.html
//! [`PieceType`]: ../enum.PieceType.html

use super::bitboard::BitBoard;
use super::bit_twiddles::*;
use super::sq::Sq;
use super::{GenKind, PieceType, Side};

/// Compile-time stand-in for a [`Side`].
///
/// [`Side`]: ../enum.Side.html
pub trait SideTrait {
    /// The side this type stands for.
    fn side() -> Side;

    /// The opposing side.
    fn opp_side() -> Side;

    /// One square toward the promotion rank of this side.
    fn up(sq: Sq) -> Sq;

    /// One square away from the promotion rank of this side.
    fn down(sq: Sq) -> Sq;

    /// Down-left as seen by this side (the inverse of a capture up-right).
    fn down_left(sq: Sq) -> Sq;

    /// Down-right as seen by this side (the inverse of a capture up-left).
    fn down_right(sq: Sq) -> Sq;

    /// Shifts a board one rank forward for this side.
    fn shift_up(bb: BitBoard) -> BitBoard;

    /// Shifts a board one square forward-left, edge-masked.
    fn shift_up_left(bb: BitBoard) -> BitBoard;

    /// Shifts a board one square forward-right, edge-masked.
    fn shift_up_right(bb: BitBoard) -> BitBoard;
}

/// Stand-in for White.
pub struct WhiteType {}
/// Stand-in for Black.
pub struct BlackType {}

impl SideTrait for WhiteType {
    #[inline(always)]
    fn side() -> Side {
        Side::White
    }

    #[inline(always)]
    fn opp_side() -> Side {
        Side::Black
    }

    #[inline(always)]
    fn up(sq: Sq) -> Sq {
        sq.offset(8)
    }

    #[inline(always)]
    fn down(sq: Sq) -> Sq {
        sq.offset(-8)
    }

    #[inline(always)]
    fn down_left(sq: Sq) -> Sq {
        sq.offset(-9)
    }

    #[inline(always)]
    fn down_right(sq: Sq) -> Sq {
        sq.offset(-7)
    }

    #[inline(always)]
    fn shift_up(bb: BitBoard) -> BitBoard {
        BitBoard(shift_north(bb.0))
    }

    #[inline(always)]
    fn shift_up_left(bb: BitBoard) -> BitBoard {
        BitBoard(shift_north_west(bb.0))
    }

    #[inline(always)]
    fn shift_up_right(bb: BitBoard) -> BitBoard {
        BitBoard(shift_north_east(bb.0))
    }
}

impl SideTrait for BlackType {
    #[inline(always)]
    fn side() -> Side {
        Side::Black
    }

    #[inline(always)]
    fn opp_side() -> Side {
        Side::White
    }

    #[inline(always)]
    fn up(sq: Sq) -> Sq {
        sq.offset(-8)
    }

    #[inline(always)]
    fn down(sq: Sq) -> Sq {
        sq.offset(8)
    }

    #[inline(always)]
    fn down_left(sq: Sq) -> Sq {
        sq.offset(9)
    }

    #[inline(always)]
    fn down_right(sq: Sq) -> Sq {
        sq.offset(7)
    }

    #[inline(always)]
    fn shift_up(bb: BitBoard) -> BitBoard {
        BitBoard(shift_south(bb.0))
    }

    #[inline(always)]
    fn shift_up_left(bb: BitBoard) -> BitBoard {
        BitBoard(shift_south_east(bb.0))
    }

    #[inline(always)]
    fn shift_up_right(bb: BitBoard) -> BitBoard {
        BitBoard(shift_south_west(bb.0))
    }
}

/// Compile-time stand-in for a [`GenKind`].
///
/// [`GenKind`]: ../enum.GenKind.html
pub trait KindTrait {
    /// The generation kind this type stands for.
    fn kind() -> GenKind;
}

/// Stand-in for `GenKind::Captures`.
pub struct CapturesKind {}
/// Stand-in for `GenKind::Quiets`.
pub struct QuietsKind {}
/// Stand-in for `GenKind::NonEvasions`.
pub struct NonEvasionsKind {}
/// Stand-in for `GenKind::Evasions`.
pub struct EvasionsKind {}
/// Stand-in for `GenKind::QuietChecks`.
pub struct QuietChecksKind {}

impl KindTrait for CapturesKind {
    #[inline(always)]
    fn kind() -> GenKind {
        GenKind::Captures
    }
}

impl KindTrait for QuietsKind {
    #[inline(always)]
    fn kind() -> GenKind {
        GenKind::Quiets
    }
}

impl KindTrait for NonEvasionsKind {
    #[inline(always)]
    fn kind() -> GenKind {
        GenKind::NonEvasions
    }
}

impl KindTrait for EvasionsKind {
    #[inline(always)]
    fn kind() -> GenKind {
        GenKind::Evasions
    }
}

impl KindTrait for QuietChecksKind {
    #[inline(always)]
    fn kind() -> GenKind {
        GenKind::QuietChecks
    }
}

/// Compile-time stand-in for a real [`PieceType`].
///
/// [`PieceType`]: ../enum.PieceType.html
pub trait PieceTrait {
    /// The piece type this type stands for.
    fn piece_type() -> PieceType;
}

/// Stand-in for a knight.
pub struct KnightType {}
/// Stand-in for a bishop.
pub struct BishopType {}
/// Stand-in for a rook.
pub struct RookType {}
/// Stand-in for a queen.
pub struct QueenType {}
/// Stand-in for a king.
pub struct KingType {}

impl PieceTrait for KnightType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::Knight
    }
}

impl PieceTrait for BishopType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::Bishop
    }
}

impl PieceTrait for RookType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::Rook
    }
}

impl PieceTrait for QueenType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::Queen
    }
}

impl PieceTrait for KingType {
    #[inline(always)]
    fn piece_type() -> PieceType {
        PieceType::King
    }
}
