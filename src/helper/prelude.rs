//! Free accessor functions over the global tables.
//!
//! Every function forces table initialization through the lazy singleton, so
//! they are always safe to call. Prefer calling [`init_statics`] once during
//! startup so the (tens of milliseconds of) table construction doesn't land
//! inside your first search.
//!
//! [`init_statics`]: fn.init_statics.html

use super::TABLES;
use crate::core::bitboard::BitBoard;
use crate::core::sq::Sq;
use crate::core::{Piece, PieceType, Rank, Side};

/// Forces construction of all global tables. Idempotent and thread-safe;
/// subsequent calls are free.
#[cold]
pub fn init_statics() {
    lazy_static::initialize(&TABLES);
}

// ---- slider / leaper attacks ----

/// Attack set of a bishop on `sq` over `occupied`. Blockers of both colors
/// stop the rays; AND off friendly pieces before using the result as moves.
#[inline(always)]
pub fn bishop_moves(occupied: BitBoard, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.bishops.attacks(occupied.0, sq.0))
}

/// Attack set of a rook on `sq` over `occupied`.
#[inline(always)]
pub fn rook_moves(occupied: BitBoard, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.rooks.attacks(occupied.0, sq.0))
}

/// Attack set of a queen on `sq` over `occupied`.
#[inline(always)]
pub fn queen_moves(occupied: BitBoard, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.rooks.attacks(occupied.0, sq.0) | TABLES.bishops.attacks(occupied.0, sq.0))
}

/// Attack set of a knight on `sq`.
#[inline(always)]
pub fn knight_moves(sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.knight_attacks(sq.0))
}

/// Attack set of a king on `sq`.
#[inline(always)]
pub fn king_moves(sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.king_attacks(sq.0))
}

/// Squares a pawn of `side` on `sq` attacks.
#[inline(always)]
pub fn pawn_attacks_from(sq: Sq, side: Side) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.pawn_attacks(side, sq.0))
}

/// Attack set of a non-pawn piece type given an occupancy.
///
/// This is the generic `attacks(sq, pt, occupied)` contract: sliders respect
/// blockers, leapers ignore the occupancy. Pawns are not supported here
/// because their attacks depend on the side; use [`pawn_attacks_from`].
///
/// [`pawn_attacks_from`]: fn.pawn_attacks_from.html
#[inline]
pub fn attacks_bb(pt: PieceType, sq: Sq, occupied: BitBoard) -> BitBoard {
    debug_assert!(sq.on_board());
    match pt {
        PieceType::Knight => knight_moves(sq),
        PieceType::Bishop => bishop_moves(occupied, sq),
        PieceType::Rook => rook_moves(occupied, sq),
        PieceType::Queen => queen_moves(occupied, sq),
        PieceType::King => king_moves(sq),
        _ => BitBoard::EMPTY,
    }
}

/// Attack set of a non-pawn piece type over an empty board.
#[inline(always)]
pub fn pseudo_attacks(pt: PieceType, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.pseudo_attacks(pt, sq.0))
}

// ---- rays and geometry ----

/// Squares strictly between two squares when they share a rank, file or
/// diagonal; empty otherwise.
#[inline(always)]
pub fn between_bb(a: Sq, b: Sq) -> BitBoard {
    debug_assert!(a.on_board() && b.on_board());
    BitBoard(TABLES.boards.between(a.0, b.0))
}

/// The full line (rank, file or diagonal) through two squares, both
/// included; empty when they are not colinear.
#[inline(always)]
pub fn line_bb(a: Sq, b: Sq) -> BitBoard {
    debug_assert!(a.on_board() && b.on_board());
    BitBoard(TABLES.boards.line(a.0, b.0))
}

/// Whether three squares share a rank, file or diagonal.
#[inline(always)]
pub fn aligned(a: Sq, b: Sq, c: Sq) -> bool {
    (line_bb(a, b) & c.bb()).is_not_empty()
}

/// Chebyshev distance between two squares, table-backed.
#[inline(always)]
pub fn distance_of_sqs(a: Sq, b: Sq) -> u8 {
    TABLES.boards.distance(a.0, b.0)
}

/// The files adjacent to the file of `sq`.
#[inline(always)]
pub fn adjacent_sq_file(sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.adjacent_files(sq.file_idx()))
}

// ---- pawn-structure masks ----

/// Every square on a rank strictly in front of `rank`, from `side`'s view.
#[inline(always)]
pub fn forward_ranks_bb(side: Side, rank: Rank) -> BitBoard {
    BitBoard(TABLES.boards.forward_ranks(side, rank as u8))
}

/// The part of `sq`'s file strictly in front of it, from `side`'s view.
#[inline(always)]
pub fn forward_file_bb(side: Side, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.forward_file(side, sq.0))
}

/// Squares attackable by a pawn of `side` somewhere along its advance from
/// `sq`.
#[inline(always)]
pub fn pawn_attack_span(side: Side, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.pawn_span(side, sq.0))
}

/// Mask that must be free of enemy pawns for a pawn of `side` on `sq` to be
/// passed.
#[inline(always)]
pub fn passed_pawn_mask(side: Side, sq: Sq) -> BitBoard {
    debug_assert!(sq.on_board());
    BitBoard(TABLES.boards.passed_mask(side, sq.0))
}

// ---- zobrist keys ----

/// Zobrist key of `piece` on `sq`.
#[inline(always)]
pub fn z_square(sq: Sq, piece: Piece) -> u64 {
    TABLES.zobrist.psq(piece, sq)
}

/// Material-key contribution of owning `count` pieces of this kind.
#[inline(always)]
pub fn z_material(piece: Piece, count: u8) -> u64 {
    TABLES.zobrist.material(piece, count)
}

/// Zobrist key of an en-passant opportunity on `sq`'s file.
#[inline(always)]
pub fn z_ep(sq: Sq) -> u64 {
    TABLES.zobrist.ep_file(sq)
}

/// Zobrist key of a castle-rights combination (or of a removed subset).
#[inline(always)]
pub fn z_castle(rights: u8) -> u64 {
    TABLES.zobrist.castle(rights)
}

/// Zobrist key of the side to move being Black.
#[inline(always)]
pub fn z_side() -> u64 {
    TABLES.zobrist.side()
}

/// Base key of an empty pawn configuration.
#[inline(always)]
pub fn z_no_pawns() -> u64 {
    TABLES.zobrist.no_pawns()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_and_line() {
        init_statics();
        assert_eq!(
            between_bb(Sq::A1, Sq::A4),
            Sq::A2.bb() | Sq::A3.bb()
        );
        assert_eq!(between_bb(Sq::A1, Sq::B3), BitBoard::EMPTY);
        assert!(line_bb(Sq::A1, Sq::H8).contains(Sq::D4));
        assert!(aligned(Sq::A1, Sq::C3, Sq::H8));
        assert!(!aligned(Sq::A1, Sq::C3, Sq::H7));
    }

    #[test]
    fn pawn_masks() {
        assert_eq!(
            pawn_attacks_from(Sq::E4, Side::White),
            Sq::D5.bb() | Sq::F5.bb()
        );
        assert_eq!(
            pawn_attacks_from(Sq::A4, Side::Black),
            Sq::B3.bb()
        );
        assert!(passed_pawn_mask(Side::White, Sq::E4).contains(Sq::D5));
        assert!(passed_pawn_mask(Side::White, Sq::E4).contains(Sq::E7));
        assert!(!passed_pawn_mask(Side::White, Sq::E4).contains(Sq::E3));
        assert!(forward_file_bb(Side::Black, Sq::E4).contains(Sq::E2));
    }

    #[test]
    fn generic_attacks_contract() {
        let occ = Sq::E4.bb();
        assert_eq!(attacks_bb(PieceType::Rook, Sq::E1, occ) & Sq::E5.bb(), BitBoard::EMPTY);
        assert!(attacks_bb(PieceType::Rook, Sq::E1, occ).contains(Sq::E4));
        assert_eq!(attacks_bb(PieceType::Knight, Sq::G1, occ), pseudo_attacks(PieceType::Knight, Sq::G1));
    }
}
