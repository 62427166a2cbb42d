//! The [`Sq`] square type.
//!
//! A `Sq` wraps a `u8` in the range `0..64`, file-major from a1:
//!
//! ```text
//! 8 | 56 57 58 59 60 61 62 63
//! 7 | 48 49 50 51 52 53 54 55
//! 6 | 40 41 42 43 44 45 46 47
//! 5 | 32 33 34 35 36 37 38 39
//! 4 | 24 25 26 27 28 29 30 31
//! 3 | 16 17 18 19 20 21 22 23
//! 2 | 8  9  10 11 12 13 14 15
//! 1 | 0  1  2  3  4  5  6  7
//!   -------------------------
//!      a  b  c  d  e  f  g  h
//! ```
//!
//! [`Sq::NONE`] (value 64) marks the absence of a square, most notably an
//! unavailable en-passant square. Calling geometry methods on an out-of-range
//! square is a bug; debug builds assert on it.
//!
//! [`Sq`]: struct.Sq.html
//! [`Sq::NONE`]: struct.Sq.html#associatedconstant.NONE

use super::bitboard::BitBoard;
use super::bit_twiddles::diff;
use super::masks::*;
use super::{File, Rank};

use std::fmt;
use std::mem::transmute;
use std::ops::*;

/// A single square of the board, or [`Sq::NONE`].
///
/// [`Sq::NONE`]: struct.Sq.html#associatedconstant.NONE
#[derive(Copy, Clone, Default, Hash, PartialEq, PartialOrd, Ord, Eq, Debug)]
#[repr(transparent)]
pub struct Sq(pub u8);

impl_bit_ops!(Sq, u8);

impl Sq {
    /// The non-square. Compares equal to nothing on the board.
    pub const NONE: Sq = Sq(64);

    /// Whether the square lies on the board.
    ///
    /// ```
    /// use rookery::Sq;
    ///
    /// assert!(Sq(63).on_board());
    /// assert!(!Sq::NONE.on_board());
    /// ```
    #[inline(always)]
    pub const fn on_board(self) -> bool {
        self.0 < 64
    }

    /// Builds a square from file and rank.
    ///
    /// ```
    /// use rookery::{Sq, File, Rank};
    ///
    /// assert_eq!(Sq::make(File::F, Rank::R2), Sq::F2);
    /// ```
    #[inline(always)]
    pub const fn make(file: File, rank: Rank) -> Sq {
        Sq(((rank as u8) << 3) | file as u8)
    }

    /// The bitboard holding only this square.
    #[inline(always)]
    pub fn bb(self) -> BitBoard {
        debug_assert!(self.on_board());
        BitBoard(1u64 << self.0)
    }

    /// The rank the square lies on.
    #[inline(always)]
    pub fn rank(self) -> Rank {
        unsafe { transmute::<u8, Rank>((self.0 >> 3) & 0b111) }
    }

    /// The rank index (0..8) the square lies on.
    #[inline(always)]
    pub const fn rank_idx(self) -> u8 {
        self.0 >> 3
    }

    /// The rank mask of the square as a bitboard.
    #[inline(always)]
    pub fn rank_bb(self) -> BitBoard {
        BitBoard(RANK_BB[self.rank_idx() as usize])
    }

    /// The file the square lies on.
    #[inline(always)]
    pub fn file(self) -> File {
        unsafe { transmute::<u8, File>(self.0 & 0b111) }
    }

    /// The file index (0..8) the square lies on.
    #[inline(always)]
    pub const fn file_idx(self) -> u8 {
        self.0 & 0b111
    }

    /// The file mask of the square as a bitboard.
    #[inline(always)]
    pub fn file_bb(self) -> BitBoard {
        BitBoard(FILE_BB[self.file_idx() as usize])
    }

    /// Chebyshev distance to another square.
    ///
    /// ```
    /// use rookery::Sq;
    ///
    /// assert_eq!(Sq::A1.distance(Sq::A1), 0);
    /// assert_eq!(Sq::A1.distance(Sq::B2), 1);
    /// assert_eq!(Sq::A1.distance(Sq::B3), 2);
    /// ```
    #[inline]
    pub fn distance(self, other: Sq) -> u8 {
        let r = diff(self.rank_idx(), other.rank_idx());
        let f = diff(self.file_idx(), other.file_idx());
        if r > f {
            r
        } else {
            f
        }
    }

    /// Mirrors the square's rank: a1 becomes a8.
    #[inline(always)]
    pub const fn flip(self) -> Sq {
        Sq(self.0 ^ 0b11_1000)
    }

    /// Applies a signed single-step offset. The result may be off the board;
    /// callers mask appropriately.
    #[inline(always)]
    pub fn offset(self, delta: i8) -> Sq {
        Sq((self.0 as i8).wrapping_add(delta) as u8)
    }

    /// Whether this square and another sit on opposite-colored squares.
    #[inline(always)]
    pub fn opposite_colors(self, other: Sq) -> bool {
        let s = self.0 ^ other.0;
        ((s >> 3) ^ s) & 1 != 0
    }

    /// Whether the square is dark.
    #[inline(always)]
    pub fn on_dark_square(self) -> bool {
        (self.bb() & BitBoard::DARK_SQUARES).is_not_empty()
    }
}

impl fmt::Display for Sq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.on_board() {
            write!(f, "{}", SQ_DISPLAY[self.0 as usize])
        } else {
            write!(f, "-")
        }
    }
}

// Named square constants.
impl Sq {
    #[doc(hidden)]
    pub const A1: Sq = Sq(0);
    #[doc(hidden)]
    pub const B1: Sq = Sq(1);
    #[doc(hidden)]
    pub const C1: Sq = Sq(2);
    #[doc(hidden)]
    pub const D1: Sq = Sq(3);
    #[doc(hidden)]
    pub const E1: Sq = Sq(4);
    #[doc(hidden)]
    pub const F1: Sq = Sq(5);
    #[doc(hidden)]
    pub const G1: Sq = Sq(6);
    #[doc(hidden)]
    pub const H1: Sq = Sq(7);
    #[doc(hidden)]
    pub const A2: Sq = Sq(8);
    #[doc(hidden)]
    pub const B2: Sq = Sq(9);
    #[doc(hidden)]
    pub const C2: Sq = Sq(10);
    #[doc(hidden)]
    pub const D2: Sq = Sq(11);
    #[doc(hidden)]
    pub const E2: Sq = Sq(12);
    #[doc(hidden)]
    pub const F2: Sq = Sq(13);
    #[doc(hidden)]
    pub const G2: Sq = Sq(14);
    #[doc(hidden)]
    pub const H2: Sq = Sq(15);
    #[doc(hidden)]
    pub const A3: Sq = Sq(16);
    #[doc(hidden)]
    pub const B3: Sq = Sq(17);
    #[doc(hidden)]
    pub const C3: Sq = Sq(18);
    #[doc(hidden)]
    pub const D3: Sq = Sq(19);
    #[doc(hidden)]
    pub const E3: Sq = Sq(20);
    #[doc(hidden)]
    pub const F3: Sq = Sq(21);
    #[doc(hidden)]
    pub const G3: Sq = Sq(22);
    #[doc(hidden)]
    pub const H3: Sq = Sq(23);
    #[doc(hidden)]
    pub const A4: Sq = Sq(24);
    #[doc(hidden)]
    pub const B4: Sq = Sq(25);
    #[doc(hidden)]
    pub const C4: Sq = Sq(26);
    #[doc(hidden)]
    pub const D4: Sq = Sq(27);
    #[doc(hidden)]
    pub const E4: Sq = Sq(28);
    #[doc(hidden)]
    pub const F4: Sq = Sq(29);
    #[doc(hidden)]
    pub const G4: Sq = Sq(30);
    #[doc(hidden)]
    pub const H4: Sq = Sq(31);
    #[doc(hidden)]
    pub const A5: Sq = Sq(32);
    #[doc(hidden)]
    pub const B5: Sq = Sq(33);
    #[doc(hidden)]
    pub const C5: Sq = Sq(34);
    #[doc(hidden)]
    pub const D5: Sq = Sq(35);
    #[doc(hidden)]
    pub const E5: Sq = Sq(36);
    #[doc(hidden)]
    pub const F5: Sq = Sq(37);
    #[doc(hidden)]
    pub const G5: Sq = Sq(38);
    #[doc(hidden)]
    pub const H5: Sq = Sq(39);
    #[doc(hidden)]
    pub const A6: Sq = Sq(40);
    #[doc(hidden)]
    pub const B6: Sq = Sq(41);
    #[doc(hidden)]
    pub const C6: Sq = Sq(42);
    #[doc(hidden)]
    pub const D6: Sq = Sq(43);
    #[doc(hidden)]
    pub const E6: Sq = Sq(44);
    #[doc(hidden)]
    pub const F6: Sq = Sq(45);
    #[doc(hidden)]
    pub const G6: Sq = Sq(46);
    #[doc(hidden)]
    pub const H6: Sq = Sq(47);
    #[doc(hidden)]
    pub const A7: Sq = Sq(48);
    #[doc(hidden)]
    pub const B7: Sq = Sq(49);
    #[doc(hidden)]
    pub const C7: Sq = Sq(50);
    #[doc(hidden)]
    pub const D7: Sq = Sq(51);
    #[doc(hidden)]
    pub const E7: Sq = Sq(52);
    #[doc(hidden)]
    pub const F7: Sq = Sq(53);
    #[doc(hidden)]
    pub const G7: Sq = Sq(54);
    #[doc(hidden)]
    pub const H7: Sq = Sq(55);
    #[doc(hidden)]
    pub const A8: Sq = Sq(56);
    #[doc(hidden)]
    pub const B8: Sq = Sq(57);
    #[doc(hidden)]
    pub const C8: Sq = Sq(58);
    #[doc(hidden)]
    pub const D8: Sq = Sq(59);
    #[doc(hidden)]
    pub const E8: Sq = Sq(60);
    #[doc(hidden)]
    pub const F8: Sq = Sq(61);
    #[doc(hidden)]
    pub const G8: Sq = Sq(62);
    #[doc(hidden)]
    pub const H8: Sq = Sq(63);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{File, Rank};

    #[test]
    fn geometry() {
        assert_eq!(Sq::F2.file(), File::F);
        assert_eq!(Sq::F2.rank(), Rank::R2);
        assert_eq!(Sq::make(File::H, Rank::R8), Sq::H8);
        assert_eq!(Sq::A1.flip(), Sq::A8);
        assert_eq!(Sq::E4.offset(8), Sq::E5);
        assert_eq!(Sq::E4.offset(-8), Sq::E3);
    }

    #[test]
    fn colors() {
        assert!(Sq::A1.on_dark_square());
        assert!(!Sq::H1.on_dark_square());
        assert!(Sq::A1.opposite_colors(Sq::A2));
        assert!(!Sq::A1.opposite_colors(Sq::B2));
    }
}
