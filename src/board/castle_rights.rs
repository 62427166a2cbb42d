//! The [`CastleRights`] mask.
//!
//! Four bits, one per (side, direction) pair. A set bit only promises that
//! neither the king nor the matching rook has moved; whether castling is
//! playable right now also depends on the path and attack checks done by the
//! move generator.
//!
//! [`CastleRights`]: struct.CastleRights.html

use crate::core::{CastleSide, Side};

use std::fmt;

bitflags! {
    /// Castle-rights bits for both players.
    pub struct CastleRights: u8 {
        /// White may castle king-side.
        const WHITE_K = 0b0001;
        /// White may castle queen-side.
        const WHITE_Q = 0b0010;
        /// Black may castle king-side.
        const BLACK_K = 0b0100;
        /// Black may castle queen-side.
        const BLACK_Q = 0b1000;
        /// Both of White's rights.
        const WHITE_ALL = Self::WHITE_K.bits | Self::WHITE_Q.bits;
        /// Both of Black's rights.
        const BLACK_ALL = Self::BLACK_K.bits | Self::BLACK_Q.bits;
    }
}

/// The four single rights in array-index order.
pub static ALL_CASTLE_BITS: [CastleRights; 4] = [
    CastleRights::WHITE_K,
    CastleRights::WHITE_Q,
    CastleRights::BLACK_K,
    CastleRights::BLACK_Q,
];

impl CastleRights {
    /// The single right of a side and direction.
    #[inline]
    pub fn of(side: Side, castle_side: CastleSide) -> CastleRights {
        let shift = (side as u8) * 2 + castle_side as u8;
        CastleRights {
            bits: 1u8 << shift,
        }
    }

    /// Index of a *single* right into the 4-entry rook/path tables.
    ///
    /// # Panics
    ///
    /// Debug builds panic unless exactly one bit is set.
    #[inline(always)]
    pub fn index(self) -> usize {
        debug_assert_eq!(self.bits.count_ones(), 1);
        self.bits.trailing_zeros() as usize
    }

    /// Both rights of one side.
    #[inline]
    pub fn side_rights(side: Side) -> CastleRights {
        match side {
            Side::White => CastleRights::WHITE_ALL,
            Side::Black => CastleRights::BLACK_ALL,
        }
    }

    /// Whether any of the given rights are present.
    #[inline(always)]
    pub fn has(self, rights: CastleRights) -> bool {
        self.intersects(rights)
    }

    /// Clears every right in `mask` and returns the bits actually removed.
    #[inline]
    pub fn strip(&mut self, mask: u8) -> u8 {
        let removed = self.bits & mask;
        self.bits &= !mask;
        removed
    }

    /// FEN representation using `KQkq` letters; `-` when no right remains.
    pub fn fen_string(self) -> String {
        if self.is_empty() {
            return "-".to_owned();
        }
        let mut s = String::with_capacity(4);
        if self.contains(CastleRights::WHITE_K) {
            s.push('K');
        }
        if self.contains(CastleRights::WHITE_Q) {
            s.push('Q');
        }
        if self.contains(CastleRights::BLACK_K) {
            s.push('k');
        }
        if self.contains(CastleRights::BLACK_Q) {
            s.push('q');
        }
        s
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fen_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rights_of() {
        assert_eq!(
            CastleRights::of(Side::White, CastleSide::KingSide),
            CastleRights::WHITE_K
        );
        assert_eq!(
            CastleRights::of(Side::Black, CastleSide::QueenSide),
            CastleRights::BLACK_Q
        );
        assert_eq!(CastleRights::WHITE_K.index(), 0);
        assert_eq!(CastleRights::BLACK_Q.index(), 3);
    }

    #[test]
    fn strip_returns_removed() {
        let mut cr = CastleRights::all();
        let removed = cr.strip(CastleRights::WHITE_ALL.bits);
        assert_eq!(removed, CastleRights::WHITE_ALL.bits);
        assert_eq!(cr, CastleRights::BLACK_ALL);
        // stripping again removes nothing
        assert_eq!(cr.strip(CastleRights::WHITE_ALL.bits), 0);
    }

    #[test]
    fn fen_letters() {
        assert_eq!(CastleRights::all().fen_string(), "KQkq");
        assert_eq!(CastleRights::empty().fen_string(), "-");
        assert_eq!(
            (CastleRights::WHITE_K | CastleRights::BLACK_Q).fen_string(),
            "Kq"
        );
    }
}
