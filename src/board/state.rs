//! The per-ply [`State`] snapshot.
//!
//! Making a move allocates a fresh `State` whose `prev` link points at the
//! snapshot it replaced, so the stack of live states forms a linear chain
//! back to the position the board was created from. Undoing a move pops the
//! chain; nothing is recomputed because the whole snapshot is discarded.
//!
//! Sharing the chain through `Arc` makes cloning a board O(1): clones keep
//! the tail they were created with and push their own states from there.
//!
//! [`State`]: struct.State.html

use super::castle_rights::CastleRights;
use crate::core::bitboard::BitBoard;
use crate::core::masks::{PIECE_TYPE_CNT, SIDE_CNT};
use crate::core::piece_move::Move;
use crate::core::sq::Sq;
use crate::core::PieceType;

use std::sync::Arc;

/// Everything derived about a position that a single make/unmake flips.
///
/// The first field group is copied from the previous state and then edited
/// by the move; the second group is recomputed from scratch every ply.
#[derive(Clone)]
pub struct State {
    // -- carried over and amended --
    /// Castle rights still available to either player.
    pub castling: CastleRights,
    /// Halfmove clock of the fifty-move rule.
    pub rule50: i16,
    /// Plies since a null move was made; bounds repetition scans.
    pub plies_from_null: i16,
    /// The en-passant square, or `Sq::NONE`. Only set when an enemy pawn
    /// could actually capture on it.
    pub ep_square: Sq,
    /// Zobrist key over pawns only.
    pub pawn_key: u64,
    /// Zobrist key over material counts only.
    pub material_key: u64,
    /// Summed non-pawn material value per side.
    pub non_pawn_material: [i32; SIDE_CNT],

    // -- recomputed each ply --
    /// The full zobrist key of the position.
    pub key: u64,
    /// Pieces currently giving check.
    pub checkers: BitBoard,
    /// Per king owner: pieces of either color that stand between the king
    /// and an enemy slider.
    pub blockers: [BitBoard; SIDE_CNT],
    /// Per attacking side: sliders that pin something against the enemy
    /// king.
    pub pinners: [BitBoard; SIDE_CNT],
    /// Per piece type: squares from which that type would check the enemy
    /// king.
    pub check_squares: [BitBoard; PIECE_TYPE_CNT],
    /// Piece type captured by the move that produced this state.
    pub captured: PieceType,
    /// Signed ply distance to an earlier state with the same key, zero when
    /// none exists in the no-progress window. Negative when that earlier
    /// state had already repeated, which is the threefold signal.
    pub repetition: i16,
    /// The move that produced this state; null for the root and null moves.
    pub last_move: Move,
    /// The state this one was made from.
    pub prev: Option<Arc<State>>,
}

impl State {
    /// A root state with no rights, keys or history.
    pub fn blank() -> State {
        State {
            castling: CastleRights::empty(),
            rule50: 0,
            plies_from_null: 0,
            ep_square: Sq::NONE,
            pawn_key: 0,
            material_key: 0,
            non_pawn_material: [0; SIDE_CNT],
            key: 0,
            checkers: BitBoard::EMPTY,
            blockers: [BitBoard::EMPTY; SIDE_CNT],
            pinners: [BitBoard::EMPTY; SIDE_CNT],
            check_squares: [BitBoard::EMPTY; PIECE_TYPE_CNT],
            captured: PieceType::None,
            repetition: 0,
            last_move: Move::NULL,
            prev: None,
        }
    }

    /// The successor snapshot of `prev`: carried fields copied, recomputed
    /// fields cleared, back link set.
    pub fn next(prev: &Arc<State>) -> State {
        State {
            castling: prev.castling,
            rule50: prev.rule50,
            plies_from_null: prev.plies_from_null,
            ep_square: prev.ep_square,
            pawn_key: prev.pawn_key,
            material_key: prev.material_key,
            non_pawn_material: prev.non_pawn_material,
            key: 0,
            checkers: BitBoard::EMPTY,
            blockers: [BitBoard::EMPTY; SIDE_CNT],
            pinners: [BitBoard::EMPTY; SIDE_CNT],
            check_squares: [BitBoard::EMPTY; PIECE_TYPE_CNT],
            captured: PieceType::None,
            repetition: 0,
            last_move: Move::NULL,
            prev: Some(Arc::clone(prev)),
        }
    }

    /// Scans the chain for an earlier state with this state's key.
    ///
    /// Only states within `min(rule50, plies_from_null)` plies can repeat;
    /// the scan steps two plies at a time since a repetition needs the same
    /// side to move. On a hit, `repetition` becomes the distance, negated
    /// when the hit had itself already repeated.
    pub fn update_repetition(&mut self) {
        self.repetition = 0;
        let window = self.rule50.min(self.plies_from_null);
        if window < 4 {
            return;
        }
        let mut walk: &State = match self.two_back() {
            Some(s) => s,
            None => return,
        };
        let mut dist: i16 = 4;
        while dist <= window {
            walk = match walk.two_back() {
                Some(s) => s,
                None => return,
            };
            if walk.key == self.key {
                self.repetition = if walk.repetition != 0 { -dist } else { dist };
                return;
            }
            dist += 2;
        }
    }

    #[inline]
    fn two_back(&self) -> Option<&State> {
        self.prev
            .as_ref()
            .and_then(|p| p.prev.as_ref())
            .map(|p| &**p)
    }
}

impl PartialEq for State {
    /// Compares every snapshot field except the history link and the move
    /// that produced the state.
    fn eq(&self, other: &State) -> bool {
        self.castling == other.castling
            && self.rule50 == other.rule50
            && self.plies_from_null == other.plies_from_null
            && self.ep_square == other.ep_square
            && self.pawn_key == other.pawn_key
            && self.material_key == other.material_key
            && self.non_pawn_material == other.non_pawn_material
            && self.key == other.key
            && self.checkers == other.checkers
            && self.blockers == other.blockers
            && self.pinners == other.pinners
            && self.check_squares == other.check_squares
            && self.captured == other.captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(keys: &[u64]) -> Arc<State> {
        let mut head = Arc::new(State::blank());
        Arc::get_mut(&mut head).unwrap().key = keys[0];
        for &key in &keys[1..] {
            let mut next = State::next(&head);
            next.key = key;
            next.rule50 = head.rule50 + 1;
            next.plies_from_null = head.plies_from_null + 1;
            head = Arc::new(next);
        }
        head
    }

    #[test]
    fn no_repetition_in_short_window() {
        let head = chain(&[1, 2, 3, 1]);
        let mut top = State::next(&head);
        top.key = 2;
        top.rule50 = head.rule50 + 1;
        top.plies_from_null = head.plies_from_null + 1;
        top.update_repetition();
        // key 2 occurred 3 plies ago, outside the even-distance scan
        assert_eq!(top.repetition, 0);
    }

    #[test]
    fn repetition_found_at_four() {
        // keys: 9 8 7 6 9  -> top (key 9) repeats the state 4 plies back
        let head = chain(&[9, 8, 7, 6]);
        let mut top = State::next(&head);
        top.key = 9;
        top.rule50 = head.rule50 + 1;
        top.plies_from_null = head.plies_from_null + 1;
        top.update_repetition();
        assert_eq!(top.repetition, 4);
    }

    #[test]
    fn third_occurrence_is_negative() {
        let head = chain(&[9, 8, 7, 6]);
        let mut second = State::next(&head);
        second.key = 9;
        second.rule50 = head.rule50 + 1;
        second.plies_from_null = head.plies_from_null + 1;
        second.update_repetition();
        assert_eq!(second.repetition, 4);

        let second = Arc::new(second);
        let head = chain_extend(&second, &[5, 4, 3]);
        let mut third = State::next(&head);
        third.key = 9;
        third.rule50 = head.rule50 + 1;
        third.plies_from_null = head.plies_from_null + 1;
        third.update_repetition();
        assert_eq!(third.repetition, -4);
    }

    fn chain_extend(start: &Arc<State>, keys: &[u64]) -> Arc<State> {
        let mut head = Arc::clone(start);
        for &key in keys {
            let mut next = State::next(&head);
            next.key = key;
            next.rule50 = head.rule50 + 1;
            next.plies_from_null = head.plies_from_null + 1;
            head = Arc::new(next);
        }
        head
    }
}
