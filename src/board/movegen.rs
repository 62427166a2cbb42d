//! Move generation for a [`Board`].
//!
//! One public entry, [`MoveGen::generate`], takes a [`GenKind`] selecting
//! the category of moves produced. All categories except `Legal` are
//! pseudo-legal: cheap to produce, but a move may still leave its own king
//! in check and must pass [`Board::legal_move`] before being applied.
//! `Legal` runs the right pseudo-legal generator for the position's check
//! state and filters the output.
//!
//! Internally one generator body is monomorphized per (side, kind) pair via
//! the zero-sized types in [`mono_traits`], with legality filtering folded
//! in as a const generic, so each instantiation compiles to straight-line
//! code over the bitboards.
//!
//! # Preconditions
//!
//! `Captures`, `Quiets`, `NonEvasions` and `QuietChecks` require the side
//! to move *not* to be in check; `Evasions` requires it to be in check.
//! `Legal` is always allowed. Debug builds assert these.
//!
//! [`Board`]: ../struct.Board.html
//! [`MoveGen::generate`]: struct.MoveGen.html#method.generate
//! [`GenKind`]: ../../core/enum.GenKind.html
//! [`Board::legal_move`]: ../struct.Board.html#method.legal_move
//! [`mono_traits`]: ../../core/mono_traits/index.html

use super::Board;
use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::*;
use crate::core::move_list::MoveList;
use crate::core::piece_move::Move;
use crate::core::sq::Sq;
use crate::core::{CastleSide, GenKind, Piece, PieceType, Side};
use crate::helper::prelude::*;

/// The move generator. Stateless; all entry points are associated
/// functions.
pub struct MoveGen {}

impl MoveGen {
    /// Generates the moves of the requested kind for the side to move.
    pub fn generate(board: &Board, kind: GenKind) -> MoveList {
        let mut list = MoveList::new();
        match kind {
            GenKind::Captures => Self::dispatch::<CapturesKind, false>(board, &mut list),
            GenKind::Quiets => Self::dispatch::<QuietsKind, false>(board, &mut list),
            GenKind::NonEvasions => Self::dispatch::<NonEvasionsKind, false>(board, &mut list),
            GenKind::Evasions => Self::dispatch::<EvasionsKind, false>(board, &mut list),
            GenKind::QuietChecks => Self::dispatch::<QuietChecksKind, false>(board, &mut list),
            GenKind::Legal => {
                if board.in_check() {
                    Self::dispatch::<EvasionsKind, true>(board, &mut list)
                } else {
                    Self::dispatch::<NonEvasionsKind, true>(board, &mut list)
                }
            }
        }
        list
    }

    fn dispatch<G: KindTrait, const LEGAL: bool>(board: &Board, list: &mut MoveList) {
        match board.turn() {
            Side::White => InnerMoveGen::<LEGAL>::run::<G, WhiteType>(board, list),
            Side::Black => InnerMoveGen::<LEGAL>::run::<G, BlackType>(board, list),
        }
    }
}

/// One generation pass. `LEGAL` folds the legality filter into the push
/// path at compile time.
struct InnerMoveGen<'a, 'b, const LEGAL: bool> {
    board: &'a Board,
    list: &'b mut MoveList,
    occ: BitBoard,
    us_occ: BitBoard,
    them_occ: BitBoard,
}

impl<'a, 'b, const LEGAL: bool> InnerMoveGen<'a, 'b, LEGAL> {
    fn run<G: KindTrait, S: SideTrait>(board: &'a Board, list: &'b mut MoveList) {
        let mut gen = InnerMoveGen::<LEGAL> {
            board,
            list,
            occ: board.occupied(),
            us_occ: board.side_bb(S::side()),
            them_occ: board.side_bb(S::opp_side()),
        };
        match G::kind() {
            GenKind::Evasions => gen.gen_evasions::<S>(),
            GenKind::QuietChecks => gen.gen_quiet_checks::<S>(),
            _ => gen.gen_non_evasions::<G, S>(),
        }
    }

    #[inline(always)]
    fn push(&mut self, mv: Move) {
        if !LEGAL || self.board.legal_move(mv) {
            self.list.push(mv);
        }
    }

    fn gen_non_evasions<G: KindTrait, S: SideTrait>(&mut self) {
        debug_assert!(!self.board.in_check());
        let target = match G::kind() {
            GenKind::NonEvasions => !self.us_occ,
            GenKind::Captures => self.them_occ,
            GenKind::Quiets => !self.occ,
            _ => unreachable!(),
        };
        self.gen_all::<G, S>(target);
    }

    /// The common body: pawns, pieces, king and castling against a target
    /// set of destination squares.
    fn gen_all<G: KindTrait, S: SideTrait>(&mut self, target: BitBoard) {
        self.pawn_moves::<G, S>(target);
        self.piece_moves::<G, S, KnightType>(target);
        self.piece_moves::<G, S, BishopType>(target);
        self.piece_moves::<G, S, RookType>(target);
        self.piece_moves::<G, S, QueenType>(target);

        if G::kind() != GenKind::QuietChecks && G::kind() != GenKind::Evasions {
            let ksq = self.board.king_sq(S::side());
            let mut attacks = king_moves(ksq) & target;
            while let Some(to) = attacks.pop_some_lsb() {
                self.push(Move::make(ksq, to));
            }
        }

        if (G::kind() == GenKind::Quiets || G::kind() == GenKind::NonEvasions)
            && !self.board.player_castle_rights(S::side()).is_empty()
        {
            self.castle_moves::<S>(CastleSide::KingSide);
            self.castle_moves::<S>(CastleSide::QueenSide);
        }
    }

    /// Moves of one non-pawn, non-king piece type.
    fn piece_moves<G: KindTrait, S: SideTrait, P: PieceTrait>(&mut self, target: BitBoard) {
        let pt = P::piece_type();
        let mut pieces = self.board.piece_bb(S::side(), pt);
        while let Some(from) = pieces.pop_some_lsb() {
            if G::kind() == GenKind::QuietChecks {
                // discovered-check candidates were already emitted; direct
                // checkers must be able to reach a checking square at all
                if self.board.discovered_check_candidates().contains(from) {
                    continue;
                }
                if (pseudo_attacks(pt, from) & target & self.board.check_squares(pt)).is_empty() {
                    continue;
                }
            }
            let mut attacks = attacks_bb(pt, from, self.occ) & target;
            if G::kind() == GenKind::QuietChecks {
                attacks &= self.board.check_squares(pt);
            }
            while let Some(to) = attacks.pop_some_lsb() {
                self.push(Move::make(from, to));
            }
        }
    }

    /// Non-captures that give check: discovered candidates move anywhere
    /// quiet (the king only off the shared line), everything else is the
    /// common body restricted to checking squares.
    fn gen_quiet_checks<S: SideTrait>(&mut self) {
        debug_assert!(!self.board.in_check());
        let target = !self.occ;
        let their_ksq = self.board.king_sq(S::opp_side());

        let mut dc = self.board.discovered_check_candidates();
        while let Some(from) = dc.pop_some_lsb() {
            let pt = self.board.piece_at(from).type_of();
            if pt == PieceType::Pawn {
                // pawn discovered pushes are folded into pawn_moves
                continue;
            }
            let mut b = attacks_bb(pt, from, self.occ) & target;
            if pt == PieceType::King {
                b &= !pseudo_attacks(PieceType::Queen, their_ksq);
            }
            while let Some(to) = b.pop_some_lsb() {
                self.push(Move::make(from, to));
            }
        }

        self.gen_all::<QuietChecksKind, S>(target);
    }

    /// Check evasions: king steps off every slider ray, and with a single
    /// checker also blocks or captures.
    fn gen_evasions<S: SideTrait>(&mut self) {
        debug_assert!(self.board.in_check());
        let ksq = self.board.king_sq(S::side());
        let checkers = self.board.checkers();

        // squares swept by checking sliders, through and past the king
        let mut slider_attacks = BitBoard::EMPTY;
        let mut sliders =
            checkers & !self.board.piece_two_bb_both_players(PieceType::Pawn, PieceType::Knight);
        while let Some((sq, bit)) = sliders.pop_some_lsb_and_bit() {
            slider_attacks |= line_bb(sq, ksq) ^ bit;
        }

        let mut k_moves = king_moves(ksq) & !self.us_occ & !slider_attacks;
        while let Some(to) = k_moves.pop_some_lsb() {
            self.push(Move::make(ksq, to));
        }

        // double check: only the king may move
        if checkers.more_than_one() {
            return;
        }

        let checker = checkers.lsb_sq();
        let target = between_bb(checker, ksq) | checker.bb();
        self.gen_all::<EvasionsKind, S>(target);
    }

    /// Castling on one wing, path and traversal checks included.
    fn castle_moves<S: SideTrait>(&mut self, wing: CastleSide) {
        let us = S::side();
        let right = super::castle_rights::CastleRights::of(us, wing);
        if !self.board.can_castle(right) {
            return;
        }
        let idx = right.index();
        if (self.board.castling_path(idx) & self.occ).is_not_empty() {
            return;
        }

        let ksq = self.board.king_sq(us);
        let rfrom = self.board.castling_rook_sq(idx);
        debug_assert_eq!(
            self.board.piece_at(rfrom),
            Piece::make(us, PieceType::Rook)
        );
        let kingside = wing == CastleSide::KingSide;
        let kto = us.relative_sq(if kingside { Sq::G1 } else { Sq::C1 });

        // every square the king crosses, destination included, must be safe
        let step: i8 = if ksq.0 > kto.0 { 1 } else { -1 };
        let mut s = kto;
        while s != ksq {
            if (self.board.attackers_to(s, self.occ) & self.them_occ).is_not_empty() {
                return;
            }
            s = s.offset(step);
        }

        // Chess960: the castling rook may itself shield the king's
        // destination from a slider along the back rank
        if self.board.is_chess960() {
            let occ_without_rook = self.occ ^ rfrom.bb();
            if (rook_moves(occ_without_rook, kto)
                & self
                    .board
                    .piece_two_bb(PieceType::Rook, PieceType::Queen, S::opp_side()))
            .is_not_empty()
            {
                return;
            }
        }

        self.push(Move::make_castle(ksq, rfrom));
    }

    /// Pawn pushes, captures, promotions and en passant for one kind.
    fn pawn_moves<G: KindTrait, S: SideTrait>(&mut self, target: BitBoard) {
        let us = S::side();
        let them = S::opp_side();
        let kind = G::kind();

        let (rank7, rank3, rank8) = if us == Side::White {
            (BitBoard::RANK_7, BitBoard::RANK_3, BitBoard::RANK_8)
        } else {
            (BitBoard::RANK_2, BitBoard::RANK_6, BitBoard::RANK_1)
        };

        let pawns = self.board.piece_bb(us, PieceType::Pawn);
        let pawns_on_7 = pawns & rank7;
        let pawns_not_7 = pawns & !rank7;

        let enemies = match kind {
            GenKind::Evasions => self.them_occ & target,
            GenKind::Captures => target,
            _ => self.them_occ,
        };

        let mut empty = BitBoard::EMPTY;

        // single and double pushes
        if kind != GenKind::Captures {
            empty = if kind == GenKind::Quiets || kind == GenKind::QuietChecks {
                target
            } else {
                !self.occ
            };

            let mut push_one = S::shift_up(pawns_not_7) & empty;
            let mut push_two = S::shift_up(push_one & rank3) & empty;

            if kind == GenKind::Evasions {
                push_one &= target;
                push_two &= target;
            }

            if kind == GenKind::QuietChecks {
                let their_ksq = self.board.king_sq(them);
                push_one &= pawn_attacks_from(their_ksq, them);
                push_two &= pawn_attacks_from(their_ksq, them);

                // a discovered-check pawn push checks from any square as
                // long as it leaves the shared file
                let dc = self.board.discovered_check_candidates();
                if (pawns_not_7 & dc).is_not_empty() {
                    let dc1 = S::shift_up(pawns_not_7 & dc) & empty & !their_ksq.file_bb();
                    let dc2 = S::shift_up(dc1 & rank3) & empty;
                    push_one |= dc1;
                    push_two |= dc2;
                }
            }

            while let Some(to) = push_one.pop_some_lsb() {
                self.push(Move::make(S::down(to), to));
            }
            while let Some(to) = push_two.pop_some_lsb() {
                self.push(Move::make(S::down(S::down(to)), to));
            }
        }

        // promotions, capturing and not
        if pawns_on_7.is_not_empty()
            && (kind != GenKind::Evasions || (target & rank8).is_not_empty())
        {
            let mut promo_empty = empty;
            if kind == GenKind::Captures {
                promo_empty = !self.occ;
            } else if kind == GenKind::Evasions {
                promo_empty &= target;
            }

            let their_ksq = self.board.king_sq(them);
            let mut quiet_promo = S::shift_up(pawns_on_7) & promo_empty;
            let mut right_promo = S::shift_up_right(pawns_on_7) & enemies;
            let mut left_promo = S::shift_up_left(pawns_on_7) & enemies;

            while let Some(to) = quiet_promo.pop_some_lsb() {
                self.push_promotions::<G>(S::down(to), to, their_ksq);
            }
            while let Some(to) = right_promo.pop_some_lsb() {
                self.push_promotions::<G>(S::down_left(to), to, their_ksq);
            }
            while let Some(to) = left_promo.pop_some_lsb() {
                self.push_promotions::<G>(S::down_right(to), to, their_ksq);
            }
        }

        // ordinary captures and en passant
        if kind == GenKind::Captures || kind == GenKind::Evasions || kind == GenKind::NonEvasions {
            let mut left_cap = S::shift_up_left(pawns_not_7) & enemies;
            let mut right_cap = S::shift_up_right(pawns_not_7) & enemies;

            while let Some(to) = left_cap.pop_some_lsb() {
                self.push(Move::make(S::down_right(to), to));
            }
            while let Some(to) = right_cap.pop_some_lsb() {
                self.push(Move::make(S::down_left(to), to));
            }

            let ep = self.board.ep_square();
            if ep != Sq::NONE {
                debug_assert_eq!(us.relative_rank_of(ep), crate::core::Rank::R6);

                // an en-passant capture only evades check when the checker
                // is the double-pushed pawn itself
                if kind != GenKind::Evasions || target.contains(S::down(ep)) {
                    let mut capturers = pawns_not_7 & pawn_attacks_from(ep, them);
                    while let Some(from) = capturers.pop_some_lsb() {
                        self.push(Move::make_en_passant(from, ep));
                    }
                }
            }
        }
    }

    /// Emits the promotion set a kind asks for on one destination square.
    #[inline]
    fn push_promotions<G: KindTrait>(&mut self, from: Sq, to: Sq, their_ksq: Sq) {
        let kind = G::kind();
        if kind == GenKind::Captures || kind == GenKind::Evasions || kind == GenKind::NonEvasions {
            self.push(Move::make_promotion(from, to, PieceType::Queen));
        }
        if kind == GenKind::Quiets || kind == GenKind::Evasions || kind == GenKind::NonEvasions {
            self.push(Move::make_promotion(from, to, PieceType::Rook));
            self.push(Move::make_promotion(from, to, PieceType::Bishop));
            self.push(Move::make_promotion(from, to, PieceType::Knight));
        } else if kind == GenKind::QuietChecks
            && (knight_moves(to) & their_ksq.bb()).is_not_empty()
        {
            self.push(Move::make_promotion(from, to, PieceType::Knight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::START_FEN;

    #[test]
    fn start_pos_counts() {
        let board = Board::start_pos();
        assert_eq!(MoveGen::generate(&board, GenKind::Legal).len(), 20);
        assert_eq!(MoveGen::generate(&board, GenKind::Captures).len(), 0);
        assert_eq!(MoveGen::generate(&board, GenKind::Quiets).len(), 20);
        assert_eq!(MoveGen::generate(&board, GenKind::NonEvasions).len(), 20);
    }

    #[test]
    fn legal_subset_of_pseudo() {
        let board = Board::from_fen(START_FEN).unwrap();
        let legal = MoveGen::generate(&board, GenKind::Legal);
        let pseudo = MoveGen::generate(&board, GenKind::NonEvasions);
        assert!(legal.len() <= pseudo.len());
        for mv in &legal {
            assert!(pseudo.contains(*mv));
        }
    }

    #[test]
    fn evasions_when_checked() {
        // white king on e1 checked by a rook on e8
        let board = Board::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.in_check());
        let evasions = MoveGen::generate(&board, GenKind::Legal);
        for mv in &evasions {
            assert!(board.legal_move(*mv));
        }
        // king must leave the e-file entirely
        assert!(evasions.iter().all(|m| m.to().file_idx() != 4));
    }

    #[test]
    fn double_check_only_king_moves() {
        // knight on f6 and rook on e8 both check the e1 king? use a clean
        // double check: rook e8 + bishop h4 against ke1
        let board = Board::from_fen("4r2k/8/8/8/7b/8/8/4K3 w - - 0 1").unwrap();
        if board.checkers().more_than_one() {
            let moves = MoveGen::generate(&board, GenKind::Legal);
            for mv in &moves {
                assert_eq!(mv.from(), board.king_sq(Side::White));
            }
        }
    }

    #[test]
    fn quiet_checks_give_check() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let checks = MoveGen::generate(&board, GenKind::QuietChecks);
        // no quiet check exists from the start position
        assert!(checks.is_empty());

        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let checks = MoveGen::generate(&board, GenKind::QuietChecks);
        assert!(!checks.is_empty());
        for mv in &checks {
            assert!(board.gives_check(*mv));
        }
    }
}
