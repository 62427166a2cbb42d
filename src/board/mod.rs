//! The [`Board`]: piece placement, derived state, and every operation that
//! mutates or queries a position.
//!
//! A `Board` owns its bitboards, the mailbox with its per-piece square
//! lists, and a stack of [`State`] snapshots chained through `prev` links.
//! Applying a move pushes a snapshot; undoing pops it, which restores the
//! position byte for byte without recomputation.
//!
//! Castling is handled internally as *king captures own rook* so that
//! standard chess and Chess960 share one code path; see
//! [`core::piece_move`] for the encoding.
//!
//! [`Board`]: struct.Board.html
//! [`State`]: state/struct.State.html
//! [`core::piece_move`]: ../core/piece_move/index.html

pub mod castle_rights;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod piece_locations;
pub mod state;

use self::castle_rights::{CastleRights, ALL_CASTLE_BITS};
use self::fen::{FenError, START_FEN};
use self::movegen::MoveGen;
use self::piece_locations::PieceLocations;
use self::state::State;

use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::move_list::MoveList;
use crate::core::piece_move::{Move, MoveKind};
use crate::core::sq::Sq;
use crate::core::{CastleSide, GenKind, Piece, PieceType, Rank, Side, ALL_PIECE_TYPES};
use crate::helper::prelude::*;
use crate::tools::prng::Prng;

use std::fmt;
use std::sync::Arc;

/// Callback invoked after every piece placement, removal or relocation,
/// with the piece involved and the square it was put on or taken from.
pub type PieceHook = fn(Piece, Sq);

/// A full chess position.
///
/// # Examples
///
/// ```
/// use rookery::Board;
///
/// let mut board = Board::start_pos();
/// let moves = board.generate_moves();
/// board.apply_move(moves[0]);
/// board.undo_move();
/// assert_eq!(board.fen(), Board::start_pos().fen());
/// ```
pub struct Board {
    turn: Side,
    piece_bbs: [[BitBoard; PIECE_TYPE_CNT]; SIDE_CNT],
    type_bbs: [BitBoard; PIECE_TYPE_CNT],
    side_bbs: [BitBoard; SIDE_CNT],
    pieces: PieceLocations,
    half_moves: u16,
    depth: u16,
    chess960: bool,
    castling_mask: [u8; SQ_CNT],
    castling_rook: [Sq; CASTLE_RIGHT_CNT],
    castling_path: [BitBoard; CASTLE_RIGHT_CNT],
    state: Arc<State>,
    piece_hook: Option<PieceHook>,
    probing: bool,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board[{}]", self.fen())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.turn == other.turn
            && self.occupied() == other.occupied()
            && self.pieces == other.pieces
            && *self.state == *other.state
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        self.shallow_clone()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::start_pos()
    }
}

// construction

impl Board {
    /// An entirely empty board: no pieces, White to move, no rights.
    fn blank() -> Board {
        init_statics();
        Board {
            turn: Side::White,
            piece_bbs: [[BitBoard::EMPTY; PIECE_TYPE_CNT]; SIDE_CNT],
            type_bbs: [BitBoard::EMPTY; PIECE_TYPE_CNT],
            side_bbs: [BitBoard::EMPTY; SIDE_CNT],
            pieces: PieceLocations::blank(),
            half_moves: 0,
            depth: 0,
            chess960: false,
            castling_mask: [0; SQ_CNT],
            castling_rook: [Sq::NONE; CASTLE_RIGHT_CNT],
            castling_path: [BitBoard::EMPTY; CASTLE_RIGHT_CNT],
            state: Arc::new(State::blank()),
            piece_hook: None,
            probing: false,
        }
    }

    /// The standard starting position.
    pub fn start_pos() -> Board {
        Board::from_fen(START_FEN).expect("the start position FEN parses")
    }

    /// Builds a board from a FEN string. The Chess960 flag turns on by
    /// itself when the castling field uses rook-file letters or the castling
    /// geometry is nonstandard; use [`Board::from_fen_960`] to force it.
    ///
    /// On error nothing is constructed and the error names the offending
    /// field.
    ///
    /// ```
    /// use rookery::Board;
    ///
    /// let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    /// assert_eq!(board.count_all_pieces(), 32);
    /// ```
    ///
    /// [`Board::from_fen_960`]: struct.Board.html#method.from_fen_960
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        Board::build_from_fen(fen, false)
    }

    /// Builds a board from a FEN string with Chess960 castling rules forced
    /// on, whatever the castling field looks like.
    pub fn from_fen_960(fen: &str) -> Result<Board, FenError> {
        Board::build_from_fen(fen, true)
    }

    /// Resets this board to empty. Call before retrying a rejected FEN.
    pub fn clear(&mut self) {
        let hook = self.piece_hook;
        *self = Board::blank();
        self.piece_hook = hook;
    }

    /// Replaces this board with the position in `fen`. The board is left
    /// untouched when parsing fails.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let mut parsed = Board::build_from_fen(fen, self.chess960)?;
        parsed.piece_hook = self.piece_hook;
        parsed.probing = self.probing;
        *self = parsed;
        Ok(())
    }

    fn build_from_fen(fen: &str, force_960: bool) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingField(fields.len()));
        }
        if fields.len() > 6 {
            return Err(FenError::TooLong);
        }

        let mut board = Board::blank();

        // 1: piece placement, rank 8 first
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenError::InvalidPieceLayout { rank: rank_idx, ch });
                    }
                    file += skip as usize;
                    if file > 8 {
                        return Err(FenError::FileOverflow { rank: rank_idx });
                    }
                } else {
                    if file >= 8 {
                        return Err(FenError::FileOverflow { rank: rank_idx });
                    }
                    let side = if ch.is_ascii_uppercase() {
                        Side::White
                    } else {
                        Side::Black
                    };
                    let pt = match ch.to_ascii_lowercase() {
                        'p' => PieceType::Pawn,
                        'n' => PieceType::Knight,
                        'b' => PieceType::Bishop,
                        'r' => PieceType::Rook,
                        'q' => PieceType::Queen,
                        'k' => PieceType::King,
                        _ => return Err(FenError::InvalidPieceLayout { rank: rank_idx, ch }),
                    };
                    board.put_piece(Piece::make(side, pt), Sq((rank * 8 + file) as u8));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPieceLayout {
                    rank: rank_idx,
                    ch: '/',
                });
            }
        }

        // 2: side to move
        board.turn = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(FenError::BadSide(other.to_string())),
        };

        // the castling and check bookkeeping below need the kings placed
        for side in [Side::White, Side::Black] {
            if board.count_piece(side, PieceType::King) != 1 {
                return Err(FenError::IllegalPosition("each side needs exactly one king"));
            }
        }

        // 3: castling availability
        let mut rights = CastleRights::empty();
        let mut shredder = false;
        for ch in fields[2].chars() {
            let (side, rook) = match ch {
                '-' => continue,
                'K' => (Side::White, board.outer_rook(Side::White, true)),
                'Q' => (Side::White, board.outer_rook(Side::White, false)),
                'k' => (Side::Black, board.outer_rook(Side::Black, true)),
                'q' => (Side::Black, board.outer_rook(Side::Black, false)),
                'A'..='H' => {
                    shredder = true;
                    let file = ch as u8 - b'A';
                    (Side::White, board.rook_on_file(Side::White, file))
                }
                'a'..='h' => {
                    shredder = true;
                    let file = ch as u8 - b'a';
                    (Side::Black, board.rook_on_file(Side::Black, file))
                }
                _ => return Err(FenError::BadCastling(ch)),
            };
            let rook = rook.ok_or(FenError::MissingCastleRook(ch))?;
            rights |= board.set_castling_right(side, rook);
        }

        // 4: en passant; kept only when a capture is actually available
        let mut ep = Sq::NONE;
        if fields[3] != "-" {
            let bytes = fields[3].as_bytes();
            if bytes.len() != 2
                || !(b'a'..=b'h').contains(&bytes[0])
                || !(b'1'..=b'8').contains(&bytes[1])
            {
                return Err(FenError::BadEnPassant(fields[3].to_string()));
            }
            let sq = Sq((bytes[1] - b'1') * 8 + (bytes[0] - b'a'));
            if board.ep_usable(sq) {
                ep = sq;
            }
        }

        // 5 and 6: halfmove clock and fullmove number
        let rule50: i16 = if fields.len() > 4 {
            fields[4].parse().map_err(|_| FenError::BadCounter(4))?
        } else {
            0
        };
        if rule50 < 0 {
            return Err(FenError::BadCounter(4));
        }
        let fullmove: u16 = if fields.len() > 5 {
            fields[5].parse().map_err(|_| FenError::BadCounter(5))?
        } else {
            1
        };
        if fullmove == 0 {
            return Err(FenError::BadCounter(5));
        }
        board.half_moves = (fullmove - 1) * 2 + (board.turn == Side::Black) as u16;

        board.chess960 = force_960 || shredder || board.nonstandard_castling(rights);

        // derived state
        let mut st = State::blank();
        st.castling = rights;
        st.rule50 = rule50;
        st.ep_square = ep;
        board.fill_startup_state(&mut st);
        board.state = Arc::new(st);

        if let Err(err) = fen::validate_board(&board) {
            log::debug!("rejected FEN '{}': {}", fen, err);
            return Err(err);
        }
        Ok(board)
    }

    /// Whether an en-passant capture on `sq` is genuinely available for the
    /// side to move. Spurious ep squares are dropped so transpositions hash
    /// identically.
    fn ep_usable(&self, sq: Sq) -> bool {
        let us = self.turn;
        let them = !us;
        us.relative_rank_of(sq) == Rank::R6
            && (pawn_attacks_from(sq, them) & self.piece_bb(us, PieceType::Pawn)).is_not_empty()
            && self
                .piece_bb(them, PieceType::Pawn)
                .contains(sq.offset(them.pawn_push()))
            && (self.occupied() & (sq.bb() | sq.offset(us.pawn_push()).bb())).is_empty()
    }

    /// The outermost rook of `side` on the castling wing, scanning from the
    /// board edge toward the king.
    fn outer_rook(&self, side: Side, kingside: bool) -> Option<Sq> {
        let king = self.king_sq(side);
        let back_rank = side.relative_rank(Rank::R1);
        if king.rank() != back_rank {
            return None;
        }
        let rook = Piece::make(side, PieceType::Rook);
        let base = (back_rank as u8) * 8;
        if kingside {
            for f in ((king.file_idx() + 1)..8).rev() {
                if self.piece_at(Sq(base + f)) == rook {
                    return Some(Sq(base + f));
                }
            }
        } else {
            for f in 0..king.file_idx() {
                if self.piece_at(Sq(base + f)) == rook {
                    return Some(Sq(base + f));
                }
            }
        }
        None
    }

    /// The rook of `side` on the named back-rank file, for shredder-style
    /// castling fields.
    fn rook_on_file(&self, side: Side, file: u8) -> Option<Sq> {
        let back_rank = side.relative_rank(Rank::R1);
        let sq = Sq((back_rank as u8) * 8 + file);
        if self.piece_at(sq) == Piece::make(side, PieceType::Rook) {
            Some(sq)
        } else {
            None
        }
    }

    /// Whether any granted right departs from the standard king-on-e-file,
    /// rook-in-the-corner layout.
    fn nonstandard_castling(&self, rights: CastleRights) -> bool {
        for right in ALL_CASTLE_BITS {
            if !rights.has(right) {
                continue;
            }
            let idx = right.index();
            let side = if idx < 2 { Side::White } else { Side::Black };
            let kingside = idx % 2 == 0;
            let king_home = side.relative_sq(Sq::E1);
            let rook_home = side.relative_sq(if kingside { Sq::H1 } else { Sq::A1 });
            if self.king_sq(side) != king_home || self.castling_rook[idx] != rook_home {
                return true;
            }
        }
        false
    }

    /// Registers one castling right: rook/path tables plus the per-square
    /// rights masks used for incremental updates.
    fn set_castling_right(&mut self, side: Side, rook_from: Sq) -> CastleRights {
        let king_from = self.king_sq(side);
        let kingside = rook_from > king_from;
        let right = CastleRights::of(
            side,
            if kingside {
                CastleSide::KingSide
            } else {
                CastleSide::QueenSide
            },
        );
        let idx = right.index();
        let king_to = side.relative_sq(if kingside { Sq::G1 } else { Sq::C1 });
        let rook_to = side.relative_sq(if kingside { Sq::F1 } else { Sq::D1 });

        self.castling_mask[king_from.0 as usize] |= right.bits();
        self.castling_mask[rook_from.0 as usize] |= right.bits();
        self.castling_rook[idx] = rook_from;
        self.castling_path[idx] = (between_bb(king_from, king_to)
            | between_bb(rook_from, rook_to)
            | king_to.bb()
            | rook_to.bb())
            & !(king_from.bb() | rook_from.bb());
        right
    }

    /// Computes every key and check datum of a freshly set-up position.
    fn fill_startup_state(&self, st: &mut State) {
        let mut key = 0u64;
        let mut pawn_key = z_no_pawns();
        for sq in self.occupied() {
            let piece = self.piece_at(sq);
            let z = z_square(sq, piece);
            key ^= z;
            if piece.type_of() == PieceType::Pawn {
                pawn_key ^= z;
            }
        }
        if st.ep_square != Sq::NONE {
            key ^= z_ep(st.ep_square);
        }
        key ^= z_castle(st.castling.bits());
        if self.turn == Side::Black {
            key ^= z_side();
        }

        let mut material_key = 0u64;
        let mut npm = [0i32; SIDE_CNT];
        for side in [Side::White, Side::Black] {
            for pt in ALL_PIECE_TYPES {
                let piece = Piece::make(side, pt);
                let count = self.pieces.count_of(piece);
                for c in 0..count {
                    material_key ^= z_material(piece, c);
                }
                if pt != PieceType::Pawn && pt != PieceType::King {
                    npm[side as usize] += i32::from(count) * pt.value();
                }
            }
        }

        st.key = key;
        st.pawn_key = pawn_key;
        st.material_key = material_key;
        st.non_pawn_material = npm;
        st.checkers =
            self.attackers_to(self.king_sq(self.turn), self.occupied()) & self.side_bb(!self.turn);
        self.set_check_info(st);
        st.repetition = 0;
    }

    /// A clone sharing the state chain, with its undo depth reset. The
    /// clone cannot undo past the point it was created at.
    pub fn shallow_clone(&self) -> Board {
        Board {
            turn: self.turn,
            piece_bbs: self.piece_bbs,
            type_bbs: self.type_bbs,
            side_bbs: self.side_bbs,
            pieces: self.pieces.clone(),
            half_moves: self.half_moves,
            depth: 0,
            chess960: self.chess960,
            castling_mask: self.castling_mask,
            castling_rook: self.castling_rook,
            castling_path: self.castling_path,
            state: Arc::clone(&self.state),
            piece_hook: self.piece_hook,
            probing: self.probing,
        }
    }

    /// A clone sharing the state chain and keeping the undo depth, for
    /// searching split points in parallel.
    pub fn parallel_clone(&self) -> Board {
        let mut clone = self.shallow_clone();
        clone.depth = self.depth;
        clone
    }

    /// Builder for pseudo-random reachable positions; see [`RandBoard`].
    ///
    /// [`RandBoard`]: struct.RandBoard.html
    pub fn random() -> RandBoard {
        RandBoard::default()
    }
}

// make / unmake

impl Board {
    /// Applies a legal move, computing whether it gives check.
    ///
    /// The move must come from the generator (or have passed
    /// [`Board::pseudo_legal_move`] and [`Board::legal_move`]); applying
    /// anything else leaves the board in an undefined state, with debug
    /// assertions as the only guard.
    ///
    /// [`Board::pseudo_legal_move`]: struct.Board.html#method.pseudo_legal_move
    /// [`Board::legal_move`]: struct.Board.html#method.legal_move
    pub fn apply_move(&mut self, mv: Move) {
        let gives_check = self.gives_check(mv);
        self.apply_unknown_move(mv, gives_check);
    }

    /// Applies a legal move with `gives_check` supplied by the caller, for
    /// search loops that already know it. A wrong `gives_check` corrupts
    /// the checkers bitboard.
    pub fn apply_unknown_move(&mut self, mv: Move, gives_check: bool) {
        debug_assert!(!mv.is_null());
        debug_assert!(mv.is_ok());

        let mut next = State::next(&self.state);
        self.half_moves += 1;
        self.depth += 1;
        next.rule50 += 1;
        next.plies_from_null += 1;
        next.last_move = mv;

        let us = self.turn;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        let piece = self.piece_at(from);
        let pt = piece.type_of();
        // where the moved piece actually lands; differs from `to` only for
        // castling
        let mut dest = to;

        debug_assert!(!piece.is_empty());
        debug_assert_eq!(piece.side_of(), us);

        let captured = if mv.is_en_passant() {
            PieceType::Pawn
        } else if mv.is_castle() {
            PieceType::None
        } else {
            self.piece_at(to).type_of()
        };
        debug_assert_ne!(captured, PieceType::King);

        let mut key = self.state.key ^ z_side();

        if mv.is_castle() {
            debug_assert_eq!(pt, PieceType::King);
            debug_assert_eq!(self.piece_at(to), Piece::make(us, PieceType::Rook));
            let rook = Piece::make(us, PieceType::Rook);
            let (king_to, rook_to) = self.do_castle::<true>(us, from, to);
            key ^= z_square(to, rook) ^ z_square(rook_to, rook);
            dest = king_to;
        } else if captured != PieceType::None {
            let mut cap_sq = to;
            let cap_piece = Piece::make(them, captured);
            if captured == PieceType::Pawn {
                if mv.is_en_passant() {
                    cap_sq = to.offset(-us.pawn_push());
                    debug_assert_eq!(pt, PieceType::Pawn);
                    debug_assert_eq!(to, self.state.ep_square);
                    debug_assert_eq!(us.relative_rank_of(to), Rank::R6);
                    debug_assert!(self.piece_at(to).is_empty());
                    debug_assert_eq!(self.piece_at(cap_sq), cap_piece);
                }
                next.pawn_key ^= z_square(cap_sq, cap_piece);
            } else {
                next.non_pawn_material[them as usize] -= captured.value();
            }
            self.take_piece(cap_piece, cap_sq);
            key ^= z_square(cap_sq, cap_piece);
            next.material_key ^= z_material(cap_piece, self.pieces.count_of(cap_piece));
            next.rule50 = 0;
        }

        // the mover leaves `from` and lands on `dest`
        key ^= z_square(from, piece) ^ z_square(dest, piece);

        // a stale en-passant square dies with any move
        if self.state.ep_square != Sq::NONE {
            key ^= z_ep(self.state.ep_square);
            next.ep_square = Sq::NONE;
        }

        // castle rights touched by either endpoint
        let rights_touched =
            self.castling_mask[from.0 as usize] | self.castling_mask[to.0 as usize];
        if rights_touched & next.castling.bits() != 0 {
            let removed = next.castling.strip(rights_touched);
            key ^= z_castle(removed);
        }

        if !mv.is_castle() {
            self.shift_piece(piece, from, to);
        }

        if pt == PieceType::Pawn {
            if (to.0 ^ from.0) == 16 {
                // double push: the ep square only materializes when an
                // enemy pawn can take it, keeping keys transposition-stable
                let ep_sq = Sq((to.0 + from.0) / 2);
                if (pawn_attacks_from(ep_sq, us) & self.piece_bb(them, PieceType::Pawn))
                    .is_not_empty()
                {
                    next.ep_square = ep_sq;
                    key ^= z_ep(ep_sq);
                }
            } else if mv.is_promotion() {
                let promo = Piece::make(us, mv.promo_type());
                debug_assert_eq!(us.relative_rank_of(to), Rank::R8);
                self.take_piece(piece, dest);
                self.put_piece(promo, dest);
                key ^= z_square(dest, piece) ^ z_square(dest, promo);
                next.pawn_key ^= z_square(dest, piece);
                next.material_key ^= z_material(promo, self.pieces.count_of(promo) - 1)
                    ^ z_material(piece, self.pieces.count_of(piece));
                next.non_pawn_material[us as usize] += mv.promo_type().value();
            }
            next.pawn_key ^= z_square(from, piece) ^ z_square(dest, piece);
            next.rule50 = 0;
        }

        next.captured = captured;
        next.key = key;
        next.checkers = if gives_check {
            self.attackers_to(self.king_sq(them), self.occupied()) & self.side_bb(us)
        } else {
            BitBoard::EMPTY
        };

        self.turn = them;
        self.set_check_info(&mut next);
        next.update_repetition();
        self.state = Arc::new(next);

        debug_assert!(self.sanity_ok());
    }

    /// Undoes the most recent real move.
    ///
    /// # Panics
    ///
    /// Panics when no previous state exists (undoing past the root or a
    /// clone point) or when the last move was a null move.
    pub fn undo_move(&mut self) {
        assert!(self.state.prev.is_some(), "no move to undo");
        let mv = self.state.last_move;
        assert!(!mv.is_null(), "undo_move after a null move");

        self.turn = !self.turn;
        let us = self.turn;
        let from = mv.from();
        let to = mv.to();

        if mv.is_promotion() {
            let promo = self.piece_at(to);
            debug_assert_eq!(promo.type_of(), mv.promo_type());
            self.take_piece(promo, to);
            self.put_piece(Piece::make(us, PieceType::Pawn), to);
        }

        if mv.is_castle() {
            self.do_castle::<false>(us, from, to);
        } else {
            let piece = self.piece_at(to);
            self.shift_piece(piece, to, from);
            let captured = self.state.captured;
            if captured != PieceType::None {
                let cap_sq = if mv.is_en_passant() {
                    to.offset(-us.pawn_push())
                } else {
                    to
                };
                self.put_piece(Piece::make(!us, captured), cap_sq);
            }
        }

        self.state = self.state.prev.as_ref().map(Arc::clone).unwrap();
        self.half_moves -= 1;
        self.depth -= 1;

        debug_assert!(self.sanity_ok());
    }

    /// Passes the turn without moving. The fifty-move clock keeps running
    /// and the repetition window resets.
    ///
    /// # Panics
    ///
    /// Panics when the side to move is in check; a null move has no meaning
    /// there.
    pub fn apply_null_move(&mut self) {
        assert!(self.checkers().is_empty(), "null move while in check");

        let mut next = State::next(&self.state);
        self.depth += 1;
        next.rule50 += 1;
        next.plies_from_null = 0;
        next.last_move = Move::null();

        let mut key = self.state.key ^ z_side();
        if self.state.ep_square != Sq::NONE {
            key ^= z_ep(self.state.ep_square);
            next.ep_square = Sq::NONE;
        }
        next.key = key;

        self.turn = !self.turn;
        self.set_check_info(&mut next);
        next.repetition = 0;
        self.state = Arc::new(next);
    }

    /// Undoes a null move.
    ///
    /// # Panics
    ///
    /// Panics when the last applied move was a real move.
    pub fn undo_null_move(&mut self) {
        assert!(self.state.last_move.is_null(), "last move was not null");
        assert!(self.state.prev.is_some(), "no null move to undo");
        self.turn = !self.turn;
        self.state = self.state.prev.as_ref().map(Arc::clone).unwrap();
        self.depth -= 1;
    }

    /// Finds the legal move matching a UCI string and applies it. Returns
    /// whether one was found; the board is untouched otherwise.
    pub fn apply_uci_move(&mut self, uci: &str) -> bool {
        let moves = self.generate_moves();
        let found = moves.iter().find(|m| self.uci_string(**m) == uci).copied();
        if let Some(mv) = found {
            self.apply_move(mv);
            return true;
        }
        false
    }

    /// Moves king and rook to their castled squares (`APPLY`) or back.
    /// Both pieces come off the board before either lands, which is what
    /// makes Chess960 overlaps (king castling onto the rook's square or
    /// vice versa) safe.
    fn do_castle<const APPLY: bool>(&mut self, us: Side, king_from: Sq, rook_from: Sq) -> (Sq, Sq) {
        let kingside = rook_from > king_from;
        let king_to = us.relative_sq(if kingside { Sq::G1 } else { Sq::C1 });
        let rook_to = us.relative_sq(if kingside { Sq::F1 } else { Sq::D1 });
        let king = Piece::make(us, PieceType::King);
        let rook = Piece::make(us, PieceType::Rook);

        if APPLY {
            self.take_piece(king, king_from);
            self.take_piece(rook, rook_from);
            self.put_piece(king, king_to);
            self.put_piece(rook, rook_to);
        } else {
            self.take_piece(king, king_to);
            self.take_piece(rook, rook_to);
            self.put_piece(king, king_from);
            self.put_piece(rook, rook_from);
        }
        (king_to, rook_to)
    }

    // board-array primitives

    fn put_piece(&mut self, piece: Piece, sq: Sq) {
        let bb = sq.bb();
        self.type_bbs[piece.type_of() as usize] |= bb;
        self.type_bbs[PieceType::All as usize] |= bb;
        self.side_bbs[piece.side_of() as usize] |= bb;
        self.piece_bbs[piece.side_of() as usize][piece.type_of() as usize] |= bb;
        self.pieces.place(sq, piece);
        self.run_hook(piece, sq);
    }

    fn take_piece(&mut self, piece: Piece, sq: Sq) {
        debug_assert_eq!(self.piece_at(sq), piece);
        let bb = sq.bb();
        self.type_bbs[piece.type_of() as usize] ^= bb;
        self.type_bbs[PieceType::All as usize] ^= bb;
        self.side_bbs[piece.side_of() as usize] ^= bb;
        self.piece_bbs[piece.side_of() as usize][piece.type_of() as usize] ^= bb;
        self.pieces.remove(sq);
        self.run_hook(piece, sq);
    }

    fn shift_piece(&mut self, piece: Piece, from: Sq, to: Sq) {
        debug_assert_ne!(from, to);
        debug_assert_eq!(self.piece_at(from), piece);
        debug_assert!(self.piece_at(to).is_empty());
        let both = from.bb() | to.bb();
        self.type_bbs[piece.type_of() as usize] ^= both;
        self.type_bbs[PieceType::All as usize] ^= both;
        self.side_bbs[piece.side_of() as usize] ^= both;
        self.piece_bbs[piece.side_of() as usize][piece.type_of() as usize] ^= both;
        self.pieces.relocate(from, to);
        self.run_hook(piece, to);
    }

    #[inline]
    fn run_hook(&self, piece: Piece, sq: Sq) {
        if let Some(hook) = self.piece_hook {
            if !self.probing {
                hook(piece, sq);
            }
        }
    }

    /// Installs a callback fired on every piece placement, removal or
    /// relocation. Pass `None` to remove it.
    pub fn set_piece_hook(&mut self, hook: Option<PieceHook>) {
        self.piece_hook = hook;
    }

    /// While probing mode is on, the piece hook stays silent; used when
    /// speculatively walking lines a UI should not render.
    pub fn set_probing(&mut self, probing: bool) {
        self.probing = probing;
    }

    /// Recomputes blockers, pinners and per-piece checking squares for the
    /// new side to move.
    fn set_check_info(&self, st: &mut State) {
        let mut pinners_by_black = BitBoard::EMPTY;
        st.blockers[Side::White as usize] = self.slider_blockers(
            self.side_bb(Side::Black),
            self.king_sq(Side::White),
            &mut pinners_by_black,
        );
        st.pinners[Side::Black as usize] = pinners_by_black;

        let mut pinners_by_white = BitBoard::EMPTY;
        st.blockers[Side::Black as usize] = self.slider_blockers(
            self.side_bb(Side::White),
            self.king_sq(Side::Black),
            &mut pinners_by_white,
        );
        st.pinners[Side::White as usize] = pinners_by_white;

        let their_ksq = self.king_sq(!self.turn);
        let occ = self.occupied();
        st.check_squares[PieceType::Pawn as usize] = pawn_attacks_from(their_ksq, !self.turn);
        st.check_squares[PieceType::Knight as usize] = knight_moves(their_ksq);
        st.check_squares[PieceType::Bishop as usize] = bishop_moves(occ, their_ksq);
        st.check_squares[PieceType::Rook as usize] = rook_moves(occ, their_ksq);
        st.check_squares[PieceType::Queen as usize] = st.check_squares
            [PieceType::Bishop as usize]
            | st.check_squares[PieceType::Rook as usize];
        st.check_squares[PieceType::King as usize] = BitBoard::EMPTY;
    }

    /// Pieces standing alone between `sq` and a sniper from `sliders`;
    /// `pinners` collects the snipers whose blocker belongs to `sq`'s owner.
    fn slider_blockers(&self, sliders: BitBoard, sq: Sq, pinners: &mut BitBoard) -> BitBoard {
        let mut blockers = BitBoard::EMPTY;
        *pinners = BitBoard::EMPTY;

        let mut snipers = ((pseudo_attacks(PieceType::Rook, sq)
            & self.piece_two_bb_both_players(PieceType::Rook, PieceType::Queen))
            | (pseudo_attacks(PieceType::Bishop, sq)
                & self.piece_two_bb_both_players(PieceType::Bishop, PieceType::Queen)))
            & sliders;
        // snipers hiding behind snipers must not count as blockers
        let occupancy = self.occupied() ^ snipers;

        let owner = self.piece_at(sq).side_of();
        while let Some(sniper) = snipers.pop_some_lsb() {
            let b = between_bb(sq, sniper) & occupancy;
            if b.is_not_empty() && !b.more_than_one() {
                blockers |= b;
                if (b & self.side_bb(owner)).is_not_empty() {
                    *pinners |= sniper.bb();
                }
            }
        }
        blockers
    }
}

// queries

impl Board {
    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The zobrist key of the position.
    #[inline(always)]
    pub fn key(&self) -> u64 {
        self.state.key
    }

    /// The pawns-only zobrist key.
    #[inline(always)]
    pub fn pawn_key(&self) -> u64 {
        self.state.pawn_key
    }

    /// The material-counts zobrist key.
    #[inline(always)]
    pub fn material_key(&self) -> u64 {
        self.state.material_key
    }

    /// Summed non-pawn material of one side.
    #[inline(always)]
    pub fn non_pawn_material(&self, side: Side) -> i32 {
        self.state.non_pawn_material[side as usize]
    }

    /// Game plies played since the position the fullmove counter started
    /// from.
    #[inline(always)]
    pub fn moves_played(&self) -> u16 {
        self.half_moves
    }

    /// Plies applied since this board was created or last cloned.
    #[inline(always)]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// The halfmove clock of the fifty-move rule.
    #[inline(always)]
    pub fn rule50(&self) -> i16 {
        self.state.rule50
    }

    /// Signed distance to the previous occurrence of this position, zero
    /// when none is in the no-progress window; negative means at least a
    /// threefold.
    #[inline(always)]
    pub fn repetition(&self) -> i16 {
        self.state.repetition
    }

    /// Whether the position is drawn by the fifty-move rule or repetition.
    /// `ply` is the search distance from the root: repetitions strictly
    /// inside the search tree count as draws on their second occurrence.
    pub fn is_draw(&self, ply: i16) -> bool {
        if self.state.rule50 > 99 && (self.checkers().is_empty() || !self.generate_moves().is_empty())
        {
            return true;
        }
        self.state.repetition != 0 && self.state.repetition < ply
    }

    /// The current en-passant square, or `Sq::NONE`.
    #[inline(always)]
    pub fn ep_square(&self) -> Sq {
        self.state.ep_square
    }

    /// Whether this board plays by Chess960 castling rules.
    #[inline(always)]
    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    /// Every occupied square.
    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.type_bbs[PieceType::All as usize]
    }

    /// The squares occupied by one side.
    #[inline(always)]
    pub fn side_bb(&self, side: Side) -> BitBoard {
        self.side_bbs[side as usize]
    }

    /// The squares of one side's pieces of one type.
    #[inline(always)]
    pub fn piece_bb(&self, side: Side, pt: PieceType) -> BitBoard {
        self.piece_bbs[side as usize][pt as usize]
    }

    /// The squares of both sides' pieces of one type.
    #[inline(always)]
    pub fn piece_bb_both_players(&self, pt: PieceType) -> BitBoard {
        self.type_bbs[pt as usize]
    }

    /// Union of two piece types for one side.
    #[inline(always)]
    pub fn piece_two_bb(&self, pt1: PieceType, pt2: PieceType, side: Side) -> BitBoard {
        self.piece_bb(side, pt1) | self.piece_bb(side, pt2)
    }

    /// Union of two piece types over both sides.
    #[inline(always)]
    pub fn piece_two_bb_both_players(&self, pt1: PieceType, pt2: PieceType) -> BitBoard {
        self.type_bbs[pt1 as usize] | self.type_bbs[pt2 as usize]
    }

    /// Rooks and queens of one side.
    #[inline(always)]
    pub fn sliding_piece_bb(&self, side: Side) -> BitBoard {
        self.piece_two_bb(PieceType::Rook, PieceType::Queen, side)
    }

    /// Bishops and queens of one side.
    #[inline(always)]
    pub fn diagonal_piece_bb(&self, side: Side) -> BitBoard {
        self.piece_two_bb(PieceType::Bishop, PieceType::Queen, side)
    }

    /// Number of pieces of one type one side owns.
    #[inline(always)]
    pub fn count_piece(&self, side: Side, pt: PieceType) -> u8 {
        self.pieces.count_of(Piece::make(side, pt))
    }

    /// Number of pieces on the whole board.
    #[inline]
    pub fn count_all_pieces(&self) -> u8 {
        self.occupied().count_bits()
    }

    /// The piece on a square, `Piece::Empty` when vacant.
    #[inline(always)]
    pub fn piece_at(&self, sq: Sq) -> Piece {
        self.pieces.piece_at(sq)
    }

    /// The king square of one side.
    #[inline(always)]
    pub fn king_sq(&self, side: Side) -> Sq {
        self.pieces.first_sq(Piece::make(side, PieceType::King))
    }

    /// Pieces of `side` pinned to their own king.
    #[inline(always)]
    pub fn pinned_pieces(&self, side: Side) -> BitBoard {
        self.state.blockers[side as usize] & self.side_bb(side)
    }

    /// All pieces shielding `side`'s king from a slider, either color.
    #[inline(always)]
    pub fn blockers_for_king(&self, side: Side) -> BitBoard {
        self.state.blockers[side as usize]
    }

    /// Sliders of `side` pinning something against the enemy king.
    #[inline(always)]
    pub fn pinners(&self, side: Side) -> BitBoard {
        self.state.pinners[side as usize]
    }

    /// Squares from which a piece of type `pt` would check the enemy king.
    #[inline(always)]
    pub fn check_squares(&self, pt: PieceType) -> BitBoard {
        self.state.check_squares[pt as usize]
    }

    /// Pieces of the side to move whose movement would reveal check.
    #[inline(always)]
    pub fn discovered_check_candidates(&self) -> BitBoard {
        self.state.blockers[!self.turn as usize] & self.side_bb(self.turn)
    }

    /// Whether the side to move is in check.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.state.checkers.is_not_empty()
    }

    /// Pieces currently giving check.
    #[inline(always)]
    pub fn checkers(&self) -> BitBoard {
        self.state.checkers
    }

    /// Whether the side to move is checkmated. Generates moves; not for hot
    /// paths.
    pub fn checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Whether the side to move is stalemated. Generates moves; not for hot
    /// paths.
    pub fn stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }

    /// Whether any of the given castle rights remain.
    #[inline(always)]
    pub fn can_castle(&self, rights: CastleRights) -> bool {
        self.state.castling.has(rights)
    }

    /// The remaining rights of one player.
    #[inline]
    pub fn player_castle_rights(&self, side: Side) -> CastleRights {
        self.state.castling & CastleRights::side_rights(side)
    }

    /// Squares that must be empty for the right at `idx` to castle.
    #[inline(always)]
    pub fn castling_path(&self, idx: usize) -> BitBoard {
        self.castling_path[idx]
    }

    /// Home square of the rook of the right at `idx`.
    #[inline(always)]
    pub fn castling_rook_sq(&self, idx: usize) -> Sq {
        self.castling_rook[idx]
    }

    /// The last applied move, `None` at the root or after a null move.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        if self.state.last_move.is_null() {
            None
        } else {
            Some(self.state.last_move)
        }
    }

    /// The piece type captured by the last applied move.
    #[inline(always)]
    pub fn piece_last_captured(&self) -> PieceType {
        self.state.captured
    }

    /// Every piece of either color attacking `sq` under the given
    /// occupancy.
    pub fn attackers_to(&self, sq: Sq, occupied: BitBoard) -> BitBoard {
        (pawn_attacks_from(sq, Side::Black) & self.piece_bb(Side::White, PieceType::Pawn))
            | (pawn_attacks_from(sq, Side::White) & self.piece_bb(Side::Black, PieceType::Pawn))
            | (knight_moves(sq) & self.piece_bb_both_players(PieceType::Knight))
            | (rook_moves(occupied, sq)
                & self.piece_two_bb_both_players(PieceType::Rook, PieceType::Queen))
            | (bishop_moves(occupied, sq)
                & self.piece_two_bb_both_players(PieceType::Bishop, PieceType::Queen))
            | (king_moves(sq) & self.piece_bb_both_players(PieceType::King))
    }

    /// Every legal move for the side to move.
    pub fn generate_moves(&self) -> MoveList {
        MoveGen::generate(self, GenKind::Legal)
    }

    /// Moves of one generation kind; see [`GenKind`] for the preconditions.
    ///
    /// [`GenKind`]: ../core/enum.GenKind.html
    pub fn generate_moves_of_kind(&self, kind: GenKind) -> MoveList {
        MoveGen::generate(self, kind)
    }
}

// move predicates

impl Board {
    /// Whether a pseudo-legal move is actually legal: it must not leave or
    /// put its own king in check.
    pub fn legal_move(&self, mv: Move) -> bool {
        if mv.is_null() {
            return false;
        }
        let us = self.turn;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        debug_assert!(!self.piece_at(from).is_empty());
        debug_assert_eq!(self.piece_at(from).side_of(), us);

        if mv.is_en_passant() {
            // redo the occupancy by hand: both pawns gone, capturer landed
            let ksq = self.king_sq(us);
            let cap_sq = to.offset(-us.pawn_push());
            let occ = (self.occupied() ^ from.bb() ^ cap_sq.bb()) | to.bb();
            return (rook_moves(occ, ksq) & self.sliding_piece_bb(them)).is_empty()
                && (bishop_moves(occ, ksq) & self.diagonal_piece_bb(them)).is_empty();
        }

        if mv.is_castle() {
            // path attack safety was enforced at generation; in Chess960 the
            // moving rook itself may have been the king's shield
            return !self.chess960 || (self.blockers_for_king(us) & to.bb()).is_empty();
        }

        if self.piece_at(from).type_of() == PieceType::King {
            // the king must step onto an unattacked square, with itself
            // removed from the occupancy so sliders see through it
            return (self.attackers_to(to, self.occupied() ^ from.bb()) & self.side_bb(them))
                .is_empty();
        }

        // everything else: not pinned, or moving along the pin ray
        (self.blockers_for_king(us) & from.bb()).is_empty()
            || aligned(from, to, self.king_sq(us))
    }

    /// Whether an arbitrary 16-bit move (from a transposition table or
    /// killer slot) could have been produced by the generator for this
    /// position. Combine with [`Board::legal_move`] before applying.
    ///
    /// [`Board::legal_move`]: struct.Board.html#method.legal_move
    pub fn pseudo_legal_move(&self, mv: Move) -> bool {
        if mv.is_null() || !mv.is_ok() {
            return false;
        }
        // the three special kinds carry enough structure that the cleanest
        // total answer is the generator itself
        if mv.kind() != MoveKind::Normal {
            let kind = if self.in_check() {
                GenKind::Evasions
            } else {
                GenKind::NonEvasions
            };
            return MoveGen::generate(self, kind).contains(mv);
        }

        let us = self.turn;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        let piece = self.piece_at(from);

        if piece.is_empty() || piece.side_of() != us {
            return false;
        }
        if self.side_bb(us).contains(to) {
            return false;
        }

        let pt = piece.type_of();
        if pt == PieceType::Pawn {
            // promotions travel as MoveKind::Promotion, never Normal
            if us.relative_rank_of(to) == Rank::R8 {
                return false;
            }
            let push = us.pawn_push();
            let single = from.offset(push);
            let legal_shape = ((pawn_attacks_from(from, us) & self.side_bb(them)).contains(to))
                || (to == single && self.piece_at(to).is_empty())
                || (to == from.offset(2 * push)
                    && us.relative_rank_of(from) == Rank::R2
                    && self.piece_at(to).is_empty()
                    && self.piece_at(single).is_empty());
            if !legal_shape {
                return false;
            }
        } else if !attacks_bb(pt, from, self.occupied()).contains(to) {
            return false;
        }

        // in check, the move must fit what the evasion generator produces
        if self.in_check() {
            if pt != PieceType::King {
                if self.checkers().more_than_one() {
                    return false;
                }
                let checker = self.checkers().lsb_sq();
                if !(between_bb(checker, self.king_sq(us)) | self.checkers()).contains(to) {
                    return false;
                }
            } else {
                // the king may not stay inside a checking slider's ray
                let ksq = self.king_sq(us);
                let mut sliders = self.checkers()
                    & !self.piece_two_bb_both_players(PieceType::Pawn, PieceType::Knight);
                let mut rays = BitBoard::EMPTY;
                while let Some((sq, bit)) = sliders.pop_some_lsb_and_bit() {
                    rays |= line_bb(sq, ksq) ^ bit;
                }
                if rays.contains(to) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether applying `mv` checks the opposing king.
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.turn;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        let their_ksq = self.king_sq(them);

        debug_assert!(!self.piece_at(from).is_empty());
        debug_assert_eq!(self.piece_at(from).side_of(), us);

        // direct check from the destination square
        if self
            .check_squares(self.piece_at(from).type_of())
            .contains(to)
        {
            return true;
        }

        // discovered check: a blocker leaves the king's line
        if self.discovered_check_candidates().contains(from)
            && !aligned(from, to, their_ksq)
        {
            return true;
        }

        match mv.kind() {
            MoveKind::Normal => false,
            MoveKind::Promotion => {
                // does the new piece attack the king through the vacated
                // origin square
                attacks_bb(mv.promo_type(), to, self.occupied() ^ from.bb()).contains(their_ksq)
            }
            MoveKind::EnPassant => {
                // both pawns leave the rank; a slider may now see the king
                let cap_sq = Sq::make(to.file(), from.rank());
                let occ = (self.occupied() ^ from.bb() ^ cap_sq.bb()) | to.bb();
                ((rook_moves(occ, their_ksq) & self.sliding_piece_bb(us))
                    | (bishop_moves(occ, their_ksq) & self.diagonal_piece_bb(us)))
                .is_not_empty()
            }
            MoveKind::Castle => {
                let kingside = to > from;
                let king_to = us.relative_sq(if kingside { Sq::G1 } else { Sq::C1 });
                let rook_to = us.relative_sq(if kingside { Sq::F1 } else { Sq::D1 });
                if !pseudo_attacks(PieceType::Rook, rook_to).contains(their_ksq) {
                    return false;
                }
                let occ = (self.occupied() ^ from.bb() ^ to.bb()) | king_to.bb() | rook_to.bb();
                rook_moves(occ, rook_to).contains(their_ksq)
            }
        }
    }

    /// The piece a move would displace.
    #[inline]
    pub fn moved_piece(&self, mv: Move) -> Piece {
        self.piece_at(mv.from())
    }

    /// The piece type a move would capture, `None` for quiet moves.
    #[inline]
    pub fn captured_piece(&self, mv: Move) -> PieceType {
        if mv.is_en_passant() {
            PieceType::Pawn
        } else if mv.is_castle() {
            PieceType::None
        } else {
            self.piece_at(mv.to()).type_of()
        }
    }

    /// Static exchange evaluation: whether the capture sequence starting
    /// with `mv` nets at least `threshold` material. Special moves resolve
    /// as a plain zero exchange.
    pub fn see_ge(&self, mv: Move, threshold: i32) -> bool {
        if mv.kind() != MoveKind::Normal {
            return 0 >= threshold;
        }
        let from = mv.from();
        let to = mv.to();

        let mut swap = self.piece_at(to).type_of().value() - threshold;
        if swap < 0 {
            return false;
        }
        swap = self.piece_at(from).type_of().value() - swap;
        if swap <= 0 {
            return true;
        }

        let mut occupied = self.occupied() ^ from.bb() ^ to.bb();
        let mut stm = self.piece_at(from).side_of();
        let mut attackers = self.attackers_to(to, occupied);
        let mut res = 1;

        loop {
            stm = !stm;
            attackers &= occupied;

            let mut stm_attackers = attackers & self.side_bb(stm);
            if stm_attackers.is_empty() {
                break;
            }
            // pinned pieces may not take part while their pinner stands
            if (self.pinners(!stm) & occupied).is_not_empty() {
                stm_attackers &= !self.blockers_for_king(stm);
                if stm_attackers.is_empty() {
                    break;
                }
            }
            res ^= 1;

            // capture with the least valuable attacker, refreshing x-rays
            let bb;
            if (stm_attackers & self.piece_bb_both_players(PieceType::Pawn)).is_not_empty() {
                bb = (stm_attackers & self.piece_bb_both_players(PieceType::Pawn)).lsb();
                swap = PieceType::Pawn.value() - swap;
                if swap < res {
                    break;
                }
                occupied ^= bb;
                attackers |= bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::Bishop, PieceType::Queen);
            } else if (stm_attackers & self.piece_bb_both_players(PieceType::Knight)).is_not_empty()
            {
                bb = (stm_attackers & self.piece_bb_both_players(PieceType::Knight)).lsb();
                swap = PieceType::Knight.value() - swap;
                if swap < res {
                    break;
                }
                occupied ^= bb;
            } else if (stm_attackers & self.piece_bb_both_players(PieceType::Bishop)).is_not_empty()
            {
                bb = (stm_attackers & self.piece_bb_both_players(PieceType::Bishop)).lsb();
                swap = PieceType::Bishop.value() - swap;
                if swap < res {
                    break;
                }
                occupied ^= bb;
                attackers |= bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::Bishop, PieceType::Queen);
            } else if (stm_attackers & self.piece_bb_both_players(PieceType::Rook)).is_not_empty() {
                bb = (stm_attackers & self.piece_bb_both_players(PieceType::Rook)).lsb();
                swap = PieceType::Rook.value() - swap;
                if swap < res {
                    break;
                }
                occupied ^= bb;
                attackers |= rook_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::Rook, PieceType::Queen);
            } else if (stm_attackers & self.piece_bb_both_players(PieceType::Queen)).is_not_empty()
            {
                bb = (stm_attackers & self.piece_bb_both_players(PieceType::Queen)).lsb();
                swap = PieceType::Queen.value() - swap;
                if swap < res {
                    break;
                }
                occupied ^= bb;
                attackers |= (bishop_moves(occupied, to)
                    & self.piece_two_bb_both_players(PieceType::Bishop, PieceType::Queen))
                    | (rook_moves(occupied, to)
                        & self.piece_two_bb_both_players(PieceType::Rook, PieceType::Queen));
            } else {
                // only the king is left; it may capture only when the other
                // side has run out of attackers
                return if (attackers & !self.side_bb(stm)).is_not_empty() {
                    res == 0
                } else {
                    res != 0
                };
            }
        }
        res != 0
    }

    /// The UCI text of a move on this board. Standard-chess castling prints
    /// as the king's two-square hop, Chess960 as king-takes-rook.
    pub fn uci_string(&self, mv: Move) -> String {
        if mv.is_null() {
            return "(none)".to_owned();
        }
        if mv.is_castle() && !self.chess960 {
            let us = self.turn;
            let kingside = mv.to() > mv.from();
            let king_to = us.relative_sq(if kingside { Sq::G1 } else { Sq::C1 });
            let mut s = String::with_capacity(4);
            s.push_str(&mv.from().to_string());
            s.push_str(&king_to.to_string());
            return s;
        }
        mv.to_string()
    }
}

// FEN emission and display

impl Board {
    /// The FEN of the current position. Castling uses `KQkq` letters in
    /// standard chess and rook-file letters under Chess960.
    pub fn fen(&self) -> String {
        let mut s = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut blanks = 0;
            for file in 0..8 {
                let piece = self.piece_at(Sq(rank * 8 + file));
                match piece.character() {
                    Some(c) => {
                        if blanks != 0 {
                            s.push(char::from_digit(blanks, 10).unwrap());
                            blanks = 0;
                        }
                        s.push(c);
                    }
                    None => blanks += 1,
                }
            }
            if blanks != 0 {
                s.push(char::from_digit(blanks, 10).unwrap());
            }
            if rank != 0 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(if self.turn == Side::White { 'w' } else { 'b' });
        s.push(' ');

        if self.state.castling.is_empty() {
            s.push('-');
        } else if self.chess960 {
            for (i, right) in ALL_CASTLE_BITS.iter().enumerate() {
                if self.state.castling.has(*right) {
                    let file = FILE_DISPLAYS[self.castling_rook[i].file_idx() as usize];
                    s.push(if i < 2 {
                        file.to_ascii_uppercase()
                    } else {
                        file
                    });
                }
            }
        } else {
            s.push_str(&self.state.castling.fen_string());
        }

        s.push(' ');
        if self.ep_square() == Sq::NONE {
            s.push('-');
        } else {
            s.push_str(&self.ep_square().to_string());
        }

        s.push(' ');
        s.push_str(&self.state.rule50.to_string());
        s.push(' ');
        s.push_str(&(self.half_moves / 2 + 1).to_string());
        s
    }

    /// A printable board grid, rank 8 on top, white pieces uppercase.
    pub fn pretty_string(&self) -> String {
        let mut s = String::with_capacity(SQ_CNT * 2 + 8);
        for &sq in SQ_DISPLAY_ORDER.iter() {
            let piece = self.piece_at(Sq(sq));
            s.push(piece.character().unwrap_or('-'));
            s.push(' ');
            if sq % 8 == 7 {
                s.push('\n');
            }
        }
        s
    }
}

// validation

/// A violated board invariant, found by [`Board::validate`].
///
/// [`Board::validate`]: struct.Board.html#method.validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A side does not have exactly one king.
    KingCount { side: Side, count: u8 },
    /// The two sides' occupancies overlap.
    SideOverlap,
    /// The aggregate occupancy disagrees with the union of the parts.
    OccupancyMismatch,
    /// Two piece-type boards share a square.
    TypeOverlap(PieceType, PieceType),
    /// A mailbox square disagrees with the bitboards.
    MailboxMismatch(Sq),
    /// A piece count differs from its bitboard population.
    CountMismatch(Piece),
    /// The square lists and mailbox disagree.
    ListCorrupt,
    /// The en-passant square is not on the mover's sixth rank.
    BadEpSquare(Sq),
    /// A castle right references a missing rook.
    CastleRookMissing(usize),
    /// The incremental zobrist key differs from a scratch recomputation.
    KeyMismatch { incremental: u64, scratch: u64 },
    /// The incremental pawn key differs from a scratch recomputation.
    PawnKeyMismatch { incremental: u64, scratch: u64 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::KingCount { side, count } => {
                write!(f, "{} has {} kings", side, count)
            }
            BoardError::SideOverlap => write!(f, "side occupancies overlap"),
            BoardError::OccupancyMismatch => write!(f, "occupancy does not match its parts"),
            BoardError::TypeOverlap(a, b) => write!(f, "{} and {} boards overlap", a, b),
            BoardError::MailboxMismatch(sq) => {
                write!(f, "mailbox and bitboards disagree at {}", sq)
            }
            BoardError::CountMismatch(p) => write!(f, "count of {:?} is wrong", p),
            BoardError::ListCorrupt => write!(f, "piece lists are inconsistent"),
            BoardError::BadEpSquare(sq) => write!(f, "bad en-passant square {}", sq),
            BoardError::CastleRookMissing(i) => write!(f, "castle right {} lost its rook", i),
            BoardError::KeyMismatch {
                incremental,
                scratch,
            } => write!(f, "zobrist key {:x} != scratch {:x}", incremental, scratch),
            BoardError::PawnKeyMismatch {
                incremental,
                scratch,
            } => write!(f, "pawn key {:x} != scratch {:x}", incremental, scratch),
        }
    }
}

impl std::error::Error for BoardError {}

impl Board {
    /// Cheap structural checks, used by debug assertions on the make and
    /// unmake paths.
    pub fn sanity_ok(&self) -> bool {
        self.count_piece(Side::White, PieceType::King) == 1
            && self.count_piece(Side::Black, PieceType::King) == 1
            && (self.state.ep_square == Sq::NONE
                || self.turn.relative_rank_of(self.state.ep_square) == Rank::R6)
    }

    /// Full invariant audit: bitboard consistency, mailbox and list
    /// agreement, counts, castle tables and both zobrist keys recomputed
    /// from scratch. Meant for tests and debugging, not hot paths.
    pub fn validate(&self) -> Result<(), BoardError> {
        for side in [Side::White, Side::Black] {
            let kings = self.count_piece(side, PieceType::King);
            if kings != 1 {
                return Err(BoardError::KingCount { side, count: kings });
            }
        }

        if (self.side_bb(Side::White) & self.side_bb(Side::Black)).is_not_empty() {
            return Err(BoardError::SideOverlap);
        }
        if self.side_bb(Side::White) | self.side_bb(Side::Black) != self.occupied() {
            return Err(BoardError::OccupancyMismatch);
        }

        let mut union = BitBoard::EMPTY;
        for pt in ALL_PIECE_TYPES {
            for other in ALL_PIECE_TYPES {
                if pt != other
                    && (self.piece_bb_both_players(pt) & self.piece_bb_both_players(other))
                        .is_not_empty()
                {
                    return Err(BoardError::TypeOverlap(pt, other));
                }
            }
            union |= self.piece_bb_both_players(pt);
        }
        if union != self.occupied() {
            return Err(BoardError::OccupancyMismatch);
        }

        for sq_idx in 0..SQ_CNT as u8 {
            let sq = Sq(sq_idx);
            let piece = self.piece_at(sq);
            if piece.is_empty() {
                if self.occupied().contains(sq) {
                    return Err(BoardError::MailboxMismatch(sq));
                }
            } else if !self
                .piece_bb(piece.side_of(), piece.type_of())
                .contains(sq)
            {
                return Err(BoardError::MailboxMismatch(sq));
            }
        }

        for side in [Side::White, Side::Black] {
            for pt in ALL_PIECE_TYPES {
                let piece = Piece::make(side, pt);
                if self.pieces.count_of(piece) != self.piece_bb(side, pt).count_bits() {
                    return Err(BoardError::CountMismatch(piece));
                }
            }
        }

        if !self.pieces.lists_consistent() {
            return Err(BoardError::ListCorrupt);
        }

        if self.state.ep_square != Sq::NONE
            && self.turn.relative_rank_of(self.state.ep_square) != Rank::R6
        {
            return Err(BoardError::BadEpSquare(self.state.ep_square));
        }

        for (i, right) in ALL_CASTLE_BITS.iter().enumerate() {
            if self.state.castling.has(*right) {
                let side = if i < 2 { Side::White } else { Side::Black };
                let rook = self.castling_rook[i];
                if !rook.on_board() || self.piece_at(rook) != Piece::make(side, PieceType::Rook) {
                    return Err(BoardError::CastleRookMissing(i));
                }
            }
        }

        let (scratch_key, scratch_pawn_key) = self.scratch_keys();
        if scratch_key != self.state.key {
            return Err(BoardError::KeyMismatch {
                incremental: self.state.key,
                scratch: scratch_key,
            });
        }
        if scratch_pawn_key != self.state.pawn_key {
            return Err(BoardError::PawnKeyMismatch {
                incremental: self.state.pawn_key,
                scratch: scratch_pawn_key,
            });
        }

        Ok(())
    }

    /// Recomputes the position and pawn keys from nothing but the board
    /// arrays and state flags.
    pub fn scratch_keys(&self) -> (u64, u64) {
        let mut key = 0u64;
        let mut pawn_key = z_no_pawns();
        for sq in self.occupied() {
            let piece = self.piece_at(sq);
            let z = z_square(sq, piece);
            key ^= z;
            if piece.type_of() == PieceType::Pawn {
                pawn_key ^= z;
            }
        }
        if self.state.ep_square != Sq::NONE {
            key ^= z_ep(self.state.ep_square);
        }
        key ^= z_castle(self.state.castling.bits());
        if self.turn == Side::Black {
            key ^= z_side();
        }
        (key, pawn_key)
    }
}

// random reachable positions

/// Builder producing boards a real game could reach, by playing random
/// legal moves from the start position. With a fixed seed the sequence of
/// boards is deterministic.
///
/// ```
/// use rookery::board::RandBoard;
///
/// let boards = RandBoard::new().pseudo_random(77_001).no_check().many(3);
/// assert_eq!(boards.len(), 3);
/// ```
pub struct RandBoard {
    wanted: RandCheck,
    min_moves: u16,
    prng: Prng,
    seed: u64,
}

#[derive(PartialEq, Eq)]
enum RandCheck {
    Any,
    InCheck,
    NoCheck,
}

impl Default for RandBoard {
    fn default() -> Self {
        RandBoard::new()
    }
}

impl RandBoard {
    /// A generator of unconstrained random positions.
    pub fn new() -> Self {
        RandBoard {
            wanted: RandCheck::Any,
            min_moves: 2,
            prng: Prng::init(1),
            seed: 0,
        }
    }

    /// Makes generation deterministic under the given seed.
    pub fn pseudo_random(mut self, seed: u64) -> Self {
        self.seed = if seed == 0 { 1 } else { seed };
        self.prng = Prng::init(self.seed);
        self
    }

    /// Requires at least this many plies to have been played.
    pub fn min_moves(mut self, plies: u16) -> Self {
        self.min_moves = plies;
        self
    }

    /// Only produce positions where the side to move is in check.
    pub fn in_check(mut self) -> Self {
        self.wanted = RandCheck::InCheck;
        self
    }

    /// Only produce positions where the side to move is not in check.
    pub fn no_check(mut self) -> Self {
        self.wanted = RandCheck::NoCheck;
        self
    }

    /// Produces one board.
    pub fn one(mut self) -> Board {
        self.make_one()
    }

    /// Produces `count` boards.
    pub fn many(mut self, count: usize) -> Vec<Board> {
        let mut boards = Vec::with_capacity(count);
        for _ in 0..count {
            boards.push(self.make_one());
        }
        boards
    }

    fn make_one(&mut self) -> Board {
        loop {
            let mut board = Board::start_pos();
            let mut plies: u16 = 0;
            loop {
                if plies >= 240 {
                    break; // start over: wandered into a dead end
                }
                let moves = board.generate_moves();
                if moves.is_empty() {
                    break;
                }
                let mv = moves[self.random() % moves.len()];
                board.apply_move(mv);
                plies += 1;
                if plies >= self.min_moves && self.accepts(&board) && self.random() % 7 == 0 {
                    return board;
                }
            }
        }
    }

    fn accepts(&self, board: &Board) -> bool {
        match self.wanted {
            RandCheck::Any => true,
            RandCheck::InCheck => board.in_check(),
            RandCheck::NoCheck => !board.in_check(),
        }
    }

    fn random(&mut self) -> usize {
        if self.seed == 0 {
            rand::random::<usize>()
        } else {
            self.prng.rand() as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pos_basics() {
        let board = Board::start_pos();
        assert_eq!(board.turn(), Side::White);
        assert_eq!(board.count_all_pieces(), 32);
        assert_eq!(board.king_sq(Side::White), Sq::E1);
        assert_eq!(board.king_sq(Side::Black), Sq::E8);
        assert!(!board.in_check());
        assert!(!board.is_chess960());
        assert!(board.validate().is_ok());
        assert_eq!(board.fen(), START_FEN);
    }

    #[test]
    fn make_unmake_restores_everything() {
        let mut board = Board::start_pos();
        let original_fen = board.fen();
        let original_key = board.key();
        let original_pawn_key = board.pawn_key();

        let moves = board.generate_moves();
        for mv in moves.to_vec() {
            board.apply_move(mv);
            assert!(board.validate().is_ok(), "after {}", mv);
            board.undo_move();
            assert_eq!(board.fen(), original_fen, "after undoing {}", mv);
            assert_eq!(board.key(), original_key);
            assert_eq!(board.pawn_key(), original_pawn_key);
            assert!(board.validate().is_ok());
        }
    }

    #[test]
    fn en_passant_round_trip() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2")
                .unwrap();
        assert_eq!(board.ep_square(), Sq::E3);
        let moves = board.generate_moves();
        let ep = moves.iter().find(|m| m.is_en_passant()).copied().unwrap();
        let before = board.fen();
        board.apply_move(ep);
        assert!(board.validate().is_ok());
        assert_eq!(board.piece_at(Sq::E4), Piece::Empty);
        board.undo_move();
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn castling_round_trip() {
        let mut board =
            Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = board.generate_moves();
        let castles: Vec<Move> = moves.iter().filter(|m| m.is_castle()).copied().collect();
        assert_eq!(castles.len(), 2);
        for mv in castles {
            let before = board.fen();
            board.apply_move(mv);
            assert!(board.validate().is_ok());
            board.undo_move();
            assert_eq!(board.fen(), before);
        }
    }

    #[test]
    fn promotion_round_trip() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = board.generate_moves();
        let promos: Vec<Move> = moves.iter().filter(|m| m.is_promotion()).copied().collect();
        assert_eq!(promos.len(), 4);
        for mv in promos {
            let before = board.fen();
            board.apply_move(mv);
            assert!(board.validate().is_ok());
            assert_eq!(board.piece_at(Sq::A8).type_of(), mv.promo_type());
            board.undo_move();
            assert_eq!(board.fen(), before);
        }
    }

    #[test]
    fn null_move_round_trip() {
        let mut board = Board::start_pos();
        let fen = board.fen();
        let key = board.key();
        board.apply_null_move();
        assert_ne!(board.key(), key);
        assert_eq!(board.turn(), Side::Black);
        board.undo_null_move();
        assert_eq!(board.fen(), fen);
        assert_eq!(board.key(), key);
    }

    #[test]
    fn uci_castle_text() {
        let board = Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = board.generate_moves();
        let uci: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castle())
            .map(|m| board.uci_string(*m))
            .collect();
        assert!(uci.contains(&"e1g1".to_string()));
        assert!(uci.contains(&"e1c1".to_string()));
    }

    #[test]
    fn chess960_autodetect_and_castle() {
        // king on d1 with rooks on b1/g1: not a standard layout
        let mut board = Board::from_fen("1r2k2r/8/8/8/8/8/8/1R1K2R1 w GBhb - 0 1").unwrap();
        assert!(board.is_chess960());
        let moves = board.generate_moves();
        let castles: Vec<Move> = moves.iter().filter(|m| m.is_castle()).copied().collect();
        assert_eq!(castles.len(), 2);
        for mv in castles {
            let before = board.fen();
            board.apply_move(mv);
            assert!(board.validate().is_ok(), "after castle {}", mv);
            board.undo_move();
            assert_eq!(board.fen(), before);
        }
    }

    #[test]
    fn see_simple_exchanges() {
        // undefended pawn: knight takes wins a pawn
        let board = Board::from_fen("7k/8/8/3p4/8/2N5/8/7K w - - 0 1").unwrap();
        let take = Move::make(Sq::C3, Sq::D5);
        assert!(board.see_ge(take, 0));
        assert!(board.see_ge(take, PieceType::Pawn.value()));
        assert!(!board.see_ge(take, PieceType::Pawn.value() + 1));

        // defended pawn: the knight is lost for a pawn
        let board = Board::from_fen("7k/8/4p3/3p4/8/2N5/8/7K w - - 0 1").unwrap();
        let take = Move::make(Sq::C3, Sq::D5);
        assert!(!board.see_ge(take, 0));
        assert!(board.see_ge(
            take,
            PieceType::Pawn.value() - PieceType::Knight.value()
        ));
    }

    #[test]
    fn repetition_detection() {
        let mut board = Board::start_pos();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for uci in shuffle {
            assert!(board.apply_uci_move(uci), "{}", uci);
        }
        // back to the start position: one repetition
        assert_eq!(board.repetition(), 4);
        for uci in shuffle {
            assert!(board.apply_uci_move(uci), "{}", uci);
        }
        // third occurrence: flagged negative
        assert!(board.repetition() < 0);
        assert!(board.is_draw(1));
    }

    #[test]
    fn rand_boards_are_deterministic() {
        let a = RandBoard::new().pseudo_random(550_087_423).min_moves(3).one();
        let b = RandBoard::new().pseudo_random(550_087_423).min_moves(3).one();
        assert_eq!(a, b);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn piece_hook_fires() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn hook(_p: Piece, _s: Sq) {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }
        let mut board = Board::start_pos();
        board.set_piece_hook(Some(hook));
        let before = CALLS.load(Ordering::Relaxed);
        let mv = board.generate_moves()[0];
        board.apply_move(mv);
        assert!(CALLS.load(Ordering::Relaxed) > before);
        let mid = CALLS.load(Ordering::Relaxed);
        board.set_probing(true);
        board.undo_move();
        assert_eq!(CALLS.load(Ordering::Relaxed), mid);
    }
}
