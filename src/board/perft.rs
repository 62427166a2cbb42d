//! Performance test: exhaustive move-path enumeration.
//!
//! `perft(board, depth)` counts the leaf nodes of the legal game tree to a
//! fixed depth, the canonical correctness check for move generation and
//! make/unmake. [`perft_divide`] prints the per-root-move breakdown used to
//! bisect a disagreement with a known-good engine, and [`perft_parallel`]
//! splits the root moves across threads, each worker owning its own board.
//!
//! [`perft_divide`]: fn.perft_divide.html
//! [`perft_parallel`]: fn.perft_parallel.html

use rayon::prelude::*;

use super::Board;
use crate::core::move_list::MoveList;

/// Counts leaf nodes of the legal move tree to `depth`.
pub fn perft(board: &Board, depth: u16) -> u64 {
    if depth == 0 {
        1
    } else {
        let mut inner = board.shallow_clone();
        inner_perft(&mut inner, depth)
    }
}

/// Counts leaf nodes and prints `move: count` for every root move,
/// followed by the total.
pub fn perft_divide(board: &Board, depth: u16) -> u64 {
    let mut inner = board.shallow_clone();
    let moves = inner.generate_moves();
    let mut total = 0u64;
    for mv in &moves {
        let count = if depth <= 1 {
            1
        } else {
            inner.apply_move(*mv);
            let nodes = inner_perft(&mut inner, depth - 1);
            inner.undo_move();
            nodes
        };
        println!("{}: {}", inner.uci_string(*mv), count);
        total += count;
    }
    println!("total: {}", total);
    total
}

/// Counts leaf nodes with the root moves spread over the rayon thread
/// pool. Every worker clones the board, so the caller's board is untouched.
pub fn perft_parallel(board: &Board, depth: u16) -> u64 {
    if depth <= 1 {
        return perft(board, depth);
    }
    let moves = board.generate_moves();
    moves
        .as_slice()
        .par_iter()
        .map(|mv| {
            let mut inner = board.parallel_clone();
            inner.apply_move(*mv);
            let nodes = inner_perft(&mut inner, depth - 1);
            inner.undo_move();
            nodes
        })
        .sum()
}

fn inner_perft(board: &mut Board, depth: u16) -> u64 {
    let moves: MoveList = board.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut count = 0u64;
    for mv in &moves {
        board.apply_move(*mv);
        count += inner_perft(board, depth - 1);
        board.undo_move();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_start_pos_shallow() {
        let board = Board::start_pos();
        assert_eq!(perft(&board, 0), 1);
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(perft(&board, 3), 8_902);
        assert_eq!(perft(&board, 4), 197_281);
    }

    #[test]
    fn perft_kiwipete_shallow() {
        let board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&board, 1), 48);
        assert_eq!(perft(&board, 2), 2_039);
        assert_eq!(perft(&board, 3), 97_862);
    }

    #[test]
    fn parallel_matches_sequential() {
        let board = Board::start_pos();
        assert_eq!(perft_parallel(&board, 4), perft(&board, 4));
    }
}
