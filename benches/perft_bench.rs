use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rookery::board::perft::perft;
use rookery::helper::prelude::init_statics;
use rookery::{Board, GenKind, MoveGen};

fn bench_movegen(c: &mut Criterion) {
    init_statics();
    let start = Board::start_pos();
    let kiwipete = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    c.bench_function("movegen legal startpos", |b| {
        b.iter(|| black_box(&start).generate_moves().len())
    });
    c.bench_function("movegen legal kiwipete", |b| {
        b.iter(|| black_box(&kiwipete).generate_moves().len())
    });
    c.bench_function("movegen captures kiwipete", |b| {
        b.iter(|| MoveGen::generate(black_box(&kiwipete), GenKind::Captures).len())
    });
}

fn bench_perft(c: &mut Criterion) {
    init_statics();
    let start = Board::start_pos();
    c.bench_function("perft 3 startpos", |b| {
        b.iter(|| perft(black_box(&start), 3))
    });
    c.bench_function("perft 4 startpos", |b| {
        b.iter(|| perft(black_box(&start), 4))
    });
}

fn bench_make_unmake(c: &mut Criterion) {
    init_statics();
    let board = Board::start_pos();
    let moves = board.generate_moves();
    c.bench_function("make/unmake all root moves", |b| {
        b.iter(|| {
            let mut inner = board.shallow_clone();
            for mv in &moves {
                inner.apply_move(*mv);
                inner.undo_move();
            }
        })
    });
}

criterion_group!(benches, bench_movegen, bench_perft, bench_make_unmake);
criterion_main!(benches);
