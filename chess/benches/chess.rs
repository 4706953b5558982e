use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kibitz::{legal, movegen, Board, Color, Coord, Game};

const BOARDS: [(&str, &str); 7] = [
    ("initial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K",
    ),
    ("endgame", "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3"),
    ("pinned", "k3r3/8/2b5/8/4N3/3R4/8/q3K2r"),
    ("knights", "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2"),
    ("queens", "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1"),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, fen)| (name, Board::from_fen(fen).unwrap()))
}

fn bench_pseudo_destinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudo_destinations");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for coord in Coord::iter() {
                    black_box(movegen::pseudo_destinations(&board, coord));
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(movegen::is_square_attacked(&board, coord, color));
                    }
                }
            })
        });
    }
}

fn bench_legal_destinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_destinations");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for coord in Coord::iter() {
                    black_box(legal::legal_destinations(&board, coord).len());
                }
            })
        });
    }
}

fn bench_game(c: &mut Criterion) {
    let moves: Vec<_> = "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5c6 d7c6 b1c3 f7f6 d2d4 e5d4 f3d4 c6c5"
        .split_ascii_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    c.bench_function("game_push", |b| {
        b.iter(|| {
            let mut game = Game::initial();
            for &mv in &moves {
                game.push(mv, None).unwrap();
            }
            black_box(game.is_check())
        })
    });
}

criterion_group!(
    chess,
    bench_pseudo_destinations,
    bench_is_attacked,
    bench_legal_destinations,
    bench_game,
);

criterion_main!(chess);
