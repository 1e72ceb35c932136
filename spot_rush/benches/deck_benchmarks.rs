use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use spot_rush::{Deck, constants, matching};

/// Benchmark full deck generation at the reference order.
fn bench_deck_generation(c: &mut Criterion) {
    c.bench_function("deck_generate_order_7", |b| {
        b.iter(|| Deck::generate(black_box(7), constants::EMOJI_SYMBOLS).unwrap());
    });
}

/// Benchmark validating one triple of real cards.
fn bench_match_validation(c: &mut Criterion) {
    let mut deck = Deck::generate(7, constants::EMOJI_SYMBOLS).unwrap();
    let cards = deck.draw(3);
    let refs: Vec<&_> = cards.iter().collect();

    c.bench_function("find_common_symbol", |b| {
        b.iter(|| matching::find_common_symbol(black_box(&refs)));
    });
}

criterion_group!(benches, bench_deck_generation, bench_match_validation);
criterion_main!(benches);
