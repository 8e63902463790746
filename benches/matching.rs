//! Benchmarks for the limit order book.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use limit_order_book::{OrderBook, OrderId, Side};

/// 50000.00000000 in fixed-point ticks
const BASE_PRICE: u64 = 5_000_000_000_000;

/// 1.00000000 in fixed-point ticks
const ONE: u64 = 100_000_000;

// ============================================================================
// HELPER FUNCTIONS - Deterministic book setup
// ============================================================================

/// Rest `count` sell orders at increasing prices starting from `base_price`.
fn populate_asks(book: &mut OrderBook, count: usize, base_price: u64, price_step: u64, volume: u64) {
    for i in 0..count {
        let price = base_price + i as u64 * price_step;
        book.add_ticks(price, volume, Side::Sell).unwrap();
    }
}

/// Rest `count` buy orders at decreasing prices starting from `base_price`.
fn populate_bids(book: &mut OrderBook, count: usize, base_price: u64, price_step: u64, volume: u64) {
    for i in 0..count {
        let price = base_price - i as u64 * price_step;
        book.add_ticks(price, volume, Side::Buy).unwrap();
    }
}

/// Deterministic limit requests scattered around `BASE_PRICE`.
fn generate_request_batch(count: usize, seed: u64) -> Vec<(Side, u64, u64)> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = Side::from_is_buy(rng.gen_bool(0.5));
            let offset: i64 = rng.gen_range(-50_000_000_000i64..=50_000_000_000i64);
            let price = (BASE_PRICE as i64 + offset) as u64;
            let volume: u64 = rng.gen_range(1..=100);
            (side, price, volume)
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    // Match one order against the best of 1,000 resting asks
    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_asks(&mut book, 1_000, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.add_ticks(BASE_PRICE, 10, Side::Buy)),
            BatchSize::SmallInput,
        );
    });

    // A buy that sweeps ten price levels
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(200);
                populate_asks(&mut book, 100, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.add_ticks(BASE_PRICE + 10 * ONE, 100, Side::Buy)),
            BatchSize::SmallInput,
        );
    });

    // A buy below the best ask that rests
    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_asks(&mut book, 1_000, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.add_ticks(BASE_PRICE - 100 * ONE, 10, Side::Buy)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("market_sweep", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(200);
                populate_bids(&mut book, 100, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.market_order(Side::Sell, 250)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("add_to_empty", |b| {
        b.iter_batched(
            OrderBook::new,
            |mut book| black_box(book.add_ticks(BASE_PRICE, 10, Side::Buy)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("add_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_asks(&mut book, 500, BASE_PRICE, ONE, 10);
                populate_bids(&mut book, 500, BASE_PRICE - ONE, ONE, 10);
                book
            },
            |mut book| black_box(book.add_ticks(BASE_PRICE - 250 * ONE, 10, Side::Buy)),
            BatchSize::SmallInput,
        );
    });

    // Cancel from the middle of a deep book
    group.bench_function("cancel_order", |b| {
        let middle = OrderId::new(500).unwrap();
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_bids(&mut book, 1_000, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.cancel(middle)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("amend_volume", |b| {
        let middle = OrderId::new(500).unwrap();
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_bids(&mut book, 1_000, BASE_PRICE, ONE, 10);
                book
            },
            |mut book| black_box(book.amend_volume(middle, 25)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                let requests = generate_request_batch(size, 42);

                b.iter_batched(
                    || OrderBook::with_capacity(size),
                    |mut book| {
                        for &(side, price, volume) in &requests {
                            let _ = black_box(book.add_ticks(price, volume, side));
                        }
                        book.len()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Large Book
// ============================================================================

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    group.bench_function("match_in_100k_book", |b| {
        let mut book = OrderBook::with_capacity(120_000);
        populate_asks(&mut book, 50_000, BASE_PRICE, 100_000, 1_000_000);
        populate_bids(&mut book, 50_000, BASE_PRICE - ONE, 100_000, 1_000_000);

        // Each iteration takes one unit off the best ask
        b.iter(|| black_box(book.add_ticks(BASE_PRICE, 1, Side::Buy)));
    });

    group.bench_function("state_root_10k", |b| {
        let mut book = OrderBook::with_capacity(10_000);
        populate_asks(&mut book, 5_000, BASE_PRICE, ONE, 10);
        populate_bids(&mut book, 5_000, BASE_PRICE - ONE, ONE, 10);

        b.iter(|| black_box(book.state_root()));
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput,
    bench_large_book
);

criterion_main!(benches);
