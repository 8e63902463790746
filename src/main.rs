//! limit-order-book - demo binary
//!
//! Replays a few order sequences against a fresh book and prints the
//! resulting levels. Set `RUST_LOG=debug` (or `trace` for every fill) to
//! see the book's own logging, and `BOOK_SNAPSHOT_DEPTH` to change how
//! many levels are printed.

use limit_order_book::{AddOutcome, BookConfig, BookError, OrderBook, Side};
use rust_decimal::Decimal;

fn describe(outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::Filled { fills } => format!("fully filled ({} fills)", fills.len()),
        AddOutcome::Resting { id, remaining, fills } => {
            format!("resting id={} volume={} after {} fills", id, remaining, fills.len())
        }
        AddOutcome::Rejected(reason) => format!("rejected: {:?}", reason),
    }
}

fn add(book: &mut OrderBook, price: i64, volume: u64, side: Side) -> Result<AddOutcome, BookError> {
    let outcome = book.add(Decimal::from(price), volume, side)?;
    println!("  add {} {} @ {} -> {}", side, volume, price, describe(&outcome));
    Ok(outcome)
}

fn main() -> Result<(), BookError> {
    let _ = env_logger::try_init();
    let config = BookConfig::from_env();

    println!("===========================================");
    println!("  limit-order-book demo");
    println!("===========================================");
    println!();

    println!("Crossing several levels:");
    let mut book = OrderBook::with_config(config);
    add(&mut book, 100, 5, Side::Sell)?;
    add(&mut book, 101, 5, Side::Sell)?;
    add(&mut book, 99, 4, Side::Buy)?;
    add(&mut book, 101, 8, Side::Buy)?;
    print!("{}", book);
    println!();

    println!("Market sell larger than the bid side:");
    add(&mut book, 98, 8, Side::Buy)?;
    let outcome = book.market_order(Side::Sell, 20);
    println!(
        "  market SELL 20 -> filled {} unfilled {}",
        outcome.filled_volume(),
        outcome.unfilled
    );
    print!("{}", book);
    println!();

    println!("Cancel and amend:");
    let resting = add(&mut book, 105, 10, Side::Sell)?;
    if let Some(id) = resting.order_id() {
        println!("  amend {} to 3 -> {:?}", id, book.amend_volume(id, 3));
        println!("  cancel {} -> {:?}", id, book.cancel(id).is_some());
        println!("  cancel {} again -> {:?}", id, book.cancel(id).is_some());
    }
    println!();

    println!("Resting orders:");
    for order in book.resting_orders() {
        println!("  {}", order);
    }
    println!();
    println!("State root: {}", book.state_root_hex()?);

    book.check_invariants()
}
