//! # limit-order-book
//!
//! In-memory, price-time priority limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: Orders, ids, fills and operation outcomes
//! - **OrderBook**: slab-backed storage with intrusive FIFO price levels
//! - **Engine**: the sweep shared by limit matching and market orders
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same operation sequence, same book, same state root
//! 2. **No Floating Point**: Prices are fixed-point ticks (10^8 scaling)
//! 3. **Stable Handles**: Orders live in a slab; queues hold keys, not references
//! 4. **Synchronous Execution**: No async, no I/O, no internal threads
//!
//! ## Example
//!
//! ```
//! use limit_order_book::{OrderBook, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::new();
//! book.add(Decimal::from(100), 10, Side::Sell).unwrap();
//! book.add(Decimal::from(100), 10, Side::Buy).unwrap();
//! assert!(book.is_empty());
//! ```
//!
//! Callers that share a book between threads must serialize access
//! themselves (a lock or a single writer); every mutation takes `&mut self`.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, OrderId, Fill, outcomes
pub mod types;

/// Order book: storage, price levels, public facade
pub mod orderbook;

/// Matching engine: price-time priority sweep
pub mod engine;

/// Book configuration
pub mod config;

/// Error type
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use error::BookError;
pub use orderbook::{BookSnapshot, LevelView, OrderBook};
pub use types::{AddOutcome, Amendment, Fill, MarketOutcome, Order, OrderId, RejectReason, Side};
