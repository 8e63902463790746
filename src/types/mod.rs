//! Core data types for the order book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`OrderId`]: Non-zero order identifier issued by the book
//! - [`Side`]: Buy or Sell
//! - [`Fill`]: One match against a resting order
//! - [`AddOutcome`], [`MarketOutcome`], [`Amendment`]: Operation results
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` ticks scaled by 10^8.
//! Example: 100.5 is stored as 10_050_000_000u64

mod order;
mod fill;
mod outcome;
pub mod price;

// Re-export all types at module level
pub use order::{Order, OrderId, Side};
pub use fill::{filled_volume, Fill};
pub use outcome::{AddOutcome, Amendment, MarketOutcome, RejectReason};
