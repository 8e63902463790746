//! Matching for the order book.
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Within a level, the oldest order matches first
//! - **Partial fills** reduce the resting order in place; it keeps its position
//! - Fills execute at the resting order's price
//! - **Market orders** use the same walk without a price bound and never rest
//!
//! The routines here are generic over the side's key type, so one
//! implementation serves both directions.

pub mod matcher;

pub use matcher::{consume_market, match_limit, Limit};
