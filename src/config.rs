//! Book configuration.
//!
//! Defaults suit a single instrument with a modest resting book. Embedding
//! applications can override them in code or through the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `BOOK_ORDER_CAPACITY` | `order_capacity` | 10000 |
//! | `BOOK_SNAPSHOT_DEPTH` | `snapshot_depth` | 5 |

use std::env;
use std::str::FromStr;

pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 5;

/// Tunables for an [`OrderBook`](crate::OrderBook).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Resting orders to pre-allocate storage for
    pub order_capacity: usize,

    /// Levels per side shown by `Display for OrderBook`
    pub snapshot_depth: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }
}

impl BookConfig {
    /// Read overrides from the environment; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            order_capacity: parse_or(&lookup, "BOOK_ORDER_CAPACITY", defaults.order_capacity),
            snapshot_depth: parse_or(&lookup, "BOOK_SNAPSHOT_DEPTH", defaults.snapshot_depth),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
