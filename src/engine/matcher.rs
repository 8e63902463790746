//! Price-time priority sweep.
//!
//! Limit matching and market consumption are the same walk over the
//! opposite side: take the best level, consume its queue head-first, drop
//! the level once it is empty, repeat. They differ only in whether a price
//! bound stops the walk.

use log::trace;

use crate::orderbook::{BookSide, MasterIndex, PriceKey, PriceLevel};
use crate::types::{Fill, Side};

/// Price bound of an incoming limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    /// Side of the incoming order
    pub side: Side,
    /// Limit price in ticks
    pub price: u64,
}

impl Limit {
    pub fn new(side: Side, price: u64) -> Self {
        Self { side, price }
    }

    /// Whether a resting level at `best` is acceptable
    #[inline]
    pub fn accepts(&self, best: u64) -> bool {
        self.side.crosses(self.price, best)
    }
}

/// Match an incoming limit order against the opposite side.
///
/// # Returns
///
/// The residual volume (0 if fully filled).
pub fn match_limit<K: PriceKey>(
    opposite: &mut BookSide<K>,
    index: &mut MasterIndex,
    limit: Limit,
    volume: u64,
    fills: &mut Vec<Fill>,
) -> u64 {
    sweep(opposite, index, Some(limit), volume, fills)
}

/// Consume `side` from the best level outward with no price check.
///
/// # Returns
///
/// The volume that could not be matched (0 if fully satisfied).
pub fn consume_market<K: PriceKey>(
    side: &mut BookSide<K>,
    index: &mut MasterIndex,
    volume: u64,
    fills: &mut Vec<Fill>,
) -> u64 {
    sweep(side, index, None, volume, fills)
}

fn sweep<K: PriceKey>(
    side: &mut BookSide<K>,
    index: &mut MasterIndex,
    limit: Option<Limit>,
    mut remaining: u64,
    fills: &mut Vec<Fill>,
) -> u64 {
    while remaining > 0 {
        let Some(level) = side.best_mut() else {
            break;
        };
        if limit.is_some_and(|limit| !limit.accepts(level.price)) {
            break;
        }

        let price = level.price;
        remaining = consume_level(level, index, remaining, fills);
        if !level.is_empty() {
            // Only a partially filled head is left behind, so we are done
            break;
        }
        side.prune(price);
    }
    remaining
}

/// Consume one level's queue in arrival order.
fn consume_level(
    level: &mut PriceLevel,
    index: &mut MasterIndex,
    mut remaining: u64,
    fills: &mut Vec<Fill>,
) -> u64 {
    while remaining > 0 {
        let Some(key) = level.peek_head() else {
            break;
        };
        let Some(handle) = index.handle_at(key) else {
            break;
        };
        let resting = index.arena()[key].volume();

        if resting <= remaining {
            remaining -= resting;
            level.remove(key, index.arena_mut());
            index.erase(handle);
            trace!(
                "fill maker={} price={} volume={} maker done",
                handle.id(),
                level.price,
                resting
            );
            fills.push(Fill::new(handle.id(), level.price, resting, 0));
        } else {
            let left = resting - remaining;
            index.arena_mut()[key].fill(remaining);
            level.reduce_volume(remaining);
            trace!(
                "fill maker={} price={} volume={} maker left={}",
                handle.id(),
                level.price,
                remaining,
                left
            );
            fills.push(Fill::new(handle.id(), level.price, remaining, left));
            remaining = 0;
        }
    }
    remaining
}

// ============================================================================
// Unit Tests
// ============================================================================
