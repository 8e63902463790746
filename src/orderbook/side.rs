//! One side of the book: price levels ordered best-first.
//!
//! ## Price Ordering
//!
//! - **Bids**: keyed by `Reverse<u64>`, so iteration runs high-to-low
//! - **Asks**: keyed by `u64`, so iteration runs low-to-high
//!
//! Either way `BTreeMap::first_key_value` is the best level, and the matcher
//! is written once against [`BookSide<K>`].
//!
//! A price key exists only while its level holds at least one order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};

/// Map key that fixes a side's iteration order.
pub trait PriceKey: Ord + Copy + std::fmt::Debug {
    fn from_price(price: u64) -> Self;
    fn price(self) -> u64;
}

/// Ascending: best ask = lowest price
impl PriceKey for u64 {
    #[inline]
    fn from_price(price: u64) -> Self {
        price
    }

    #[inline]
    fn price(self) -> u64 {
        self
    }
}

/// Descending: best bid = highest price
impl PriceKey for Reverse<u64> {
    #[inline]
    fn from_price(price: u64) -> Self {
        Reverse(price)
    }

    #[inline]
    fn price(self) -> u64 {
        self.0
    }
}

/// Price levels for one side of the book
#[derive(Debug)]
pub struct BookSide<K: PriceKey> {
    levels: BTreeMap<K, PriceLevel>,
}

/// Bid side (descending)
pub type BidSide = BookSide<Reverse<u64>>;

/// Ask side (ascending)
pub type AskSide = BookSide<u64>;

impl<K: PriceKey> Default for BookSide<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PriceKey> BookSide<K> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Number of price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The level at `price`, created empty if absent.
    ///
    /// Only call this right before appending to it.
    pub fn queue_for(&mut self, price: u64) -> &mut PriceLevel {
        self.levels
            .entry(K::from_price(price))
            .or_insert_with(|| PriceLevel::new(price))
    }

    /// Most aggressive level
    #[inline]
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first_key_value().map(|(_, level)| level)
    }

    /// Most aggressive level (mutable)
    #[inline]
    pub fn best_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.values_mut().next()
    }

    /// Best price, if any
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.levels.keys().next().map(|key| key.price())
    }

    #[inline]
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&K::from_price(price))
    }

    #[inline]
    pub fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&K::from_price(price))
    }

    /// Levels from best to worst
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// Unlink the order in slot `key` from the level at `price`.
    ///
    /// Drops the level if it becomes empty.
    ///
    /// # Returns
    ///
    /// The unlinked order's volume, or `None` if no level exists at `price`.
    pub fn unlink(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) -> Option<u64> {
        let level = self.levels.get_mut(&K::from_price(price))?;
        let volume = level.remove(key, slab);
        if level.is_empty() {
            self.levels.remove(&K::from_price(price));
        }
        Some(volume)
    }

    /// Drop the level at `price` if it has no orders left
    pub fn prune(&mut self, price: u64) {
        let key = K::from_price(price);
        if self.levels.get(&key).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&key);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
