//! The order book: one instrument, price-time priority.
//!
//! ## Architecture
//!
//! - **MasterIndex**: slab arena + id map, sole owner of orders
//! - **BidSide / AskSide**: `BTreeMap` price levels, best first
//! - **engine::matcher**: the sweep shared by limit and market orders
//!
//! Every public operation either applies completely or leaves the book
//! untouched; the index and both sides are never observably out of step.
//!
//! ## Example
//!
//! ```
//! use limit_order_book::{AddOutcome, OrderBook, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::new();
//!
//! let ask = book.add(Decimal::from(100), 10, Side::Sell).unwrap();
//! let id = ask.order_id().unwrap();
//!
//! // Crossing buy takes 4 from the resting ask
//! let buy = book.add(Decimal::from(101), 4, Side::Buy).unwrap();
//! assert!(buy.is_filled());
//! assert_eq!(book.order(id).unwrap().volume, 6);
//!
//! assert!(book.cancel(id).is_some());
//! assert!(book.is_empty());
//! ```

use std::fmt;

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::config::BookConfig;
use crate::engine::{consume_market, match_limit, Limit};
use crate::error::BookError;
use crate::orderbook::digest;
use crate::orderbook::{AskSide, BidSide, BookSide, BookSnapshot, MasterIndex, PriceKey, PriceLevel};
use crate::types::price::decimal_to_ticks;
use crate::types::{AddOutcome, Amendment, MarketOutcome, Order, OrderId, RejectReason, Side};

/// Single-instrument limit order book
#[derive(Debug)]
pub struct OrderBook {
    index: MasterIndex,
    bids: BidSide,
    asks: AskSide,
    config: BookConfig,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with default configuration
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book with storage pre-allocated for `order_capacity` orders
    ///
    /// ```
    /// use limit_order_book::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig {
            order_capacity,
            ..BookConfig::default()
        })
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            index: MasterIndex::with_capacity(config.order_capacity),
            bids: BidSide::new(),
            asks: AskSide::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.index.bid_count()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.index.ask_count()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Order Entry
    // ========================================================================

    /// Submit a limit order priced as a decimal.
    ///
    /// The price must be positive and representable with 8 decimal places;
    /// anything else is rejected without touching the book.
    ///
    /// # Errors
    ///
    /// [`BookError::IdSpaceExhausted`] if a residual would need an id and
    /// none is left. The check happens before matching, so the book is
    /// unchanged in that case.
    pub fn add(&mut self, price: Decimal, volume: u64, side: Side) -> Result<AddOutcome, BookError> {
        if price <= Decimal::ZERO {
            return Ok(AddOutcome::Rejected(RejectReason::NonPositivePrice));
        }
        let Some(ticks) = decimal_to_ticks(price) else {
            return Ok(AddOutcome::Rejected(RejectReason::UnrepresentablePrice));
        };
        self.add_ticks(ticks, volume, side)
    }

    /// Submit a limit order priced in fixed-point ticks (10^8 per unit).
    pub fn add_ticks(&mut self, price: u64, volume: u64, side: Side) -> Result<AddOutcome, BookError> {
        if price == 0 {
            return Ok(AddOutcome::Rejected(RejectReason::NonPositivePrice));
        }
        if volume == 0 {
            return Ok(AddOutcome::Rejected(RejectReason::ZeroVolume));
        }
        self.index.peek_next_id()?;

        let mut fills = Vec::new();
        let limit = Limit::new(side, price);
        let remaining = match side {
            Side::Buy => match_limit(&mut self.asks, &mut self.index, limit, volume, &mut fills),
            Side::Sell => match_limit(&mut self.bids, &mut self.index, limit, volume, &mut fills),
        };

        if remaining == 0 {
            debug!(
                "add {} price={} volume={} fully filled by {} fills",
                side,
                price,
                volume,
                fills.len()
            );
            return Ok(AddOutcome::Filled { fills });
        }

        let handle = self.index.insert(side, price, remaining)?;
        match side {
            Side::Buy => self.bids.queue_for(price).push_back(handle.key, self.index.arena_mut()),
            Side::Sell => self.asks.queue_for(price).push_back(handle.key, self.index.arena_mut()),
        }
        debug!(
            "add {} price={} volume={} resting id={} remaining={}",
            side,
            price,
            volume,
            handle.id(),
            remaining
        );

        Ok(AddOutcome::Resting {
            id: handle.id(),
            remaining,
            fills,
        })
    }

    /// Execute a market order against the opposite side.
    ///
    /// Never rests; whatever cannot be matched is reported as `unfilled`.
    pub fn market_order(&mut self, side: Side, volume: u64) -> MarketOutcome {
        if volume == 0 {
            return MarketOutcome::default();
        }

        let mut fills = Vec::new();
        let unfilled = match side {
            Side::Buy => consume_market(&mut self.asks, &mut self.index, volume, &mut fills),
            Side::Sell => consume_market(&mut self.bids, &mut self.index, volume, &mut fills),
        };
        debug!(
            "market {} volume={} unfilled={} fills={}",
            side,
            volume,
            unfilled,
            fills.len()
        );

        MarketOutcome { unfilled, fills }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Cancel a resting order.
    ///
    /// # Returns
    ///
    /// The removed order, or `None` if the id is unknown (including ids
    /// that were already filled or cancelled).
    pub fn cancel(&mut self, id: OrderId) -> Option<Order> {
        let handle = self.index.handle(id)?;
        let node = self.index.node(handle)?;
        let (side, price, resting) = (node.side(), node.price(), node.resting);

        if resting {
            let unlinked = match side {
                Side::Buy => self.bids.unlink(price, handle.key, self.index.arena_mut()),
                Side::Sell => self.asks.unlink(price, handle.key, self.index.arena_mut()),
            };
            debug_assert!(unlinked.is_some(), "resting order {} has no level", id);
        } else {
            warn!("cancel id={}: order was not resting, erasing from index only", id);
        }

        let order = self.index.erase(handle)?;
        debug!("cancel id={} side={} price={} volume={}", id, side, price, order.volume);
        Some(order)
    }

    /// Change a resting order's volume.
    ///
    /// Zero cancels the order. Any other value is applied in place and the
    /// order keeps its time priority, whether the volume goes up or down.
    ///
    /// # Returns
    ///
    /// `None` if the id is unknown.
    pub fn amend_volume(&mut self, id: OrderId, new_volume: u64) -> Option<Amendment> {
        if new_volume == 0 {
            return self.cancel(id).map(Amendment::Cancelled);
        }

        let handle = self.index.handle(id)?;
        let node = self.index.node(handle)?;
        let (side, price, resting) = (node.side(), node.price(), node.resting);

        let previous = self.index.mutate_volume(id, new_volume).ok().flatten()?;
        if resting {
            let level = match side {
                Side::Buy => self.bids.level_mut(price),
                Side::Sell => self.asks.level_mut(price),
            };
            debug_assert!(level.is_some(), "resting order {} has no level", id);
            if let Some(level) = level {
                if new_volume >= previous {
                    level.increase_volume(new_volume - previous);
                } else {
                    level.reduce_volume(previous - new_volume);
                }
            }
        }
        debug!("amend id={} volume {} -> {}", id, previous, new_volume);

        Some(Amendment::Updated {
            previous,
            current: new_volume,
        })
    }

    /// Remove every resting order. Issued ids stay retired.
    pub fn clear(&mut self) {
        let ids: Vec<OrderId> = self.index.iter().map(|node| node.order_id()).collect();
        for id in ids {
            self.cancel(id);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up a resting order
    #[inline]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.index.lookup(id)
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains(id)
    }

    /// Every resting order, in no particular order
    pub fn resting_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.index.iter().map(|node| &node.order)
    }

    /// Best bid price (highest buy price)
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Best ask price (lowest sell price)
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// best_ask - best_bid, when both sides are present
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.best()
    }

    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.best()
    }

    /// Total resting volume at one price on one side
    pub fn volume_at(&self, side: Side, price: u64) -> u128 {
        let level = match side {
            Side::Buy => self.bids.level(price),
            Side::Sell => self.asks.level(price),
        };
        level.map_or(0, |level| level.total_volume)
    }

    /// Top `max_levels` levels of each side
    pub fn snapshot(&self, max_levels: usize) -> BookSnapshot {
        BookSnapshot::capture(&self.bids, &self.asks, self.index.arena(), max_levels)
    }

    /// SHA-256 over every resting order in book order
    pub fn state_root(&self) -> Result<[u8; 32], BookError> {
        digest::state_root(&self.bids, &self.asks, self.index.arena())
    }

    pub fn state_root_hex(&self) -> Result<String, BookError> {
        self.state_root().map(hex::encode)
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Walk both sides and cross-check them against the index.
    ///
    /// Verifies that every level is non-empty with correct cached totals,
    /// every queued order is live in the index with matching side and price,
    /// every indexed order is queued exactly once, and the book is not
    /// crossed.
    pub fn check_invariants(&self) -> Result<(), BookError> {
        let bids = self.check_side(&self.bids, Side::Buy)?;
        let asks = self.check_side(&self.asks, Side::Sell)?;

        if bids != self.index.bid_count() || asks != self.index.ask_count() {
            return Err(BookError::Corrupted(format!(
                "queued bids/asks {}/{} but index counts {}/{}",
                bids,
                asks,
                self.index.bid_count(),
                self.index.ask_count()
            )));
        }
        if bids + asks != self.index.len() {
            return Err(BookError::Corrupted(format!(
                "{} orders queued but {} indexed",
                bids + asks,
                self.index.len()
            )));
        }
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(BookError::Corrupted(format!(
                    "crossed book: bid {} >= ask {}",
                    bid, ask
                )));
            }
        }
        Ok(())
    }

    fn check_side<K: PriceKey>(&self, side: &BookSide<K>, expected: Side) -> Result<usize, BookError> {
        let arena = self.index.arena();
        let mut queued = 0;

        for level in side.levels() {
            if level.is_empty() || level.head.is_none() {
                return Err(BookError::Corrupted(format!("empty level at {}", level.price)));
            }

            let mut count = 0;
            let mut volume = 0u128;
            let mut prev = None;
            for key in level.keys(arena) {
                count += 1;
                if count > level.order_count {
                    return Err(BookError::Corrupted(format!(
                        "level {} links more orders than its count {}",
                        level.price, level.order_count
                    )));
                }
                let node = arena.get(key).ok_or_else(|| {
                    BookError::Corrupted(format!("level {} links freed slot {}", level.price, key))
                })?;
                let id = node.order_id();
                if self.index.handle(id).map(|h| h.key) != Some(key) {
                    return Err(BookError::Corrupted(format!("order {} queued but not indexed", id)));
                }
                if !node.resting || node.prev != prev {
                    return Err(BookError::Corrupted(format!("order {} has a stale queue marker", id)));
                }
                if node.side() != expected || node.price() != level.price {
                    return Err(BookError::Corrupted(format!(
                        "order {} ({} @ {}) queued on {} level {}",
                        id,
                        node.side(),
                        node.price(),
                        expected,
                        level.price
                    )));
                }
                if node.order.is_filled() {
                    return Err(BookError::Corrupted(format!("order {} rests with zero volume", id)));
                }
                volume += u128::from(node.volume());
                prev = Some(key);
            }

            if count != level.order_count || prev != level.tail {
                return Err(BookError::Corrupted(format!(
                    "level {} count/tail mismatch",
                    level.price
                )));
            }
            if volume != level.total_volume {
                return Err(BookError::Corrupted(format!(
                    "level {} caches volume {} but holds {}",
                    level.price, level.total_volume, volume
                )));
            }
            queued += count;
        }
        Ok(queued)
    }
}

impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot(self.config.snapshot_depth))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fill;

    const P100: u64 = 10_000_000_000;
    const P101: u64 = 10_100_000_000;

    fn resting_id(outcome: AddOutcome) -> OrderId {
        outcome.order_id().expect("order should rest")
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.len(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.capacity() >= 10_000);
        book.check_invariants().unwrap();
    }

    #[test]
    fn test_add_rejections_leave_book_untouched() {
        let mut book = OrderBook::new();

        assert_eq!(
            book.add(Decimal::ZERO, 10, Side::Buy).unwrap(),
            AddOutcome::Rejected(RejectReason::NonPositivePrice)
        );
        assert_eq!(
            book.add(Decimal::from(-5), 10, Side::Sell).unwrap(),
            AddOutcome::Rejected(RejectReason::NonPositivePrice)
        );
        assert_eq!(
            book.add(Decimal::new(1, 9), 10, Side::Sell).unwrap(),
            AddOutcome::Rejected(RejectReason::UnrepresentablePrice)
        );
        assert_eq!(
            book.add_ticks(P100, 0, Side::Sell).unwrap(),
            AddOutcome::Rejected(RejectReason::ZeroVolume)
        );

        assert!(book.is_empty());
        // No id was consumed by the rejections
        let id = resting_id(book.add_ticks(P100, 1, Side::Buy).unwrap());
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn test_decimal_and_tick_prices_agree() {
        let mut book = OrderBook::new();
        book.add(Decimal::new(1005, 1), 3, Side::Sell).unwrap();

        assert_eq!(book.best_ask(), Some(10_050_000_000));
        let buy = book.add_ticks(10_050_000_000, 3, Side::Buy).unwrap();
        assert!(buy.is_filled());
    }

    #[test]
    fn test_fills_report_maker_state() {
        let mut book = OrderBook::new();
        let a = resting_id(book.add_ticks(P100, 5, Side::Sell).unwrap());
        let b = resting_id(book.add_ticks(P101, 5, Side::Sell).unwrap());

        let outcome = book.add_ticks(P101, 8, Side::Buy).unwrap();
        assert_eq!(
            outcome.fills(),
            &[Fill::new(a, P100, 5, 0), Fill::new(b, P101, 3, 2)]
        );
        assert_eq!(outcome.filled_volume(), 8);
        book.check_invariants().unwrap();
    }

    #[test]
    fn test_cancel_middle_of_level() {
        let mut book = OrderBook::new();
        let a = resting_id(book.add_ticks(P100, 1, Side::Buy).unwrap());
        let b = resting_id(book.add_ticks(P100, 2, Side::Buy).unwrap());
        let c = resting_id(book.add_ticks(P100, 3, Side::Buy).unwrap());

        assert_eq!(book.cancel(b).unwrap().volume, 2);
        assert_eq!(book.volume_at(Side::Buy, P100), 4);

        let snapshot = book.snapshot(1);
        assert_eq!(snapshot.bids[0].orders, vec![(a, 1), (c, 3)]);
        book.check_invariants().unwrap();
    }

    #[test]
    fn test_cancel_not_resting_order_erases_it() {
        let mut book = OrderBook::new();
        // An indexed order that was never linked into a level
        let handle = book.index.insert(Side::Sell, P100, 4).unwrap();

        let cancelled = book.cancel(handle.id()).unwrap();
        assert_eq!(cancelled.volume, 4);
        assert!(book.is_empty());
        assert!(book.cancel(handle.id()).is_none());
    }

    #[test]
    fn test_amend_keeps_priority_and_totals() {
        let mut book = OrderBook::new();
        let a = resting_id(book.add_ticks(P100, 10, Side::Sell).unwrap());
        let b = resting_id(book.add_ticks(P100, 10, Side::Sell).unwrap());

        assert_eq!(
            book.amend_volume(a, 25),
            Some(Amendment::Updated { previous: 10, current: 25 })
        );
        assert_eq!(book.volume_at(Side::Sell, P100), 35);

        // a still trades first
        let outcome = book.market_order(Side::Buy, 5);
        assert_eq!(outcome.fills, vec![Fill::new(a, P100, 5, 20)]);

        assert_eq!(
            book.amend_volume(a, 1),
            Some(Amendment::Updated { previous: 20, current: 1 })
        );
        assert_eq!(book.volume_at(Side::Sell, P100), 11);
        assert_eq!(book.snapshot(1).asks[0].orders, vec![(a, 1), (b, 10)]);
        book.check_invariants().unwrap();
    }

    #[test]
    fn test_amend_to_zero_cancels() {
        let mut book = OrderBook::new();
        let a = resting_id(book.add_ticks(P100, 10, Side::Sell).unwrap());

        match book.amend_volume(a, 0) {
            Some(Amendment::Cancelled(order)) => assert_eq!(order.id, a),
            other => panic!("expected cancellation, got {:?}", other),
        }
        assert!(book.is_empty());
        assert_eq!(book.ask_levels(), 0);
        assert!(book.amend_volume(a, 0).is_none());
    }

    #[test]
    fn test_market_order_zero_volume_is_noop() {
        let mut book = OrderBook::new();
        book.add_ticks(P100, 10, Side::Sell).unwrap();

        assert_eq!(book.market_order(Side::Buy, 0), MarketOutcome::default());
        assert_eq!(book.volume_at(Side::Sell, P100), 10);
    }

    #[test]
    fn test_id_exhaustion_is_all_or_nothing() {
        let mut book = OrderBook::new();
        book.add_ticks(P100, 10, Side::Sell).unwrap();
        let root = book.state_root().unwrap();

        book.index.set_next_id(None);

        // Would fully fill, but is still refused before matching
        let result = book.add_ticks(P100, 3, Side::Buy);
        assert_eq!(result, Err(BookError::IdSpaceExhausted));
        assert_eq!(book.state_root().unwrap(), root);
        assert_eq!(book.volume_at(Side::Sell, P100), 10);

        // Market orders never need an id
        assert_eq!(book.market_order(Side::Buy, 3).unfilled, 0);
        assert_eq!(book.volume_at(Side::Sell, P100), 7);
    }

    #[test]
    fn test_clear_retires_ids() {
        let mut book = OrderBook::new();
        book.add_ticks(P100, 1, Side::Buy).unwrap();
        book.add_ticks(P101, 1, Side::Sell).unwrap();

        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.bid_levels() + book.ask_levels(), 0);

        let id = resting_id(book.add_ticks(P100, 1, Side::Buy).unwrap());
        assert_eq!(id.get(), 3);
    }

    #[test]
    fn test_display_prints_top_levels() {
        let mut book = OrderBook::with_config(BookConfig {
            order_capacity: 16,
            snapshot_depth: 1,
        });
        book.add_ticks(P100, 2, Side::Buy).unwrap();
        book.add_ticks(9_900_000_000, 2, Side::Buy).unwrap();
        book.add_ticks(P101, 7, Side::Sell).unwrap();

        let text = book.to_string();
        assert!(text.contains("BIDS (top 1):"));
        assert!(text.contains(" price=100 total=2"));
        assert!(!text.contains("price=99"));
        assert!(text.contains(" price=101 total=7"));
        assert!(text.contains("\tid=3 volume=7"));
    }

    #[test]
    fn test_state_root_tracks_book_contents() {
        let mut a = OrderBook::new();
        let mut b = OrderBook::new();
        assert_eq!(a.state_root().unwrap(), b.state_root().unwrap());

        a.add_ticks(P100, 5, Side::Buy).unwrap();
        assert_ne!(a.state_root().unwrap(), b.state_root().unwrap());

        b.add_ticks(P100, 5, Side::Buy).unwrap();
        assert_eq!(a.state_root_hex().unwrap(), b.state_root_hex().unwrap());

        b.amend_volume(OrderId::new(1).unwrap(), 4).unwrap();
        assert_ne!(a.state_root().unwrap(), b.state_root().unwrap());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has no level")]
    fn test_amend_resting_order_without_level_is_caught() {
        let mut book = OrderBook::new();
        // Marked resting but never linked into a level
        let handle = book.index.insert(Side::Sell, P100, 4).unwrap();
        book.index.arena_mut()[handle.key].resting = true;

        book.amend_volume(handle.id(), 6);
    }

    #[test]
    fn test_level_total_beyond_single_order_volume() {
        let mut book = OrderBook::new();
        let big = resting_id(book.add_ticks(P100, u64::MAX, Side::Sell).unwrap());
        let small = resting_id(book.add_ticks(P100, 1, Side::Sell).unwrap());

        let expected = u128::from(u64::MAX) + 1;
        assert_eq!(book.volume_at(Side::Sell, P100), expected);
        assert_eq!(book.snapshot(1).asks[0].total_volume, expected);
        book.check_invariants().unwrap();

        // Draining the big order brings the level back into u64 range
        let outcome = book.market_order(Side::Buy, u64::MAX);
        assert_eq!(outcome.fills, vec![Fill::new(big, P100, u64::MAX, 0)]);
        assert_eq!(book.volume_at(Side::Sell, P100), 1);
        assert!(book.contains(small));
        book.check_invariants().unwrap();
    }

    #[test]
    fn test_amend_up_to_max_next_to_another_order() {
        let mut book = OrderBook::new();
        let a = resting_id(book.add_ticks(P100, 10, Side::Sell).unwrap());
        resting_id(book.add_ticks(P100, 10, Side::Sell).unwrap());

        assert_eq!(
            book.amend_volume(a, u64::MAX),
            Some(Amendment::Updated {
                previous: 10,
                current: u64::MAX
            })
        );
        assert_eq!(book.volume_at(Side::Sell, P100), u128::from(u64::MAX) + 10);
        book.check_invariants().unwrap();

        book.amend_volume(a, 5).unwrap();
        assert_eq!(book.volume_at(Side::Sell, P100), 15);
        book.check_invariants().unwrap();
    }
}
