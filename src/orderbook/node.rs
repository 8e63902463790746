//! Arena entry for one order.
//!
//! Each resting order occupies one slab slot. Besides the order itself the
//! slot carries its links inside the price level queue: `prev` points
//! toward the head (older), `next` toward the tail (newer). Links are slab
//! keys.
//!
//! A lone order in a level has no neighbours, which looks the same as an
//! order that is in no level at all, so `resting` records which of the two
//! it is.

use std::fmt;

use crate::types::price::format_ticks;
use crate::types::{Order, OrderId, Side};

#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,

    /// Older neighbour in the level queue
    pub prev: Option<usize>,

    /// Newer neighbour in the level queue
    pub next: Option<usize>,

    /// Set by `PriceLevel::push_back`, cleared by `PriceLevel::remove`
    pub resting: bool,
}

impl OrderNode {
    /// Wrap an order; the node starts outside any level
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            prev: None,
            next: None,
            resting: false,
        }
    }

    #[inline]
    pub fn is_unlinked(&self) -> bool {
        !self.resting
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    /// Remaining (unmatched) volume
    #[inline]
    pub fn volume(&self) -> u64 {
        self.order.volume
    }

    /// Take up to `quantity` off the order; returns what was taken
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }
}

impl fmt::Display for OrderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{id={}, price={}, volume={}, side={}, resting={}}}",
            self.order.id,
            format_ticks(self.order.price),
            self.order.volume,
            self.order.side,
            self.resting
        )
    }
}
