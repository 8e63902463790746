//! FIFO queue of the orders resting at one price.
//!
//! ```text
//! head (oldest) <-> ... <-> tail (newest)
//! ```
//!
//! The queue is intrusive: the level only keeps the two end keys, a count
//! and the summed volume, while the links themselves live in the
//! [`OrderNode`]s inside the slab. Appending and unlinking any member are
//! both O(1). A partial fill or an amendment changes a node's volume but
//! never its links, so the order keeps its place in line.
//!
//! Every key handed to a level must be live in the slab it is given; a
//! missing key means the book is corrupt and panics.

use slab::Slab;

use crate::orderbook::OrderNode;

#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price in ticks
    pub price: u64,

    /// Sum of the remaining volume of every queued order. Wider than a
    /// single order's volume so that any number of maximal orders fits.
    pub total_volume: u128,

    /// Oldest order
    pub head: Option<usize>,

    /// Newest order
    pub tail: Option<usize>,

    pub order_count: usize,
}

#[track_caller]
fn node_mut(slab: &mut Slab<OrderNode>, key: usize) -> &mut OrderNode {
    match slab.get_mut(key) {
        Some(node) => node,
        None => panic!("price level refers to vacant slab key {}", key),
    }
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_volume: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Queue `key` behind every order already at this price.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let old_tail = self.tail;

        let node = node_mut(slab, key);
        debug_assert!(node.is_unlinked(), "order {} is already queued", node.order_id());
        debug_assert_eq!(node.price(), self.price);
        node.prev = old_tail;
        node.next = None;
        node.resting = true;
        let volume = node.volume();

        match old_tail {
            Some(tail) => node_mut(slab, tail).next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.order_count += 1;
        self.total_volume += u128::from(volume);
    }

    /// Unlink `key` from wherever it sits in the queue.
    ///
    /// Returns the volume the order still had, which is also what the
    /// level's total drops by.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = node_mut(slab, key);
        debug_assert!(node.resting, "order {} is not queued", node.order_id());
        let (prev, next, volume) = (node.prev.take(), node.next.take(), node.volume());
        node.resting = false;

        match prev {
            Some(p) => node_mut(slab, p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => node_mut(slab, n).prev = prev,
            None => self.tail = prev,
        }

        self.order_count -= 1;
        self.total_volume -= u128::from(volume);
        volume
    }

    /// Oldest order, i.e. the next to match
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Account for volume leaving a queued order (partial fill, amendment down)
    pub fn reduce_volume(&mut self, by: u64) {
        debug_assert!(u128::from(by) <= self.total_volume, "level {} volume underflow", self.price);
        self.total_volume -= u128::from(by);
    }

    /// Account for an amendment up
    pub fn increase_volume(&mut self, by: u64) {
        self.total_volume += u128::from(by);
    }

    /// Walk the queue head to tail
    pub fn keys<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelKeys<'a> {
        LevelKeys {
            slab,
            cursor: self.head,
        }
    }
}

/// Slab keys of a level in execution order. See [`PriceLevel::keys`].
pub struct LevelKeys<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl Iterator for LevelKeys<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let key = self.cursor?;
        self.cursor = self.slab.get(key).and_then(|node| node.next);
        Some(key)
    }
}
