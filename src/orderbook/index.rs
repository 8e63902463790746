//! Master index: the single owner of order storage.
//!
//! Orders live in a `Slab<OrderNode>` arena. A `HashMap` from order id to
//! slab key gives average O(1) lookup, and the node's link fields give the
//! order's current position in its price level.
//!
//! Price levels hold slab keys only. Outside the crate an order is reached
//! through its [`OrderId`] or an [`OrderHandle`], never a reference.

use std::collections::HashMap;

use slab::Slab;

use crate::error::BookError;
use crate::orderbook::OrderNode;
use crate::types::{Order, OrderId, Side};

/// Generation-checked arena handle.
///
/// The order id doubles as the generation tag: slab slots are reused after
/// removal, but ids never are, so a handle to a removed order can never
/// resolve to whatever order took over its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle {
    pub(crate) key: usize,
    pub(crate) id: OrderId,
}

impl OrderHandle {
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }
}

/// Owns every resting order for its whole lifetime.
#[derive(Debug)]
pub struct MasterIndex {
    /// Order storage; key = slab index
    nodes: Slab<OrderNode>,

    /// Order id to slab key
    by_id: HashMap<OrderId, usize>,

    /// Id the next insert will issue; `None` once the space is used up
    next_id: Option<OrderId>,

    bid_count: usize,
    ask_count: usize,
}

impl Default for MasterIndex {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl MasterIndex {
    /// Create an index with pre-allocated storage for `capacity` orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
            next_id: OrderId::new(1),
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// The id the next [`insert`](Self::insert) will issue.
    ///
    /// # Errors
    ///
    /// [`BookError::IdSpaceExhausted`] once every `u64` id has been used.
    pub fn peek_next_id(&self) -> Result<OrderId, BookError> {
        self.next_id.ok_or(BookError::IdSpaceExhausted)
    }

    /// Allocate a new (unlinked) order and assign it the next id.
    ///
    /// Nothing is allocated or consumed when validation fails.
    pub fn insert(&mut self, side: Side, price: u64, volume: u64) -> Result<OrderHandle, BookError> {
        let id = self.peek_next_id()?;
        let order = Order::new(id, side, price, volume)?;

        let key = self.nodes.insert(OrderNode::new(order));
        self.by_id.insert(id, key);
        self.next_id = id.next();

        match side {
            Side::Buy => self.bid_count += 1,
            Side::Sell => self.ask_count += 1,
        }

        Ok(OrderHandle { key, id })
    }

    /// Look up an order by id
    #[inline]
    pub fn lookup(&self, id: OrderId) -> Option<&Order> {
        self.by_id.get(&id).map(|&key| &self.nodes[key].order)
    }

    /// Resolve an id to its arena handle
    #[inline]
    pub fn handle(&self, id: OrderId) -> Option<OrderHandle> {
        self.by_id.get(&id).map(|&key| OrderHandle { key, id })
    }

    /// Resolve a handle; `None` if the order it named is gone
    #[inline]
    pub fn node(&self, handle: OrderHandle) -> Option<&OrderNode> {
        self.nodes
            .get(handle.key)
            .filter(|node| node.order_id() == handle.id)
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Remove and deallocate an order.
    ///
    /// The caller must already have unlinked it from its price level.
    pub fn erase(&mut self, handle: OrderHandle) -> Option<Order> {
        let node = self.node(handle)?;
        debug_assert!(node.is_unlinked(), "erasing a linked order");
        let side = node.side();

        self.by_id.remove(&handle.id);
        match side {
            Side::Buy => self.bid_count -= 1,
            Side::Sell => self.ask_count -= 1,
        }

        Some(self.nodes.remove(handle.key).order)
    }

    /// Overwrite an order's volume in place.
    ///
    /// # Returns
    ///
    /// The previous volume.
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidVolume`] for zero; zero volume must go through
    /// removal instead. An unknown id is reported as `Ok(None)`.
    pub fn mutate_volume(&mut self, id: OrderId, new_volume: u64) -> Result<Option<u64>, BookError> {
        if new_volume == 0 {
            return Err(BookError::InvalidVolume);
        }
        let Some(&key) = self.by_id.get(&id) else {
            return Ok(None);
        };

        let order = &mut self.nodes[key].order;
        let previous = order.volume;
        order.volume = new_volume;
        Ok(Some(previous))
    }

    /// Iterate over every order in the index (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &OrderNode> + '_ {
        self.nodes.iter().map(|(_, node)| node)
    }

    // ========================================================================
    // Arena access (for price levels and the matcher)
    // ========================================================================

    #[inline]
    pub(crate) fn arena(&self) -> &Slab<OrderNode> {
        &self.nodes
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut Slab<OrderNode> {
        &mut self.nodes
    }

    #[cfg(test)]
    pub(crate) fn set_next_id(&mut self, next: Option<OrderId>) {
        self.next_id = next;
    }

    /// Handle for the node in slot `key`
    #[inline]
    pub(crate) fn handle_at(&self, key: usize) -> Option<OrderHandle> {
        self.nodes.get(key).map(|node| OrderHandle {
            key,
            id: node.order_id(),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
