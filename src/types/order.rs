//! Order types for the limit order book.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 ticks scaled by 10^8 (see [`SCALE`](super::price::SCALE)).
//! Volumes are plain integer units.

use std::fmt;
use std::num::NonZeroU64;

use crate::error::BookError;
use crate::types::price::format_ticks;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Side from the boolean flag used by simple callers
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// Crossing predicate for an incoming order on this side.
    ///
    /// `limit` is the incoming order's price, `best` the best resting price
    /// on the opposite side. A buy crosses any ask at or below its limit, a
    /// sell crosses any bid at or above it. Equal prices cross.
    ///
    /// ```
    /// use limit_order_book::Side;
    ///
    /// assert!(Side::Buy.crosses(100, 100));
    /// assert!(Side::Buy.crosses(100, 99));
    /// assert!(!Side::Buy.crosses(100, 101));
    /// assert!(Side::Sell.crosses(100, 101));
    /// assert!(!Side::Sell.crosses(100, 99));
    /// ```
    #[inline]
    pub fn crosses(self, limit: u64, best: u64) -> bool {
        match self {
            Side::Buy => best <= limit,
            Side::Sell => best >= limit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// OrderId
// ============================================================================

/// Identifier of a resting order.
///
/// Issued by the book starting at 1, strictly increasing, never reused.
/// Zero is not a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(NonZeroU64);

impl OrderId {
    /// Wrap a raw id; `None` for zero
    #[inline]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw id value
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The id issued after this one, `None` once the space is used up
    #[inline]
    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// Only the master index creates and owns these; callers see borrows or
/// copies handed back by cancellation.
///
/// ## Example
///
/// ```
/// use limit_order_book::{Order, OrderId, Side};
///
/// let id = OrderId::new(1).unwrap();
/// let order = Order::new(id, Side::Buy, 10_000_000_000, 10).unwrap();
/// assert_eq!(order.volume, 10);
///
/// assert!(Order::new(id, Side::Buy, 0, 10).is_err());
/// assert!(Order::new(id, Side::Buy, 10_000_000_000, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique order identifier (assigned by the book)
    pub id: OrderId,

    /// Buy or Sell
    pub side: Side,

    /// Price in fixed-point ticks (scaled by 10^8)
    pub price: u64,

    /// Remaining volume; always > 0 while resting
    pub volume: u64,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    ///
    /// * [`BookError::InvalidPrice`] - `price` is zero
    /// * [`BookError::InvalidVolume`] - `volume` is zero
    pub fn new(id: OrderId, side: Side, price: u64, volume: u64) -> Result<Self, BookError> {
        if price == 0 {
            return Err(BookError::InvalidPrice(price));
        }
        if volume == 0 {
            return Err(BookError::InvalidVolume);
        }
        Ok(Self {
            id,
            side,
            price,
            volume,
        })
    }

    /// Reduce the volume by a fill.
    ///
    /// # Returns
    ///
    /// The actual quantity filled (capped at the remaining volume)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.volume);
        self.volume -= actual_fill;
        actual_fill
    }

    /// Check if the order has no volume left
    pub fn is_filled(&self) -> bool {
        self.volume == 0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{id={}, price={}, volume={}, side={}}}",
            self.id,
            format_ticks(self.price),
            self.volume,
            self.side
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
