//! Order book storage and the public book facade.
//!
//! ## Architecture
//!
//! - **Slab arena** ([`MasterIndex`]): owns every order; O(1) insert, lookup, removal
//! - **Price levels** ([`BookSide`]): `BTreeMap` of FIFO queues, best price first
//! - **Intrusive queues** ([`PriceLevel`] + [`OrderNode`]): O(1) unlink from anywhere
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order (resting) | O(log L) |
//! | Cancel order by ID | O(1) avg + O(log L) if the level empties |
//! | Amend volume | O(1) avg + O(log L) |
//! | Best bid/ask | O(log L) |
//! | Match order | O(k + m log L) |
//!
//! L = price levels on a side, k = orders touched, m = levels emptied.

pub mod node;
pub mod level;
pub mod index;
pub mod side;
pub mod snapshot;
pub mod digest;
pub mod book;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use index::{MasterIndex, OrderHandle};
pub use side::{AskSide, BidSide, BookSide, PriceKey};
pub use snapshot::{BookSnapshot, LevelView};
pub use book::OrderBook;
