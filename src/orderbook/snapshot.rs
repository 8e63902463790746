//! Read-only view of the top of the book.

use std::fmt;

use slab::Slab;

use crate::orderbook::{BookSide, OrderNode, PriceKey};
use crate::types::price::format_ticks;
use crate::types::OrderId;

/// One price level as seen from outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelView {
    /// Price in fixed-point ticks
    pub price: u64,
    pub total_volume: u128,
    /// `(id, volume)` in queue (execution) order
    pub orders: Vec<(OrderId, u64)>,
}

/// Top `depth` levels of each side, best first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub depth: usize,
    pub bids: Vec<LevelView>,
    pub asks: Vec<LevelView>,
}

impl BookSnapshot {
    pub(crate) fn capture<B: PriceKey, A: PriceKey>(
        bids: &BookSide<B>,
        asks: &BookSide<A>,
        arena: &Slab<OrderNode>,
        depth: usize,
    ) -> Self {
        Self {
            depth,
            bids: capture_side(bids, arena, depth),
            asks: capture_side(asks, arena, depth),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

fn capture_side<K: PriceKey>(side: &BookSide<K>, arena: &Slab<OrderNode>, depth: usize) -> Vec<LevelView> {
    side.levels()
        .take(depth)
        .map(|level| LevelView {
            price: level.price,
            total_volume: level.total_volume,
            orders: level
                .keys(arena)
                .map(|key| {
                    let node = &arena[key];
                    (node.order_id(), node.volume())
                })
                .collect(),
        })
        .collect()
}

impl fmt::Display for BookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, levels) in [("BIDS", &self.bids), ("ASKS", &self.asks)] {
            writeln!(f, "{} (top {}):", title, self.depth)?;
            for level in levels {
                writeln!(
                    f,
                    " price={} total={}",
                    format_ticks(level.price),
                    level.total_volume
                )?;
                for (id, volume) in &level.orders {
                    writeln!(f, "\tid={} volume={}", id, volume)?;
                }
            }
        }
        Ok(())
    }
}
