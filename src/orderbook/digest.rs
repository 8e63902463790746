//! State root: a SHA-256 digest of every resting order.
//!
//! Each order is SSZ-encoded as a fixed-size record and fed to the hasher
//! in book order (bids best-first, then asks best-first, FIFO within a
//! level). Two books that went through the same operation sequence always
//! produce the same root.

use sha2::{Digest, Sha256};
use slab::Slab;
use ssz_rs::prelude::*;

use crate::error::BookError;
use crate::orderbook::{BookSide, OrderNode, PriceKey};

/// SSZ layout of one resting order: 8+1+8+8 = 25 bytes
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RestingRecord {
    pub id: u64,
    pub side: u8,
    pub price: u64,
    pub volume: u64,
}

impl RestingRecord {
    pub fn from_node(node: &OrderNode) -> Self {
        Self {
            id: node.order_id().get(),
            side: node.side().to_u8(),
            price: node.price(),
            volume: node.volume(),
        }
    }
}

pub(crate) fn state_root<B: PriceKey, A: PriceKey>(
    bids: &BookSide<B>,
    asks: &BookSide<A>,
    arena: &Slab<OrderNode>,
) -> Result<[u8; 32], BookError> {
    let mut hasher = Sha256::new();
    absorb_side(&mut hasher, bids, arena)?;
    absorb_side(&mut hasher, asks, arena)?;

    let mut root = [0u8; 32];
    root.copy_from_slice(&hasher.finalize());
    Ok(root)
}

fn absorb_side<K: PriceKey>(
    hasher: &mut Sha256,
    side: &BookSide<K>,
    arena: &Slab<OrderNode>,
) -> Result<(), BookError> {
    // Level count separates the two sides in the stream
    hasher.update((side.len() as u64).to_le_bytes());
    for level in side.levels() {
        for key in level.keys(arena) {
            let record = RestingRecord::from_node(&arena[key]);
            let bytes = ssz_rs::serialize(&record).map_err(|e| BookError::Encoding(format!("{:?}", e)))?;
            hasher.update(&bytes);
        }
    }
    Ok(())
}
