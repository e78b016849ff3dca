//! Custom actions for the Inventory actor.
//!
//! Stock is written through actions rather than whole-entity saves so that a
//! batch of location writes for one sku is applied in a single actor turn, and
//! so that the first write for an unknown sku can materialize its stock entry
//! (see [`ActorEntity::vacant`](crate::framework::ActorEntity::vacant)).

use crate::model::InventoryRecord;

/// Custom actions for [`SkuStock`](crate::model::SkuStock) entities.
#[derive(Debug, Clone)]
pub enum StockAction {
    /// Upserts each record by location, in order.
    ///
    /// # Errors
    /// Rejected as a whole if any write has a negative quantity or targets another sku.
    Apply(Vec<InventoryRecord>),
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone, PartialEq)]
pub enum StockActionResult {
    /// Number of location records written.
    Apply(usize),
}
