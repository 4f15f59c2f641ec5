// Kit order - a snapshot of line items plus verified totals

use serde::{Deserialize, Serialize};

use super::status::OrderStatus;
use crate::document::Document;
use crate::pricing::{OrderLine, OrderTotals};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitOrder {
    pub center_id: i64,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    /// Unix timestamp at submission.
    pub placed_at: i64,
}

impl KitOrder {
    pub fn new(center_id: i64, items: Vec<OrderLine>, totals: OrderTotals, placed_at: i64) -> Self {
        KitOrder {
            center_id,
            items,
            totals,
            status: OrderStatus::Pending,
            placed_at,
        }
    }
}

impl Document for KitOrder {
    fn doc_type() -> &'static str {
        "kit_order"
    }
}
