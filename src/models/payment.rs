// Payment proof - manual UTR reconciliation instead of a gateway

use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::status::ApprovalStatus;
use crate::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProof {
    pub student_id: String,
    /// Bank-issued Unique Transaction Reference quoted by the student.
    pub utr: String,
    pub amount: f64,
    pub screenshot_path: String,
    /// Cart contents at checkout time.
    pub items: Vec<CartItem>,
    pub status: ApprovalStatus,
    pub review_note: Option<String>,
    pub submitted_at: i64,
}

impl Document for PaymentProof {
    fn doc_type() -> &'static str {
        "payment_proof"
    }
}
