// Lifecycle state machines for registration approval and kit orders

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Approval status for center/company registrations and payment proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    pub fn can_transition(self, to: ApprovalStatus) -> bool {
        matches!(
            (self, to),
            (ApprovalStatus::Pending, ApprovalStatus::Approved)
                | (ApprovalStatus::Pending, ApprovalStatus::Rejected)
        )
    }

    /// Single place approval transitions happen; invalid moves are a 400.
    pub fn transition(self, to: ApprovalStatus) -> AppResult<ApprovalStatus> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(AppError::BadRequest(format!(
                "Cannot move approval status from {} to {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

/// Kit order fulfilment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Rejected,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Processing)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }

    pub fn transition(self, to: OrderStatus) -> AppResult<OrderStatus> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(AppError::BadRequest(format!(
                "Cannot move order status from {} to {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_only_moves_out_of_pending() {
        assert!(ApprovalStatus::Pending.can_transition(ApprovalStatus::Approved));
        assert!(ApprovalStatus::Pending.can_transition(ApprovalStatus::Rejected));
        assert!(!ApprovalStatus::Approved.can_transition(ApprovalStatus::Pending));
        assert!(!ApprovalStatus::Rejected.can_transition(ApprovalStatus::Approved));
        assert!(ApprovalStatus::Rejected
            .transition(ApprovalStatus::Approved)
            .is_err());
    }

    #[test]
    fn order_status_follows_fulfilment_chain() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Processing));
        assert!(Processing.can_transition(Shipped));
        assert!(Shipped.can_transition(Delivered));
        assert!(Pending.can_transition(Cancelled));
        assert!(!Delivered.can_transition(Cancelled));
        assert!(!Shipped.can_transition(Processing));
        assert!(Shipped.transition(Cancelled).is_err());
    }

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"delivered\""
        );
    }
}
