// Center - a franchise training center with an approval-gated lifecycle

use serde::{Deserialize, Serialize};

use super::status::ApprovalStatus;
use crate::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub password_hash: String,
    pub status: ApprovalStatus,
    /// Prepaid balance kit orders draw against, in rupees.
    pub wallet_balance: f64,
    pub document_path: Option<String>,
    pub profile_image_path: Option<String>,
}

impl Center {
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        Center {
            name,
            email,
            phone,
            address: None,
            password_hash,
            status: ApprovalStatus::Pending,
            wallet_balance: 0.0,
            document_path: None,
            profile_image_path: None,
        }
    }

    /// Admin-seeded centers skip the approval queue.
    pub fn new_approved(name: String, email: String, phone: String, password_hash: String) -> Self {
        Center {
            status: ApprovalStatus::Approved,
            ..Center::new(name, email, phone, password_hash)
        }
    }
}

impl Document for Center {
    fn doc_type() -> &'static str {
        "center"
    }

    fn index_keys(&self) -> Vec<(String, String)> {
        vec![("email".to_string(), self.email.to_lowercase())]
    }
}
