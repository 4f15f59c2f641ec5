// Company - a partner company account with OTP-based password reset

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::status::ApprovalStatus;
use crate::document::Document;

/// OTP validity window in seconds.
const RESET_OTP_TTL_SECS: i64 = 10 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub contact_person: Option<String>,
    pub password_hash: String,
    pub status: ApprovalStatus,
    pub document_path: Option<String>,
    pub profile_image_path: Option<String>,
    /// Pending password-reset code, if any.
    pub reset_otp: Option<String>,
    /// Unix timestamp past which the OTP is dead.
    pub reset_otp_expires: Option<i64>,
}

impl Company {
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        Company {
            name,
            email,
            phone,
            contact_person: None,
            password_hash,
            status: ApprovalStatus::Pending,
            document_path: None,
            profile_image_path: None,
            reset_otp: None,
            reset_otp_expires: None,
        }
    }

    /// Issue a fresh 6-digit reset code with a 10-minute expiry. Any prior
    /// code is replaced.
    pub fn issue_reset_otp(&mut self) -> String {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        self.reset_otp = Some(code.clone());
        self.reset_otp_expires = Some(Utc::now().timestamp() + RESET_OTP_TTL_SECS);
        code
    }

    pub fn reset_otp_matches(&self, code: &str, now: i64) -> bool {
        match (&self.reset_otp, self.reset_otp_expires) {
            (Some(otp), Some(expires)) => otp == code && now <= expires,
            _ => false,
        }
    }

    pub fn clear_reset_otp(&mut self) {
        self.reset_otp = None;
        self.reset_otp_expires = None;
    }
}

impl Document for Company {
    fn doc_type() -> &'static str {
        "company"
    }

    fn index_keys(&self) -> Vec<(String, String)> {
        vec![("email".to_string(), self.email.to_lowercase())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Company {
        Company::new(
            "Acme Skills".into(),
            "hr@acme.test".into(),
            "9876543210".into(),
            "hash".into(),
        )
    }

    #[test]
    fn otp_is_six_digits_and_expires() {
        let mut company = sample();
        let code = company.issue_reset_otp();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let now = Utc::now().timestamp();
        assert!(company.reset_otp_matches(&code, now));
        assert!(!company.reset_otp_matches(&code, now + RESET_OTP_TTL_SECS + 1));
        assert!(!company.reset_otp_matches("000001", now) || code == "000001");
    }

    #[test]
    fn cleared_otp_never_matches() {
        let mut company = sample();
        let code = company.issue_reset_otp();
        company.clear_reset_otp();
        assert!(!company.reset_otp_matches(&code, Utc::now().timestamp()));
    }
}
