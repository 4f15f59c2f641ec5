// TDS certificate simulation - deduction arithmetic

use serde::{Deserialize, Serialize};

use super::validate::{is_valid, FieldKind};
use crate::error::{AppError, AppResult};
use crate::pricing::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdsInput {
    pub deductor_tan: String,
    pub deductee_pan: String,
    pub payment_amount: f64,
    pub tds_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdsResult {
    pub payment_amount: f64,
    pub tds_amount: f64,
    pub net_payment: f64,
}

pub fn compute_tds(input: &TdsInput) -> AppResult<TdsResult> {
    if !is_valid(FieldKind::Tan, &input.deductor_tan) {
        return Err(AppError::Validation("Invalid deductor TAN".to_string()));
    }
    if !is_valid(FieldKind::Pan, &input.deductee_pan) {
        return Err(AppError::Validation("Invalid deductee PAN".to_string()));
    }
    if input.payment_amount < 0.0 {
        return Err(AppError::Validation(
            "Payment amount cannot be negative".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&input.tds_rate) {
        return Err(AppError::Validation(
            "TDS rate must be between 0 and 100".to_string(),
        ));
    }

    let tds_amount = round2(input.payment_amount * input.tds_rate / 100.0);

    Ok(TdsResult {
        payment_amount: round2(input.payment_amount),
        tds_amount,
        net_payment: round2(input.payment_amount - tds_amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: f64, rate: f64) -> TdsInput {
        TdsInput {
            deductor_tan: "DELA12345B".into(),
            deductee_pan: "ABCDE1234F".into(),
            payment_amount: amount,
            tds_rate: rate,
        }
    }

    #[test]
    fn deducts_at_rate() {
        let result = compute_tds(&input(50000.0, 10.0)).unwrap();
        assert_eq!(result.tds_amount, 5000.0);
        assert_eq!(result.net_payment, 45000.0);
    }

    #[test]
    fn validates_identifiers_and_rate() {
        let mut bad = input(1000.0, 10.0);
        bad.deductee_pan = "NOPE".into();
        assert!(compute_tds(&bad).is_err());

        assert!(compute_tds(&input(1000.0, 101.0)).is_err());
        assert!(compute_tds(&input(-1.0, 10.0)).is_err());
    }
}
