// Kit order totals - recomputed and verified server-side, never trusted
// from the client

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AppError, AppResult};

/// Bulk discount tiers by total ordered quantity.
const BULK_TIER_LARGE_QTY: u32 = 50;
const BULK_TIER_LARGE_PCT: f64 = 10.0;
const BULK_TIER_SMALL_QTY: u32 = 20;
const BULK_TIER_SMALL_PCT: f64 = 5.0;

/// Combination discount when the order spans enough distinct courses.
const COMBINATION_MIN_COURSES: usize = 3;
const COMBINATION_PCT: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub course_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub gross: f64,
    pub bulk_discount: f64,
    pub combination_discount: f64,
    pub payable: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the totals sub-document from line items alone.
pub fn compute_totals(items: &[OrderLine]) -> AppResult<OrderTotals> {
    if items.is_empty() {
        return Err(AppError::Validation("Order has no line items".to_string()));
    }

    let mut gross = 0.0;
    let mut total_qty: u32 = 0;
    let mut courses: HashSet<i64> = HashSet::new();

    for line in items {
        if line.quantity == 0 {
            return Err(AppError::Validation(format!(
                "Line for course {} has zero quantity",
                line.course_id
            )));
        }
        if line.unit_price < 0.0 {
            return Err(AppError::Validation(format!(
                "Line for course {} has a negative unit price",
                line.course_id
            )));
        }
        gross += line.unit_price * line.quantity as f64;
        total_qty += line.quantity;
        courses.insert(line.course_id);
    }

    let bulk_pct = if total_qty >= BULK_TIER_LARGE_QTY {
        BULK_TIER_LARGE_PCT
    } else if total_qty >= BULK_TIER_SMALL_QTY {
        BULK_TIER_SMALL_PCT
    } else {
        0.0
    };

    let combination_pct = if courses.len() >= COMBINATION_MIN_COURSES {
        COMBINATION_PCT
    } else {
        0.0
    };

    let gross = round2(gross);
    let bulk_discount = round2(gross * bulk_pct / 100.0);
    let combination_discount = round2(gross * combination_pct / 100.0);
    let payable = round2(gross - bulk_discount - combination_discount);

    Ok(OrderTotals {
        gross,
        bulk_discount,
        combination_discount,
        payable,
    })
}

/// Reject client-submitted totals that disagree with the recomputation.
/// Comparison is at paisa precision.
pub fn verify_totals(items: &[OrderLine], claimed: &OrderTotals) -> AppResult<OrderTotals> {
    let computed = compute_totals(items)?;

    let paise = |v: f64| (v * 100.0).round() as i64;
    if paise(claimed.gross) != paise(computed.gross)
        || paise(claimed.bulk_discount) != paise(computed.bulk_discount)
        || paise(claimed.combination_discount) != paise(computed.combination_discount)
        || paise(claimed.payable) != paise(computed.payable)
    {
        return Err(AppError::Validation(format!(
            "Submitted totals do not match: expected payable {:.2}, got {:.2}",
            computed.payable, claimed.payable
        )));
    }

    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(course_id: i64, quantity: u32, unit_price: f64) -> OrderLine {
        OrderLine {
            course_id,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn small_order_has_no_discounts() {
        let totals = compute_totals(&[line(1, 2, 500.0)]).unwrap();
        assert_eq!(totals.gross, 1000.0);
        assert_eq!(totals.bulk_discount, 0.0);
        assert_eq!(totals.combination_discount, 0.0);
        assert_eq!(totals.payable, 1000.0);
    }

    #[test]
    fn bulk_tiers_apply_on_total_quantity() {
        let totals = compute_totals(&[line(1, 20, 100.0)]).unwrap();
        assert_eq!(totals.bulk_discount, 100.0); // 5% of 2000
        assert_eq!(totals.payable, 1900.0);

        let totals = compute_totals(&[line(1, 30, 100.0), line(2, 25, 100.0)]).unwrap();
        assert_eq!(totals.gross, 5500.0);
        assert_eq!(totals.bulk_discount, 550.0); // 10% at 55 units
    }

    #[test]
    fn combination_discount_needs_three_distinct_courses() {
        let two = compute_totals(&[line(1, 1, 100.0), line(2, 1, 100.0)]).unwrap();
        assert_eq!(two.combination_discount, 0.0);

        let three =
            compute_totals(&[line(1, 1, 100.0), line(2, 1, 100.0), line(3, 1, 100.0)]).unwrap();
        assert_eq!(three.combination_discount, 15.0); // 5% of 300
        assert_eq!(three.payable, 285.0);
    }

    #[test]
    fn discounts_stack() {
        // 60 units across 3 courses: 10% bulk + 5% combination
        let totals =
            compute_totals(&[line(1, 20, 100.0), line(2, 20, 100.0), line(3, 20, 100.0)]).unwrap();
        assert_eq!(totals.gross, 6000.0);
        assert_eq!(totals.bulk_discount, 600.0);
        assert_eq!(totals.combination_discount, 300.0);
        assert_eq!(totals.payable, 5100.0);
    }

    #[test]
    fn rejects_empty_and_degenerate_lines() {
        assert!(compute_totals(&[]).is_err());
        assert!(compute_totals(&[line(1, 0, 100.0)]).is_err());
        assert!(compute_totals(&[line(1, 1, -5.0)]).is_err());
    }

    #[test]
    fn verify_rejects_tampered_totals() {
        let items = [line(1, 2, 500.0)];
        let mut claimed = compute_totals(&items).unwrap();
        assert!(verify_totals(&items, &claimed).is_ok());

        claimed.payable = 1.0;
        assert!(verify_totals(&items, &claimed).is_err());
    }
}
