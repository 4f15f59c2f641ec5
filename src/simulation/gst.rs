// GST tax arithmetic for the e-invoice simulation. Pure functions,
// recomputed on every edit; nothing here touches the store.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::pricing::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub gstin: Option<String>,
    /// Two-digit state code, e.g. "27" for Maharashtra.
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub cgst_rate: f64,
    pub sgst_rate: f64,
    pub igst_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstInvoice {
    pub supplier: Party,
    pub recipient: Party,
    pub items: Vec<GstLineItem>,
}

/// Per-line computed amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineTax {
    pub taxable: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub igst_amount: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// True when supplier and recipient share a state: CGST+SGST applies,
    /// otherwise IGST.
    pub intrastate: bool,
    pub lines: Vec<LineTax>,
    pub taxable: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub igst_amount: f64,
    pub grand_total: f64,
}

pub fn compute_line(item: &GstLineItem, intrastate: bool) -> AppResult<LineTax> {
    if item.quantity <= 0.0 {
        return Err(AppError::Validation(format!(
            "Line '{}' has non-positive quantity",
            item.description
        )));
    }
    if item.unit_price < 0.0 {
        return Err(AppError::Validation(format!(
            "Line '{}' has a negative unit price",
            item.description
        )));
    }

    let taxable = round2(item.quantity * item.unit_price);

    let (cgst_amount, sgst_amount, igst_amount) = if intrastate {
        (
            round2(taxable * item.cgst_rate / 100.0),
            round2(taxable * item.sgst_rate / 100.0),
            0.0,
        )
    } else {
        (0.0, 0.0, round2(taxable * item.igst_rate / 100.0))
    };

    Ok(LineTax {
        taxable,
        cgst_amount,
        sgst_amount,
        igst_amount,
        line_total: round2(taxable + cgst_amount + sgst_amount + igst_amount),
    })
}

pub fn compute_invoice(invoice: &GstInvoice) -> AppResult<TaxBreakdown> {
    if invoice.items.is_empty() {
        return Err(AppError::Validation(
            "Invoice has no line items".to_string(),
        ));
    }

    let intrastate = invoice.supplier.state == invoice.recipient.state;

    let mut lines = Vec::with_capacity(invoice.items.len());
    let (mut taxable, mut cgst, mut sgst, mut igst) = (0.0, 0.0, 0.0, 0.0);

    for item in &invoice.items {
        let line = compute_line(item, intrastate)?;
        taxable += line.taxable;
        cgst += line.cgst_amount;
        sgst += line.sgst_amount;
        igst += line.igst_amount;
        lines.push(line);
    }

    let taxable = round2(taxable);
    let cgst_amount = round2(cgst);
    let sgst_amount = round2(sgst);
    let igst_amount = round2(igst);

    Ok(TaxBreakdown {
        intrastate,
        lines,
        taxable,
        cgst_amount,
        sgst_amount,
        igst_amount,
        grand_total: round2(taxable + cgst_amount + sgst_amount + igst_amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(state: &str) -> Party {
        Party {
            name: "P".into(),
            gstin: None,
            state: state.into(),
        }
    }

    fn item(qty: f64, price: f64, rate: f64) -> GstLineItem {
        GstLineItem {
            description: "Training kit".into(),
            quantity: qty,
            unit_price: price,
            cgst_rate: rate,
            sgst_rate: rate,
            igst_rate: rate,
        }
    }

    #[test]
    fn intrastate_splits_into_cgst_and_sgst() {
        let invoice = GstInvoice {
            supplier: party("27"),
            recipient: party("27"),
            items: vec![item(1.0, 1000.0, 18.0)],
        };
        let tax = compute_invoice(&invoice).unwrap();
        assert!(tax.intrastate);
        assert_eq!(tax.cgst_amount, 180.0);
        assert_eq!(tax.sgst_amount, 180.0);
        assert_eq!(tax.igst_amount, 0.0);
        assert_eq!(tax.grand_total, 1360.0);
    }

    #[test]
    fn interstate_applies_igst_only() {
        let invoice = GstInvoice {
            supplier: party("27"),
            recipient: party("29"),
            items: vec![item(1.0, 1000.0, 18.0)],
        };
        let tax = compute_invoice(&invoice).unwrap();
        assert!(!tax.intrastate);
        assert_eq!(tax.cgst_amount, 0.0);
        assert_eq!(tax.sgst_amount, 0.0);
        assert_eq!(tax.igst_amount, 180.0);
        assert_eq!(tax.grand_total, 1180.0);
    }

    #[test]
    fn amounts_sum_across_lines() {
        let invoice = GstInvoice {
            supplier: party("27"),
            recipient: party("27"),
            items: vec![item(2.0, 500.0, 18.0), item(1.0, 1000.0, 9.0)],
        };
        let tax = compute_invoice(&invoice).unwrap();
        assert_eq!(tax.taxable, 2000.0);
        assert_eq!(tax.cgst_amount, 180.0 + 90.0);
        assert_eq!(tax.sgst_amount, 270.0);
        assert_eq!(tax.lines.len(), 2);
    }

    #[test]
    fn rounds_to_paise() {
        let invoice = GstInvoice {
            supplier: party("27"),
            recipient: party("27"),
            items: vec![item(3.0, 33.33, 18.0)],
        };
        let tax = compute_invoice(&invoice).unwrap();
        assert_eq!(tax.taxable, 99.99);
        assert_eq!(tax.cgst_amount, 18.0); // 17.9982 rounded
    }

    #[test]
    fn rejects_bad_lines() {
        let invoice = GstInvoice {
            supplier: party("27"),
            recipient: party("27"),
            items: vec![item(0.0, 100.0, 18.0)],
        };
        assert!(compute_invoice(&invoice).is_err());

        let empty = GstInvoice {
            supplier: party("27"),
            recipient: party("27"),
            items: vec![],
        };
        assert!(compute_invoice(&empty).is_err());
    }
}
