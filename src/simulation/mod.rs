// Simulation wizards (GST registration, e-invoice, TDS certificate).
// Pure library code: state lives with the caller, never in the store.

pub mod gst;
pub mod tds;
pub mod validate;
pub mod wizard;

pub use gst::{compute_invoice, GstInvoice, GstLineItem, Party, TaxBreakdown};
pub use tds::{compute_tds, TdsInput, TdsResult};
pub use validate::{is_valid, FieldKind};
pub use wizard::{e_invoice, gst_registration, tds_certificate, Wizard, WizardStep};
