// Step wizard - a linear list of named steps over a flat field map.
// Mirrors the client-side form wizards: next/prev move an index, and next
// refuses to advance until the current step's required fields validate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::validate::{is_valid, FieldKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStep {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wizard {
    steps: Vec<WizardStep>,
    index: usize,
    values: HashMap<String, String>,
}

impl Wizard {
    /// A wizard with no steps is trivially complete; `current_step` is
    /// `None` for it.
    pub fn new(steps: Vec<WizardStep>) -> Self {
        Wizard {
            steps,
            index: 0,
            values: HashMap::new(),
        }
    }

    pub fn current_step(&self) -> Option<&WizardStep> {
        self.steps.get(self.index)
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|s| s.as_str())
    }

    /// Field names in the current step that are missing or fail their
    /// format check. Optional fields are only checked when non-empty.
    pub fn step_errors(&self) -> Vec<String> {
        let Some(step) = self.current_step() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        for field in &step.fields {
            let value = self.values.get(&field.name).map(|s| s.as_str()).unwrap_or("");
            if value.trim().is_empty() {
                if field.required {
                    errors.push(field.name.clone());
                }
            } else if !is_valid(field.kind, value) {
                errors.push(field.name.clone());
            }
        }
        errors
    }

    /// Advance to the next step. Fails with the offending field names when
    /// the current step does not validate; saturates at the last step.
    pub fn next(&mut self) -> Result<usize, Vec<String>> {
        let errors = self.step_errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        if self.index + 1 < self.steps.len() {
            self.index += 1;
        }
        Ok(self.index)
    }

    /// Step back; saturates at the first step. Never validates.
    pub fn prev(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Complete when standing on the last step and it validates.
    pub fn is_complete(&self) -> bool {
        self.index + 1 >= self.steps.len() && self.step_errors().is_empty()
    }
}

fn field(name: &str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        kind,
        required,
    }
}

/// GST registration wizard: business details, address, bank/contact.
pub fn gst_registration() -> Wizard {
    Wizard::new(vec![
        WizardStep {
            name: "business".to_string(),
            fields: vec![
                field("legal_name", FieldKind::Text, true),
                field("pan", FieldKind::Pan, true),
                field("trade_name", FieldKind::Text, false),
            ],
        },
        WizardStep {
            name: "address".to_string(),
            fields: vec![
                field("address_line", FieldKind::Text, true),
                field("state", FieldKind::Text, true),
                field("pincode", FieldKind::Pincode, true),
            ],
        },
        WizardStep {
            name: "contact".to_string(),
            fields: vec![
                field("email", FieldKind::Email, true),
                field("phone", FieldKind::Phone, true),
            ],
        },
    ])
}

/// E-invoice wizard: parties, then line items entered as form fields.
pub fn e_invoice() -> Wizard {
    Wizard::new(vec![
        WizardStep {
            name: "supplier".to_string(),
            fields: vec![
                field("supplier_name", FieldKind::Text, true),
                field("supplier_gstin", FieldKind::Gstin, true),
                field("supplier_state", FieldKind::Text, true),
            ],
        },
        WizardStep {
            name: "recipient".to_string(),
            fields: vec![
                field("recipient_name", FieldKind::Text, true),
                field("recipient_gstin", FieldKind::Gstin, false),
                field("recipient_state", FieldKind::Text, true),
            ],
        },
        WizardStep {
            name: "items".to_string(),
            fields: vec![
                field("description", FieldKind::Text, true),
                field("quantity", FieldKind::Amount, true),
                field("unit_price", FieldKind::Amount, true),
            ],
        },
    ])
}

/// TDS certificate wizard: deductor, deductee, payment.
pub fn tds_certificate() -> Wizard {
    Wizard::new(vec![
        WizardStep {
            name: "deductor".to_string(),
            fields: vec![
                field("deductor_name", FieldKind::Text, true),
                field("tan", FieldKind::Tan, true),
            ],
        },
        WizardStep {
            name: "deductee".to_string(),
            fields: vec![
                field("deductee_name", FieldKind::Text, true),
                field("pan", FieldKind::Pan, true),
            ],
        },
        WizardStep {
            name: "payment".to_string(),
            fields: vec![
                field("payment_amount", FieldKind::Amount, true),
                field("tds_rate", FieldKind::Amount, true),
            ],
        },
    ])
}
