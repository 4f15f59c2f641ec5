// Course catalog entry with per-session pricing

use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Recorded,
    Live,
}

/// Optional per-session price overrides. Absent entries fall back to the
/// base price (live sessions at 1.5x).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionPricing {
    pub recorded: Option<f64>,
    pub live: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub pricing: SessionPricing,
}

impl Course {
    /// Price fallback chain: explicit session price, then base price, with
    /// live sessions defaulting to 1.5x base when unpriced.
    pub fn session_price(&self, session: SessionType) -> f64 {
        match session {
            SessionType::Recorded => self.pricing.recorded.unwrap_or(self.base_price),
            SessionType::Live => self.pricing.live.unwrap_or(self.base_price * 1.5),
        }
    }
}

impl Document for Course {
    fn doc_type() -> &'static str {
        "course"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_fallback_chain() {
        let mut course = Course {
            title: "GST Practitioner".into(),
            description: None,
            base_price: 2000.0,
            pricing: SessionPricing::default(),
        };

        assert_eq!(course.session_price(SessionType::Recorded), 2000.0);
        assert_eq!(course.session_price(SessionType::Live), 3000.0);

        course.pricing.live = Some(2500.0);
        assert_eq!(course.session_price(SessionType::Live), 2500.0);

        course.pricing.recorded = Some(1800.0);
        assert_eq!(course.session_price(SessionType::Recorded), 1800.0);
    }
}
