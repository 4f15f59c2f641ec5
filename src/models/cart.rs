// Per-student shopping cart

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::course::{Course, SessionType};
use crate::document::Document;
use crate::pricing::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub course_id: i64,
    pub session: SessionType,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub student_id: String,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(student_id: String) -> Self {
        Cart {
            student_id,
            items: Vec::new(),
        }
    }

    /// Add or merge an item; same course + session bumps the quantity.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.course_id == item.course_id && i.session == item.session)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    pub fn remove_item(&mut self, course_id: i64, session: SessionType) {
        self.items
            .retain(|i| !(i.course_id == course_id && i.session == session));
    }

    /// Sum of session price x quantity per line. Items whose course no
    /// longer exists contribute nothing.
    pub fn total_price(&self, courses: &HashMap<i64, Course>) -> f64 {
        let total = self
            .items
            .iter()
            .filter_map(|item| {
                courses
                    .get(&item.course_id)
                    .map(|course| course.session_price(item.session) * item.quantity as f64)
            })
            .sum();
        round2(total)
    }
}

impl Document for Cart {
    fn doc_type() -> &'static str {
        "cart"
    }

    fn index_keys(&self) -> Vec<(String, String)> {
        vec![("student_id".to_string(), self.student_id.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::SessionPricing;

    fn course(base: f64, live: Option<f64>) -> Course {
        Course {
            title: "t".into(),
            description: None,
            base_price: base,
            pricing: SessionPricing {
                recorded: None,
                live,
            },
        }
    }

    #[test]
    fn merges_duplicate_lines() {
        let mut cart = Cart::new("stu-1".into());
        cart.add_item(CartItem {
            course_id: 7,
            session: SessionType::Live,
            quantity: 1,
        });
        cart.add_item(CartItem {
            course_id: 7,
            session: SessionType::Live,
            quantity: 2,
        });
        cart.add_item(CartItem {
            course_id: 7,
            session: SessionType::Recorded,
            quantity: 1,
        });
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn total_uses_session_fallback_prices() {
        let mut cart = Cart::new("stu-1".into());
        cart.add_item(CartItem {
            course_id: 1,
            session: SessionType::Live,
            quantity: 2,
        });
        cart.add_item(CartItem {
            course_id: 2,
            session: SessionType::Recorded,
            quantity: 1,
        });

        let mut courses = HashMap::new();
        courses.insert(1, course(1000.0, None)); // live falls back to 1500
        courses.insert(2, course(800.0, Some(999.0)));

        assert_eq!(cart.total_price(&courses), 2.0 * 1500.0 + 800.0);
    }

    #[test]
    fn missing_course_contributes_nothing() {
        let mut cart = Cart::new("stu-1".into());
        cart.add_item(CartItem {
            course_id: 42,
            session: SessionType::Recorded,
            quantity: 5,
        });
        assert_eq!(cart.total_price(&HashMap::new()), 0.0);
    }
}
