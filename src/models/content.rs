// Site content documents (About Us, Footer, Digital Hub) - nested JSON
// fetched and replaced wholesale by the admin dashboard

use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    pub slug: String,
    pub body: serde_json::Value,
}

impl Document for ContentDocument {
    fn doc_type() -> &'static str {
        "content"
    }

    fn index_keys(&self) -> Vec<(String, String)> {
        vec![("slug".to_string(), self.slug.clone())]
    }
}
