// Assignment and CaseStudy - ordered arrays of heterogeneous blocks
// attached to a chapter. Blocks are append-only: `order` is always the
// array length at insertion time and is never renumbered.

use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub order: u32,
    pub title: String,
    pub description: Option<String>,
    pub due_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub order: u32,
    /// "text", "video", "image", ...
    pub kind: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationBlock {
    pub order: u32,
    /// "gst_registration", "e_invoice", "tds_certificate"
    pub kind: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub order: u32,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub chapter_id: i64,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub simulations: Vec<SimulationBlock>,
    #[serde(default)]
    pub question_sets: Vec<QuestionSet>,
}

impl Assignment {
    pub fn new(chapter_id: i64, title: String) -> Self {
        Assignment {
            chapter_id,
            title,
            tasks: Vec::new(),
            simulations: Vec::new(),
            question_sets: Vec::new(),
        }
    }

    pub fn add_task(&mut self, title: String, description: Option<String>, due_days: Option<u32>) -> &Task {
        let order = self.tasks.len() as u32;
        self.tasks.push(Task {
            order,
            title,
            description,
            due_days,
        });
        self.tasks.last().unwrap()
    }

    pub fn add_simulation(&mut self, kind: String, config: serde_json::Value) -> &SimulationBlock {
        let order = self.simulations.len() as u32;
        self.simulations.push(SimulationBlock {
            order,
            kind,
            config,
        });
        self.simulations.last().unwrap()
    }

    pub fn add_question_set(&mut self, title: String, questions: Vec<Question>) -> &QuestionSet {
        let order = self.question_sets.len() as u32;
        self.question_sets.push(QuestionSet {
            order,
            title,
            questions,
        });
        self.question_sets.last().unwrap()
    }
}

impl Document for Assignment {
    fn doc_type() -> &'static str {
        "assignment"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudy {
    pub chapter_id: i64,
    pub title: String,
    #[serde(default)]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub question_sets: Vec<QuestionSet>,
}

impl CaseStudy {
    pub fn new(chapter_id: i64, title: String) -> Self {
        CaseStudy {
            chapter_id,
            title,
            content_blocks: Vec::new(),
            question_sets: Vec::new(),
        }
    }

    pub fn add_content_block(&mut self, kind: String, body: String) -> &ContentBlock {
        let order = self.content_blocks.len() as u32;
        self.content_blocks.push(ContentBlock { order, kind, body });
        self.content_blocks.last().unwrap()
    }

    pub fn add_question_set(&mut self, title: String, questions: Vec<Question>) -> &QuestionSet {
        let order = self.question_sets.len() as u32;
        self.question_sets.push(QuestionSet {
            order,
            title,
            questions,
        });
        self.question_sets.last().unwrap()
    }
}

impl Document for CaseStudy {
    fn doc_type() -> &'static str {
        "case_study"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_task_gets_order_equal_to_prior_length() {
        let mut assignment = Assignment::new(1, "Chapter 3 homework".into());
        assert_eq!(assignment.tasks.len(), 0);

        let task = assignment.add_task("Read ledger entries".into(), None, Some(7));
        assert_eq!(task.order, 0);
        assert_eq!(assignment.tasks.len(), 1);

        let task = assignment.add_task("File mock return".into(), None, None);
        assert_eq!(task.order, 1);
        assert_eq!(assignment.tasks.len(), 2);
    }

    #[test]
    fn block_orders_are_independent_per_array() {
        let mut assignment = Assignment::new(1, "t".into());
        assignment.add_task("a".into(), None, None);
        assignment.add_task("b".into(), None, None);
        let sim = assignment.add_simulation("gst_registration".into(), serde_json::json!({}));
        assert_eq!(sim.order, 0);
    }

    #[test]
    fn case_study_appends_content_blocks() {
        let mut cs = CaseStudy::new(2, "Interstate supply".into());
        cs.add_content_block("text".into(), "Background...".into());
        let block = cs.add_content_block("video".into(), "https://cdn/v.mp4".into());
        assert_eq!(block.order, 1);
        assert_eq!(cs.content_blocks.len(), 2);
    }
}
