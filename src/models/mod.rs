// Persisted entities, organized by domain

pub mod assignment;
pub mod cart;
pub mod center;
pub mod company;
pub mod content;
pub mod course;
pub mod kit_order;
pub mod payment;
pub mod status;

pub use assignment::{Assignment, CaseStudy, ContentBlock, Question, QuestionSet, SimulationBlock, Task};
pub use cart::{Cart, CartItem};
pub use center::Center;
pub use company::Company;
pub use content::ContentDocument;
pub use course::{Course, SessionPricing, SessionType};
pub use kit_order::KitOrder;
pub use payment::PaymentProof;
pub use status::{ApprovalStatus, OrderStatus};
