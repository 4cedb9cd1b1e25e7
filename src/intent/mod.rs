//! Intent catalog, the chatbot bundle built on top of it, and the optional
//! conversation log used by front-ends.

pub mod catalog;
pub mod chatbot;
pub mod conversation_log;

pub use catalog::{Catalog, Intent, TrainingExample};
pub use chatbot::Chatbot;
pub use conversation_log::{ConversationLog, ConversationRecord};
