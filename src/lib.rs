//! # intentbot
//!
//! An intent-matching chatbot engine: a catalog of labeled example phrases is
//! turned into a TF-IDF + logistic regression classifier, which maps new
//! utterances to an intent and one of its canned responses.
//!
//! ## Features
//!
//! - Word n-gram (1 to 4) TF-IDF features over a pluggable analysis pipeline
//! - Deterministic multinomial logistic regression
//! - Immutable catalog + model bundle with injected response randomness
//! - Optional JSON Lines conversation log and a command line front-end

pub mod analysis;
pub mod cli;
pub mod error;
pub mod intent;
pub mod ml;

pub mod prelude {
    pub use crate::error::{IntentBotError, Result};
    pub use crate::intent::{Catalog, Chatbot, ConversationLog, ConversationRecord, Intent};
    pub use crate::ml::{ClassifierConfig, ClassifierModel};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
