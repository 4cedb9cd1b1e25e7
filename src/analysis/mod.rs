//! Text analysis module for intentbot.
//!
//! This module turns raw utterances into the terms counted by the TF-IDF
//! vectorizer: a tokenizer splits the text, then token filters normalize it
//! and expand it into word n-grams.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
