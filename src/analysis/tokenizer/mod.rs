//! Tokenizer implementations for text analysis.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a fitted model holding a tokenizer can
/// be shared between threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use regex::RegexTokenizer;
