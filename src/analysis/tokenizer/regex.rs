//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{IntentBotError, Result};

/// Default pattern: words made of two or more word characters.
///
/// Single-character words such as "a" or "I" never become terms.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// A regex-based tokenizer that extracts every match of a pattern as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_TOKEN_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| IntentBotError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
