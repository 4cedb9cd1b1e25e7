//! Shingle (word n-gram) filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{IntentBotError, Result};

/// A filter that replaces a token stream with its word n-grams.
///
/// Every contiguous run of `min_size..=max_size` input tokens becomes one
/// output token whose text is the run joined by a single space.
///
/// # Examples
///
/// ```
/// use intentbot::analysis::token::Token;
/// use intentbot::analysis::token_filter::Filter;
/// use intentbot::analysis::token_filter::shingle::ShingleFilter;
///
/// let filter = ShingleFilter::new(1, 2).unwrap();
/// let tokens = vec![Token::new("good", 0), Token::new("morning", 1)];
/// let shingles: Vec<_> = filter
///     .filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(shingles, vec!["good", "good morning", "morning"]);
/// ```
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    /// Minimum number of words per shingle
    min_size: usize,
    /// Maximum number of words per shingle
    max_size: usize,
}

impl ShingleFilter {
    /// Create a new shingle filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_size` is 0 or `max_size` is less than `min_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(IntentBotError::analysis("min_size must be at least 1"));
        }
        if max_size < min_size {
            return Err(IntentBotError::analysis(format!(
                "max_size ({max_size}) must be >= min_size ({min_size})"
            )));
        }
        Ok(Self { min_size, max_size })
    }

    /// Get the minimum shingle size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Get the maximum shingle size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();
        let mut shingles = Vec::new();

        for start in 0..words.len() {
            for size in self.min_size..=self.max_size {
                let end = start + size;
                if end > words.len() {
                    break;
                }

                let window = &words[start..end];
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");

                shingles.push(
                    Token::with_offsets(
                        text,
                        window[0].position,
                        window[0].start_offset,
                        window[size - 1].end_offset,
                    )
                    .with_position_length(size),
                );
            }
        }

        Ok(Box::new(shingles.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
