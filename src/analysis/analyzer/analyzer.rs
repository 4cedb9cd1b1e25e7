//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Vectorizer
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 .. Filter N
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so that analyzers can live inside a
/// fitted model that is queried from several threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use intentbot::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    /// use intentbot::analysis::token_filter::LowercaseFilter;
    /// use intentbot::analysis::tokenizer::RegexTokenizer;
    /// use std::sync::Arc;
    ///
    /// let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
    ///     .add_filter(Arc::new(LowercaseFilter::new()));
    /// let tokens: Vec<_> = analyzer.analyze("Good Morning").unwrap().collect();
    ///
    /// assert_eq!(tokens[0].text, "good");
    /// assert_eq!(tokens[1].text, "morning");
    /// ```
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &str;
}
