//! Training configuration for the intent classifier.

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{IntentBotError, Result};

/// Hyper-parameters used when fitting a [`ClassifierModel`](super::ClassifierModel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smallest and largest word n-gram counted as a feature.
    pub ngram_range: (usize, usize),
    /// Regex whose matches are the words of an utterance.
    pub token_pattern: String,
    /// Lowercase words before building n-grams.
    pub lowercase: bool,
    /// Inverse of the L2 regularization strength (larger means weaker).
    pub c: f64,
    /// Upper bound on gradient descent iterations.
    pub max_iter: usize,
    /// Training stops once no gradient component exceeds this value.
    pub tolerance: f64,
    /// Gradient descent step size.
    pub learning_rate: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 4),
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            c: 1.0,
            max_iter: 10_000,
            tolerance: 1e-6,
            learning_rate: 0.5,
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(IntentBotError::invalid_config(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(IntentBotError::invalid_config(format!(
                "c must be a positive number, got {}",
                self.c
            )));
        }
        if self.max_iter == 0 {
            return Err(IntentBotError::invalid_config(
                "max_iter must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(IntentBotError::invalid_config(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        // Features are L2-normalized, so steps above 1.0 can diverge.
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(IntentBotError::invalid_config(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}
