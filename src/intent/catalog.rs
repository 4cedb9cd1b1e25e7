//! Intent catalog: the labeled example phrases and canned responses.
//!
//! A catalog is loaded once from a JSON array of intent records and never
//! mutated afterwards. Each record carries a `tag`, its example `patterns`
//! and the `responses` the bot may answer with. Unknown extra fields are
//! ignored.
//!
//! ```json
//! [
//!   {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
//!   {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Bye!"]}
//! ]
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{IntentBotError, Result};

/// A named category of user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier of the intent.
    pub tag: String,
    /// Example utterances used for training.
    pub patterns: Vec<String>,
    /// Candidate responses, picked uniformly at random.
    pub responses: Vec<String>,
}

/// A single (pattern, tag) pair of the flattened training set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample<'a> {
    /// Pattern text.
    pub text: &'a str,
    /// Tag of the intent the pattern belongs to.
    pub tag: &'a str,
}

/// Immutable set of intents indexed by tag.
#[derive(Debug, Clone)]
pub struct Catalog {
    intents: Vec<Intent>,
    by_tag: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already parsed intents.
    ///
    /// # Errors
    ///
    /// Returns [`IntentBotError::MalformedCatalog`] if a tag is blank or
    /// duplicated, or if an intent has no patterns or no responses.
    pub fn from_intents(intents: Vec<Intent>) -> Result<Self> {
        let mut by_tag = HashMap::with_capacity(intents.len());

        for (idx, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(IntentBotError::malformed_catalog(format!(
                    "intent #{idx} has a blank tag"
                )));
            }
            if intent.patterns.is_empty() {
                return Err(IntentBotError::malformed_catalog(format!(
                    "intent '{}' has no patterns",
                    intent.tag
                )));
            }
            if intent.responses.is_empty() {
                return Err(IntentBotError::malformed_catalog(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
            if by_tag.insert(intent.tag.clone(), idx).is_some() {
                return Err(IntentBotError::malformed_catalog(format!(
                    "duplicate tag '{}'",
                    intent.tag
                )));
            }
        }

        Ok(Catalog { intents, by_tag })
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let intents: Vec<Intent> = serde_json::from_str(json).map_err(malformed)?;
        Self::from_intents(intents)
    }

    /// Parse a catalog from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let intents: Vec<Intent> = serde_json::from_reader(reader).map_err(malformed)?;
        Self::from_intents(intents)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} intents ({} patterns) from {}",
            catalog.len(),
            catalog.pattern_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Look up an intent by tag.
    pub fn lookup(&self, tag: &str) -> Result<&Intent> {
        self.by_tag
            .get(tag)
            .map(|&idx| &self.intents[idx])
            .ok_or_else(|| IntentBotError::unknown_tag(tag))
    }

    /// Check whether the catalog defines `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Pick one of the responses of `tag` uniformly at random.
    pub fn pick_response<R: Rng + ?Sized>(&self, tag: &str, rng: &mut R) -> Result<&str> {
        let intent = self.lookup(tag)?;
        let response = intent.responses.choose(rng).ok_or_else(|| {
            IntentBotError::malformed_catalog(format!("intent '{tag}' has no responses"))
        })?;
        debug!("Picked response for '{tag}' out of {}", intent.responses.len());
        Ok(response.as_str())
    }

    /// Flatten the catalog into one training example per (intent, pattern).
    pub fn training_examples(&self) -> Vec<TrainingExample<'_>> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent.patterns.iter().map(move |pattern| TrainingExample {
                    text: pattern.as_str(),
                    tag: intent.tag.as_str(),
                })
            })
            .collect()
    }

    /// All intents in definition order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// All tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|intent| intent.tag.as_str())
    }

    /// Total number of patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|intent| intent.patterns.len()).sum()
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Check if the catalog defines no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

fn malformed(err: serde_json::Error) -> IntentBotError {
    IntentBotError::malformed_catalog(err.to_string())
}
