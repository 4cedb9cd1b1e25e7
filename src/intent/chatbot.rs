//! The immutable catalog + model bundle answering user utterances.

use std::path::Path;

use log::info;
use rand::Rng;

use crate::error::{IntentBotError, Result};
use crate::intent::catalog::Catalog;
use crate::ml::config::ClassifierConfig;
use crate::ml::model::ClassifierModel;

/// A catalog together with the classifier fitted on it.
///
/// Built once by [`Chatbot::initialize`] and read-only afterwards; share it
/// by reference (or in an `Arc`) with whatever serves queries.
///
/// # Examples
///
/// ```
/// use intentbot::intent::{Catalog, Chatbot};
/// use intentbot::ml::ClassifierConfig;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = Catalog::from_json_str(r#"[
///     {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
///     {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Bye!"]}
/// ]"#)?;
/// let bot = Chatbot::initialize(catalog, &ClassifierConfig::default())?;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// assert_eq!(bot.respond("hi", &mut rng)?, "Hello!");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Chatbot {
    catalog: Catalog,
    model: ClassifierModel,
}

impl Chatbot {
    /// Fit a classifier on `catalog` and bundle the two.
    ///
    /// # Errors
    ///
    /// Propagates fitting errors, and returns [`IntentBotError::UnknownTag`]
    /// if the model knows a tag the catalog does not define.
    pub fn initialize(catalog: Catalog, config: &ClassifierConfig) -> Result<Self> {
        let model = ClassifierModel::fit(&catalog, config)?;
        Self::from_parts(catalog, model)
    }

    /// Load a catalog from a JSON file and initialize a chatbot from it.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &ClassifierConfig) -> Result<Self> {
        let catalog = Catalog::from_path(path)?;
        Self::initialize(catalog, config)
    }

    /// Bundle an existing catalog and model, checking they agree on tags.
    pub fn from_parts(catalog: Catalog, model: ClassifierModel) -> Result<Self> {
        if let Some(tag) = model.classes().iter().find(|tag| !catalog.contains(tag)) {
            return Err(IntentBotError::unknown_tag(tag.clone()));
        }
        info!("Chatbot ready with {} intents", catalog.len());
        Ok(Self { catalog, model })
    }

    /// Classify `text` and pick one of the matching intent's responses.
    pub fn respond<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<String> {
        let tag = self.model.classify(text);
        let response = self.catalog.pick_response(tag, rng)?;
        Ok(response.to_string())
    }

    /// Classify `text` into an intent tag.
    pub fn classify(&self, text: &str) -> &str {
        self.model.classify(text)
    }

    /// The catalog the bot answers from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The fitted classifier.
    pub fn model(&self) -> &ClassifierModel {
        &self.model
    }
}
