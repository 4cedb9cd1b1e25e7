//! Intent classifier: TF-IDF features fed to a logistic regression.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, ShingleFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::{IntentBotError, Result};
use crate::intent::catalog::Catalog;
use crate::ml::config::ClassifierConfig;
use crate::ml::logistic::{FitReport, LogisticRegression};
use crate::ml::tfidf::TfIdfVectorizer;

/// A fitted intent classifier.
///
/// Construction is training: once [`ClassifierModel::fit`] returns, the
/// vocabulary and coefficients are frozen and [`classify`](Self::classify)
/// is a pure read that never fails.
#[derive(Debug)]
pub struct ClassifierModel {
    vectorizer: TfIdfVectorizer,
    regression: LogisticRegression,
    /// Tags sorted lexicographically; the class index is the position here.
    classes: Vec<String>,
    report: FitReport,
}

impl ClassifierModel {
    /// Fit a classifier on every (pattern, tag) pair of `catalog`.
    ///
    /// # Errors
    ///
    /// - [`IntentBotError::InvalidConfig`] if `config` does not validate.
    /// - [`IntentBotError::InsufficientData`] if the catalog has no patterns
    ///   or fewer than two distinct tags.
    pub fn fit(catalog: &Catalog, config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let examples = catalog.training_examples();
        if examples.is_empty() {
            return Err(IntentBotError::insufficient_data(
                "the catalog contains no patterns",
            ));
        }

        let classes: Vec<String> = examples
            .iter()
            .map(|example| example.tag)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        if classes.len() < 2 {
            return Err(IntentBotError::insufficient_data(format!(
                "need at least 2 distinct tags to discriminate, got {}",
                classes.len()
            )));
        }
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(idx, tag)| (tag.as_str(), idx))
            .collect();

        let texts: Vec<&str> = examples.iter().map(|example| example.text).collect();
        let vectorizer = TfIdfVectorizer::fit(build_analyzer(config)?, &texts)?;

        let samples = texts
            .iter()
            .map(|text| vectorizer.transform(text))
            .collect::<Result<Vec<_>>>()?;
        let labels: Vec<usize> = examples
            .iter()
            .map(|example| class_index[example.tag])
            .collect();

        let (regression, report) = LogisticRegression::fit(
            &samples,
            &labels,
            classes.len(),
            vectorizer.vocabulary_size(),
            config,
        )?;

        info!(
            "Fitted intent classifier: {} classes, {} examples, {} features, {} iterations",
            classes.len(),
            samples.len(),
            vectorizer.vocabulary_size(),
            report.iterations
        );

        Ok(Self {
            vectorizer,
            regression,
            classes,
            report,
        })
    }

    /// Fit a classifier with [`ClassifierConfig::default`].
    pub fn fit_default(catalog: &Catalog) -> Result<Self> {
        Self::fit(catalog, &ClassifierConfig::default())
    }

    /// Return the tag whose linear score for `text` is highest.
    ///
    /// Every input maps to some trained tag, including text that shares no
    /// term with any pattern; the empty string yields the tag with the
    /// largest intercept.
    pub fn classify(&self, text: &str) -> &str {
        let class = match self.vectorizer.transform(text) {
            Ok(features) => self.regression.predict(&features),
            // The analyzer cannot fail once it has compiled; keep the call total.
            Err(_) => self.regression.predict(&Vec::new()),
        };
        let tag = self.classes[class].as_str();
        debug!("Classified {text:?} as '{tag}'");
        tag
    }

    /// Linear score of every tag for `text`, in [`classes`](Self::classes) order.
    pub fn decision_scores(&self, text: &str) -> Vec<(&str, f64)> {
        let features = self.vectorizer.transform(text).unwrap_or_default();
        self.classes
            .iter()
            .map(String::as_str)
            .zip(self.regression.decision_function(&features))
            .collect()
    }

    /// Tags known to the model, sorted lexicographically.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Summary of the training run.
    pub fn report(&self) -> &FitReport {
        &self.report
    }
}

/// Build the analyzer producing the n-gram terms described by `config`.
fn build_analyzer(config: &ClassifierConfig) -> Result<Arc<dyn Analyzer>> {
    let (min_n, max_n) = config.ngram_range;
    let mut analyzer =
        PipelineAnalyzer::new(Arc::new(RegexTokenizer::with_pattern(&config.token_pattern)?));
    if config.lowercase {
        analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
    }
    let analyzer = analyzer
        .add_filter(Arc::new(ShingleFilter::new(min_n, max_n)?))
        .with_name(format!("word_ngrams_{min_n}_{max_n}"));
    Ok(Arc::new(analyzer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"[
                {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
                {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Bye!"]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_classify() {
        let model = ClassifierModel::fit_default(&catalog()).unwrap();

        assert_eq!(model.classify("hello there"), "greeting");
        assert_eq!(model.classify("goodbye now"), "farewell");
        assert_eq!(model.classify("HI"), "greeting");
        assert!(model.report().converged);
    }

    #[test]
    fn test_classes_are_sorted() {
        let model = ClassifierModel::fit_default(&catalog()).unwrap();
        assert_eq!(model.classes(), &["farewell".to_string(), "greeting".to_string()]);
    }

    #[test]
    fn test_unrelated_and_empty_text_still_classify() {
        let model = ClassifierModel::fit_default(&catalog()).unwrap();

        let tag = model.classify("what is the weather in paris");
        assert!(model.classes().iter().any(|c| c == tag));

        let tag = model.classify("");
        assert!(model.classes().iter().any(|c| c == tag));
    }

    #[test]
    fn test_empty_text_follows_the_larger_prior() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"tag": "greeting", "patterns": ["hi", "hello", "hey", "good morning"], "responses": ["Hello!"]},
                {"tag": "farewell", "patterns": ["bye"], "responses": ["Bye!"]}
            ]"#,
        )
        .unwrap();
        let model = ClassifierModel::fit_default(&catalog).unwrap();

        assert_eq!(model.classify(""), "greeting");
    }

    #[test]
    fn test_decision_scores() {
        let model = ClassifierModel::fit_default(&catalog()).unwrap();
        let scores = model.decision_scores("hello");

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, "farewell");
        assert!(scores[1].1 > scores[0].1);
    }

    #[test]
    fn test_ngram_features() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"tag": "a", "patterns": ["how are you doing today"], "responses": ["x"]},
                {"tag": "b", "patterns": ["thanks"], "responses": ["y"]}
            ]"#,
        )
        .unwrap();
        let model = ClassifierModel::fit_default(&catalog).unwrap();

        // 5 + 4 + 3 + 2 n-grams from the first pattern, 1 from the second.
        assert_eq!(model.vectorizer().vocabulary_size(), 15);
        assert!(model.vectorizer().term_index("how are you doing").is_some());
    }

    #[test]
    fn test_single_tag_is_insufficient() {
        let catalog = Catalog::from_json_str(
            r#"[{"tag": "only", "patterns": ["a", "b"], "responses": ["x"]}]"#,
        )
        .unwrap();
        assert!(matches!(
            ClassifierModel::fit_default(&catalog),
            Err(IntentBotError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_empty_catalog_is_insufficient() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(matches!(
            ClassifierModel::fit_default(&catalog),
            Err(IntentBotError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = ClassifierConfig {
            token_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ClassifierModel::fit(&catalog(), &config),
            Err(IntentBotError::Analysis(_))
        ));

        let config = ClassifierConfig {
            ngram_range: (2, 1),
            ..Default::default()
        };
        assert!(matches!(
            ClassifierModel::fit(&catalog(), &config),
            Err(IntentBotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassifierModel>();
    }
}
