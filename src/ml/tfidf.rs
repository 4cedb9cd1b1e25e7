//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// A sparse feature vector: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer with a vocabulary frozen at construction.
///
/// Term weights are raw counts multiplied by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`; each row is then scaled to unit
/// L2 norm. Terms never seen during fitting are ignored.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer producing the terms of a document.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Fit a vectorizer on the given documents.
    ///
    /// Feature indices follow the lexicographic order of the terms, so the
    /// same corpus always yields the same feature layout.
    pub fn fit<S: AsRef<str>>(analyzer: Arc<dyn Analyzer>, documents: &[S]) -> Result<Self> {
        let n_documents = documents.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_terms: HashSet<String> = Self::terms(&analyzer, doc.as_ref())?
                .into_iter()
                .collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            // IDF = log((N + 1) / (df + 1)) + 1
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        debug!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            vocabulary.len(),
            n_documents
        );

        Ok(Self {
            vocabulary,
            idf,
            n_documents,
            analyzer,
        })
    }

    /// Transform a document into an L2-normalized sparse TF-IDF vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in Self::terms(&self.analyzer, document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    /// Analyze a document into its terms.
    fn terms(analyzer: &Arc<dyn Analyzer>, text: &str) -> Result<Vec<String>> {
        Ok(analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the feature index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Get the inverse document frequency of a feature.
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Get the number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::PipelineAnalyzer;
    use crate::analysis::token_filter::{LowercaseFilter, ShingleFilter};
    use crate::analysis::tokenizer::RegexTokenizer;

    fn analyzer(max_n: usize) -> Arc<dyn Analyzer> {
        Arc::new(
            PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
                .add_filter(Arc::new(LowercaseFilter::new()))
                .add_filter(Arc::new(ShingleFilter::new(1, max_n).unwrap())),
        )
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = ["good morning", "good night", "thanks a lot"];
        let vectorizer = TfIdfVectorizer::fit(analyzer(2), &documents).unwrap();

        // good, morning, night, thanks, lot, good morning, good night, thanks lot
        assert_eq!(vectorizer.vocabulary_size(), 8);
        assert_eq!(vectorizer.n_documents(), 3);

        // "good" appears in two documents, "morning" in one.
        let good = vectorizer.term_index("good").unwrap();
        let morning = vectorizer.term_index("morning").unwrap();
        assert!(vectorizer.idf(good).unwrap() < vectorizer.idf(morning).unwrap());
        let expected = (4.0f64 / 3.0).ln() + 1.0;
        assert!((vectorizer.idf(good).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = TfIdfVectorizer::fit(analyzer(1), &["zebra apple mango"]).unwrap();
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("mango"), Some(1));
        assert_eq!(vectorizer.term_index("zebra"), Some(2));
    }

    #[test]
    fn test_transform_is_unit_length_and_sorted() {
        let documents = ["good morning", "good night"];
        let vectorizer = TfIdfVectorizer::fit(analyzer(2), &documents).unwrap();

        let features = vectorizer.transform("Good morning, good morning!").unwrap();
        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(features.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_out_of_vocabulary_terms_are_ignored() {
        let vectorizer = TfIdfVectorizer::fit(analyzer(2), &["hello", "bye"]).unwrap();

        let features = vectorizer.transform("hello stranger").unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].0, vectorizer.term_index("hello").unwrap());
        assert!((features[0].1 - 1.0).abs() < 1e-12);

        assert!(vectorizer.transform("completely unrelated").unwrap().is_empty());
        assert!(vectorizer.transform("").unwrap().is_empty());
    }
}
