//! Machine learning for intent classification.
//!
//! - `TfIdfVectorizer`: word n-gram TF-IDF features
//! - `LogisticRegression`: multinomial linear classifier
//! - `ClassifierModel`: both of the above fitted against a catalog
//!
//! # Example
//!
//! ```rust
//! use intentbot::intent::Catalog;
//! use intentbot::ml::ClassifierModel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_json_str(r#"[
//!     {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
//!     {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Bye!"]}
//! ]"#)?;
//!
//! let model = ClassifierModel::fit_default(&catalog)?;
//! assert_eq!(model.classify("hello there"), "greeting");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logistic;
pub mod model;
pub mod tfidf;

pub use config::ClassifierConfig;
pub use logistic::{FitReport, LogisticRegression};
pub use model::ClassifierModel;
pub use tfidf::{SparseVector, TfIdfVectorizer};
