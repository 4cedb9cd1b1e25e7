//! Multinomial logistic regression over sparse feature vectors.
//!
//! The model minimizes the mean cross-entropy plus an L2 penalty on the
//! weights (intercepts are not penalized):
//!
//! ```text
//! J(W, b) = 1/n Σ_i −log softmax(W·x_i + b)[y_i] + 1/(2·C·n) ‖W‖²
//! ```
//!
//! Fitting uses full-batch gradient descent starting from zero, so the result
//! only depends on the data and the configuration.

use log::{debug, warn};

use crate::error::{IntentBotError, Result};
use crate::ml::config::ClassifierConfig;
use crate::ml::tfidf::SparseVector;

/// Outcome of a fitting run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Gradient descent iterations performed.
    pub iterations: usize,
    /// Whether the gradient fell below the tolerance before `max_iter`.
    pub converged: bool,
    /// Value of the objective at the returned parameters.
    pub loss: f64,
}

/// Fitted multinomial logistic regression.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// One weight row per class, each `n_features` long.
    weights: Vec<Vec<f64>>,
    /// One intercept per class.
    intercepts: Vec<f64>,
}

impl LogisticRegression {
    /// Fit the model on `samples` labeled with class indices `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`IntentBotError::InsufficientData`] when there are no samples
    /// or fewer than two classes, and [`IntentBotError::InvalidConfig`] when
    /// the samples and labels disagree in length or a label is out of range.
    pub fn fit(
        samples: &[SparseVector],
        labels: &[usize],
        n_classes: usize,
        n_features: usize,
        config: &ClassifierConfig,
    ) -> Result<(Self, FitReport)> {
        if samples.is_empty() {
            return Err(IntentBotError::insufficient_data("training set is empty"));
        }
        if n_classes < 2 {
            return Err(IntentBotError::insufficient_data(format!(
                "need at least 2 classes, got {n_classes}"
            )));
        }
        if samples.len() != labels.len() {
            return Err(IntentBotError::invalid_config(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if let Some(&label) = labels.iter().find(|&&label| label >= n_classes) {
            return Err(IntentBotError::invalid_config(format!(
                "label {label} out of range for {n_classes} classes"
            )));
        }

        let n = samples.len() as f64;
        let penalty = 1.0 / (config.c * n);
        // Each sample has ‖x‖ ≤ 1 plus the intercept input, so the loss is
        // (1 + penalty)-smooth; a step of 1/L never overshoots.
        let step = config.learning_rate.min(1.0 / (1.0 + penalty));

        let mut model = LogisticRegression {
            weights: vec![vec![0.0; n_features]; n_classes],
            intercepts: vec![0.0; n_classes],
        };
        let mut weight_grad = vec![vec![0.0; n_features]; n_classes];
        let mut intercept_grad = vec![0.0; n_classes];

        let mut iterations = 0;
        let mut converged = false;
        while iterations < config.max_iter {
            model.gradient(samples, labels, penalty, &mut weight_grad, &mut intercept_grad);

            let max_grad = weight_grad
                .iter()
                .flatten()
                .chain(intercept_grad.iter())
                .fold(0.0f64, |acc, g| acc.max(g.abs()));
            if max_grad <= config.tolerance {
                converged = true;
                break;
            }

            for (row, grad_row) in model.weights.iter_mut().zip(&weight_grad) {
                for (w, g) in row.iter_mut().zip(grad_row) {
                    *w -= step * g;
                }
            }
            for (b, g) in model.intercepts.iter_mut().zip(&intercept_grad) {
                *b -= step * g;
            }
            iterations += 1;
        }

        let loss = model.loss(samples, labels, penalty);
        if converged {
            debug!("Logistic regression converged after {iterations} iterations (loss {loss:.6})");
        } else {
            warn!(
                "Logistic regression stopped at max_iter={} without converging (loss {loss:.6})",
                config.max_iter
            );
        }

        Ok((
            model,
            FitReport {
                iterations,
                converged,
                loss,
            },
        ))
    }

    /// Compute the gradient of the objective into the given buffers.
    fn gradient(
        &self,
        samples: &[SparseVector],
        labels: &[usize],
        penalty: f64,
        weight_grad: &mut [Vec<f64>],
        intercept_grad: &mut [f64],
    ) {
        let inv_n = 1.0 / samples.len() as f64;

        for (grad_row, row) in weight_grad.iter_mut().zip(&self.weights) {
            for (g, w) in grad_row.iter_mut().zip(row) {
                *g = penalty * w;
            }
        }
        intercept_grad.fill(0.0);

        for (x, &y) in samples.iter().zip(labels) {
            let probabilities = self.probabilities(x);
            for (class, p) in probabilities.into_iter().enumerate() {
                let residual = (p - if class == y { 1.0 } else { 0.0 }) * inv_n;
                intercept_grad[class] += residual;
                for &(idx, value) in x {
                    weight_grad[class][idx] += residual * value;
                }
            }
        }
    }

    /// Value of the regularized objective.
    fn loss(&self, samples: &[SparseVector], labels: &[usize], penalty: f64) -> f64 {
        let data_loss: f64 = samples
            .iter()
            .zip(labels)
            .map(|(x, &y)| -self.probabilities(x)[y].max(f64::MIN_POSITIVE).ln())
            .sum::<f64>()
            / samples.len() as f64;
        let weight_norm: f64 = self.weights.iter().flatten().map(|w| w * w).sum();
        data_loss + 0.5 * penalty * weight_norm
    }

    /// Linear score `W·x + b` of every class.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| b + x.iter().map(|&(idx, value)| row[idx] * value).sum::<f64>())
            .collect()
    }

    /// Class probabilities (softmax of the decision function).
    pub fn probabilities(&self, x: &SparseVector) -> Vec<f64> {
        let mut scores = self.decision_function(x);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut sum = 0.0;
        for score in &mut scores {
            *score = (*score - max).exp();
            sum += *score;
        }
        for score in &mut scores {
            *score /= sum;
        }
        scores
    }

    /// Index of the highest-scoring class; ties go to the lowest index.
    pub fn predict(&self, x: &SparseVector) -> usize {
        let scores = self.decision_function(x);
        let mut best = 0;
        for (class, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = class;
            }
        }
        best
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    /// Intercept of every class.
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }
}
