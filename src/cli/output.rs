//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{IntentBotArgs, OutputFormat};
use crate::error::Result;
use crate::intent::ConversationRecord;

/// Result of answering one utterance.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResult {
    pub input: String,
    pub tag: String,
    pub response: String,
}

/// Summary of a catalog that loaded and trained successfully.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    pub intents: usize,
    pub patterns: usize,
    pub tags: Vec<String>,
    pub vocabulary_size: usize,
    pub iterations: usize,
    pub converged: bool,
    pub training_accuracy: f64,
}

/// Logged conversation history.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub records: Vec<ConversationRecord>,
}

/// Types that know how to render themselves for humans.
pub trait HumanOutput {
    /// Render as plain text, without a trailing newline.
    fn render_human(&self) -> String;
}

impl HumanOutput for AskResult {
    fn render_human(&self) -> String {
        self.response.clone()
    }
}

impl HumanOutput for ValidationResult {
    fn render_human(&self) -> String {
        let lines = [
            "Catalog Summary:".to_string(),
            "════════════════".to_string(),
            format!("Intents: {}", self.intents),
            format!("Patterns: {}", self.patterns),
            format!("Tags: {}", self.tags.join(", ")),
            format!("Vocabulary size: {}", self.vocabulary_size),
            format!(
                "Training: {} iterations ({})",
                self.iterations,
                if self.converged {
                    "converged"
                } else {
                    "stopped at max_iter"
                }
            ),
            format!(
                "Training-set accuracy: {:.1}%",
                self.training_accuracy * 100.0
            ),
        ];
        lines.join("\n")
    }
}

impl HumanOutput for HistoryResult {
    fn render_human(&self) -> String {
        if self.records.is_empty() {
            return "No conversation history.".to_string();
        }
        self.records
            .iter()
            .map(|record| {
                format!(
                    "User: {}\nChatbot: {}\nTimestamp: {}\n---",
                    record.input,
                    record.response,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &IntentBotArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            println!("{}", result.render_human());
        }
        OutputFormat::Json => println!("{}", render_json(result, args.pretty)?),
    }
    Ok(())
}

/// Serialize a result as JSON.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
