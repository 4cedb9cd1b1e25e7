//! Command implementations for the intentbot CLI.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::intent::{Chatbot, ConversationLog, ConversationRecord};
use crate::ml::ClassifierConfig;

/// Execute a CLI command.
pub fn execute_command(args: IntentBotArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args, &args),
        Command::Ask(ask_args) => ask(ask_args, &args),
        Command::History(history_args) => history(history_args, &args),
        Command::Validate(validate_args) => validate(validate_args, &args),
    }
}

/// Interactive chat over stdin/stdout.
fn chat(args: &ChatArgs, cli_args: &IntentBotArgs) -> Result<()> {
    let bot = load_chatbot(&args.catalog)?;
    let log = args.log.as_ref().map(ConversationLog::open);
    let mut rng = make_rng(args.seed);

    if cli_args.verbosity() > 0 {
        println!("Welcome to the chatbot. Type a message and press Enter to start the conversation.");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let exchanges = run_chat(&bot, stdin.lock(), stdout.lock(), log.as_ref(), &mut rng)?;
    info!("Chat session ended after {exchanges} exchanges");
    Ok(())
}

/// Answer a single utterance.
fn ask(args: &AskArgs, cli_args: &IntentBotArgs) -> Result<()> {
    let bot = load_chatbot(&args.catalog)?;
    let mut rng = make_rng(args.seed);

    let tag = bot.classify(&args.text).to_string();
    let response = bot.respond(&args.text, &mut rng)?;

    if let Some(path) = &args.log {
        ConversationLog::open(path)
            .append(&ConversationRecord::now(args.text.as_str(), response.as_str()))
            .with_context(|| format!("failed to append to {}", path.display()))?;
    }

    output_result(
        &format!("Classified as '{tag}'"),
        &AskResult {
            input: args.text.clone(),
            tag,
            response,
        },
        cli_args,
    )?;
    Ok(())
}

/// Print the conversation history.
fn history(args: &HistoryArgs, cli_args: &IntentBotArgs) -> Result<()> {
    let mut records = ConversationLog::open(&args.log)
        .records()
        .with_context(|| format!("failed to read conversation log {}", args.log.display()))?;

    if let Some(last) = args.last {
        records = records.split_off(records.len().saturating_sub(last));
    }

    output_result("Conversation History", &HistoryResult { records }, cli_args)?;
    Ok(())
}

/// Load and train a catalog, then report on it.
fn validate(args: &ValidateArgs, cli_args: &IntentBotArgs) -> Result<()> {
    let bot = load_chatbot(&args.catalog)?;
    let model = bot.model();

    output_result(
        "Catalog is valid",
        &ValidationResult {
            intents: bot.catalog().len(),
            patterns: bot.catalog().pattern_count(),
            tags: model.classes().to_vec(),
            vocabulary_size: model.vectorizer().vocabulary_size(),
            iterations: model.report().iterations,
            converged: model.report().converged,
            training_accuracy: training_accuracy(&bot),
        },
        cli_args,
    )?;
    Ok(())
}

/// Read utterances line by line from `input` and answer each on `output`.
///
/// Blank lines are skipped. The session ends at end of input or after the
/// bot says goodbye. Returns the number of exchanges.
pub fn run_chat<I, O, R>(
    bot: &Chatbot,
    input: I,
    mut output: O,
    log: Option<&ConversationLog>,
    rng: &mut R,
) -> Result<usize>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let mut exchanges = 0;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let response = bot.respond(text, rng)?;
        writeln!(output, "Chatbot: {response}")?;
        exchanges += 1;

        if let Some(log) = log {
            log.append(&ConversationRecord::now(text, response.as_str()))
                .with_context(|| format!("failed to append to {}", log.path().display()))?;
        }

        if is_farewell(&response) {
            writeln!(output, "Thank you for chatting with me. Have a great day!")?;
            break;
        }
    }

    output.flush()?;
    Ok(exchanges)
}

/// Whether a response ends the conversation ("Bye", "goodbye!", ...).
pub fn is_farewell(response: &str) -> bool {
    let normalized = response
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    normalized == "bye" || normalized == "goodbye"
}

/// Share of training patterns the model maps back to their own tag.
pub fn training_accuracy(bot: &Chatbot) -> f64 {
    let examples = bot.catalog().training_examples();
    if examples.is_empty() {
        return 0.0;
    }
    let correct = examples
        .iter()
        .filter(|example| bot.classify(example.text) == example.tag)
        .count();
    correct as f64 / examples.len() as f64
}

/// Build a chatbot from the catalog and optional config file.
fn load_chatbot(args: &CatalogArgs) -> Result<Chatbot> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ClassifierConfig::default(),
    };
    Chatbot::from_path(&args.catalog, &config)
        .with_context(|| format!("failed to initialize from {}", args.catalog.display()))
}

fn load_config(path: &Path) -> Result<ClassifierConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ClassifierConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::intent::Catalog;

    fn bot() -> Chatbot {
        let catalog = Catalog::from_json_str(
            r#"[
                {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
                {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!"]}
            ]"#,
        )
        .unwrap();
        Chatbot::initialize(catalog, &ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_run_chat_stops_after_farewell() {
        let dir = TempDir::new().unwrap();
        let log = ConversationLog::open(dir.path().join("chat_log.jsonl"));
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let exchanges = run_chat(
            &bot(),
            Cursor::new("hello\n\nbye\nhello again\n"),
            &mut output,
            Some(&log),
            &mut rng,
        )
        .unwrap();

        assert_eq!(exchanges, 2);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Chatbot: Hello!\nChatbot: Goodbye!\n"));
        assert!(text.contains("Have a great day!"));

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input, "hello");
        assert_eq!(records[1].response, "Goodbye!");
    }

    #[test]
    fn test_run_chat_without_log() {
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        let exchanges =
            run_chat(&bot(), Cursor::new("hi\nhey"), &mut output, None, &mut rng).unwrap();
        assert_eq!(exchanges, 2);
    }

    #[test]
    fn test_is_farewell() {
        assert!(is_farewell("Bye"));
        assert!(is_farewell("goodbye!"));
        assert!(is_farewell("  Goodbye.  "));
        assert!(!is_farewell("Bye! Come back soon"));
        assert!(!is_farewell("Hello!"));
    }

    #[test]
    fn test_training_accuracy() {
        assert_eq!(training_accuracy(&bot()), 1.0);
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ngram_range": [1, 2], "max_iter": 500}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.ngram_range, (1, 2));
        assert_eq!(config.max_iter, 500);
        assert_eq!(config.c, 1.0);
    }
}
