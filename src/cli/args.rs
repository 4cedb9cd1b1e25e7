//! Command line argument parsing for the intentbot CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// intentbot - an intent-matching chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "intentbot")]
#[command(about = "Answer utterances with canned responses chosen by an intent classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentBotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl IntentBotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat interactively, one utterance per line on stdin
    Chat(ChatArgs),

    /// Answer a single utterance
    Ask(AskArgs),

    /// Show the logged conversation history
    History(HistoryArgs),

    /// Check that a catalog loads and trains
    Validate(ValidateArgs),
}

/// Catalog and training options shared by commands that build a chatbot.
#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    /// Intent catalog file (JSON)
    #[arg(short, long, value_name = "CATALOG_FILE", env = "INTENTBOT_CATALOG")]
    pub catalog: PathBuf,

    /// Classifier configuration file (JSON); defaults are used when omitted
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Conversation log file (JSON Lines); nothing is logged when omitted
    #[arg(short, long, value_name = "LOG_FILE")]
    pub log: Option<PathBuf>,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for a one-shot question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// The utterance to answer
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Conversation log file (JSON Lines)
    #[arg(short, long, value_name = "LOG_FILE")]
    pub log: Option<PathBuf>,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for showing history
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Conversation log file (JSON Lines)
    #[arg(short, long, value_name = "LOG_FILE")]
    pub log: PathBuf,

    /// Only show the most recent N exchanges
    #[arg(short = 'n', long)]
    pub last: Option<usize>,
}

/// Arguments for validating a catalog
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
