//! Append-only conversation log stored as JSON Lines.
//!
//! Each exchange is one line: `{"input": ..., "response": ..., "timestamp": ...}`.
//! The chatbot itself never touches the log; front-ends append to it after
//! each response.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One logged exchange between a user and the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// What the user typed.
    pub input: String,
    /// What the bot answered.
    pub response: String,
    /// When the exchange happened.
    pub timestamp: DateTime<Utc>,
}

impl ConversationRecord {
    /// Create a record stamped with the current time.
    pub fn now<I: Into<String>, R: Into<String>>(input: I, response: R) -> Self {
        Self {
            input: input.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A conversation log file.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    path: PathBuf,
}

impl ConversationLog {
    /// Point at a log file; it is created on the first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the end of the log.
    pub fn append(&self, record: &ConversationRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        debug!("Appended conversation record to {}", self.path.display());
        Ok(())
    }

    /// Read every record in the order it was written.
    ///
    /// A log that does not exist yet is an empty history.
    pub fn records(&self) -> Result<Vec<ConversationRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}
