//! Audit logging of guard decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// One JSONL record per evaluated command.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// The command as received.
    pub command: String,
    /// The substitute command, when one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<String>,
    /// Whether the command was refused outright.
    pub blocked: bool,
    /// Reason for refusing (if blocked).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuditEntry {
    /// Record a rewrite.
    pub fn rewrite(command: &str, rewritten: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            rewritten: Some(rewritten.to_string()),
            blocked: false,
            reason: None,
        }
    }

    /// Record a refusal.
    pub fn deny(command: &str, reason: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            rewritten: None,
            blocked: true,
            reason: Some(reason.to_string()),
        }
    }
}

/// Audit logger appending entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }
}
