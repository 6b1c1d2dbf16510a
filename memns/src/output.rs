//! Output formatting for shell commands.
//!
//! Provides abstraction layer for outputting results in text or JSON format.

use anyhow::Result;
use memns_core::{EntryKind, TreeSnapshot};
use serde::Serialize;
use std::io::{self, Write};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writer for command output with format abstraction.
pub struct OutputWriter<W = io::Stdout, E = io::Stderr> {
    format: OutputFormat,
    out: W,
    err: E,
}

impl OutputWriter {
    /// Create a new OutputWriter on stdout and stderr.
    pub fn new(json: bool) -> Self {
        Self::with_writers(json, io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> OutputWriter<W, E> {
    /// Create an OutputWriter on arbitrary writers.
    pub fn with_writers(json: bool, out: W, err: E) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            out,
            err,
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Write a successful command result.
    pub fn write(&mut self, data: &CommandOutput) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string(data)?;
                writeln!(self.out, "{}", json)?;
            }
            OutputFormat::Text => {
                let text = data.outcome.to_text();
                if !text.is_empty() {
                    write!(self.out, "{}", text)?;
                }
            }
        }
        Ok(())
    }

    /// Write an error message to stderr.
    ///
    /// In JSON mode, writes a JSON error object with success=false.
    /// In text mode, writes the error message directly.
    pub fn write_error(&mut self, error: &ErrorOutput) {
        match self.format {
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(error) {
                    let _ = writeln!(self.err, "{}", json);
                }
            }
            OutputFormat::Text => {
                let _ = writeln!(self.err, "Error (line {}): {}", error.line, error.error);
            }
        }
    }

    /// Print the interactive prompt. JSON mode stays prompt-free.
    pub fn prompt(&mut self) -> Result<()> {
        if self.format == OutputFormat::Text {
            write!(self.out, "memns> ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Give back the underlying writers.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

// ============================================================================
// Data Transfer Objects (DTOs) for JSON output
// ============================================================================

/// Error output structure.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub result_code: u8,
    pub line: usize,
    pub command: String,
    pub error: String,
}

/// Output for one executed command.
#[derive(Debug, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub result_code: u8,
    pub line: usize,
    pub command: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Entry information for `ls`.
#[derive(Debug, Clone, Serialize)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
}

/// Statistics for `stat`.
#[derive(Debug, Serialize)]
pub struct StatInfo {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_count: Option<usize>,
}

/// Data variants, one per command family.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Created { path: String, kind: EntryKind },
    Written { path: String, size: usize },
    Contents { path: String, contents: String },
    Moved { from: String, to: String },
    Removed { path: String, kind: EntryKind },
    Listing { path: String, entries: Vec<EntryInfo> },
    Tree { path: String, root: TreeSnapshot },
    Stat(StatInfo),
}

impl Outcome {
    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        match self {
            Outcome::Created { path, kind } => format!("Created {} {}\n", kind.as_str(), path),
            Outcome::Written { path, size } => format!("Wrote {} bytes to {}\n", size, path),
            Outcome::Contents { contents, .. } => {
                if contents.is_empty() || contents.ends_with('\n') {
                    contents.clone()
                } else {
                    format!("{}\n", contents)
                }
            }
            Outcome::Moved { from, to } => format!("Moved {} -> {}\n", from, to),
            Outcome::Removed { path, kind } => format!("Removed {} {}\n", kind.as_str(), path),
            Outcome::Listing { entries, .. } => entries
                .iter()
                .map(|entry| format!("{} {}\n", kind_char(entry.kind), entry.name))
                .collect(),
            Outcome::Tree { path, root } => {
                let mut text = format!("{}\n", path);
                if let TreeSnapshot::Directory { entries, .. } = root {
                    for entry in entries {
                        render_tree(entry, 1, &mut text);
                    }
                }
                text
            }
            Outcome::Stat(stat) => {
                let mut text = format!(
                    "Path: {}\nName: {}\nType: {}\nParent: {}\n",
                    stat.path,
                    stat.name,
                    stat.kind.as_str(),
                    stat.parent
                );
                if let Some(size) = stat.size {
                    text.push_str(&format!("Size: {} bytes\n", size));
                }
                if let Some(count) = stat.entry_count {
                    text.push_str(&format!("Entries: {}\n", count));
                }
                text
            }
        }
    }
}

fn kind_char(kind: EntryKind) -> char {
    match kind {
        EntryKind::File => 'f',
        EntryKind::Directory => 'd',
    }
}

fn render_tree(node: &TreeSnapshot, depth: usize, text: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        TreeSnapshot::File { name, size } => {
            text.push_str(&format!("{}{} ({} bytes)\n", indent, name, size));
        }
        TreeSnapshot::Directory { name, entries } => {
            text.push_str(&format!("{}{}/\n", indent, name));
            for entry in entries {
                render_tree(entry, depth + 1, text);
            }
        }
    }
}
