//! Serializable views of a subtree.

use crate::namespace::Namespace;
use crate::node::{Entry, Node};
use serde::Serialize;

/// Recursive, owned copy of a subtree's shape.
///
/// Children appear in enumeration order; `.` and `..` are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeSnapshot {
    File {
        name: String,
        size: usize,
    },
    Directory {
        name: String,
        entries: Vec<TreeSnapshot>,
    },
}

impl TreeSnapshot {
    /// Name of the snapshot's top entry.
    pub fn name(&self) -> &str {
        match self {
            TreeSnapshot::File { name, .. } | TreeSnapshot::Directory { name, .. } => name,
        }
    }

    /// Number of entries in the snapshot, the top entry included.
    pub fn count(&self) -> usize {
        match self {
            TreeSnapshot::File { .. } => 1,
            TreeSnapshot::Directory { entries, .. } => {
                1 + entries.iter().map(TreeSnapshot::count).sum::<usize>()
            }
        }
    }
}

impl Namespace {
    /// Capture the subtree rooted at `entry`.
    pub fn snapshot(&self, entry: impl Into<Entry>) -> TreeSnapshot {
        let entry = entry.into();
        let name = entry.name(self).to_string();
        match entry {
            Entry::File(file) => TreeSnapshot::File {
                name,
                size: self.contents(file).len(),
            },
            Entry::Directory(dir) => TreeSnapshot::Directory {
                name,
                entries: self
                    .entries(dir)
                    .into_iter()
                    .skip(2)
                    .map(|(_, child)| self.snapshot(child))
                    .collect(),
            },
        }
    }
}
