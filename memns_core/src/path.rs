//! Path resolution and name validation.

use crate::error::{Error, Result};
use crate::namespace::{Namespace, PARENT_ENTRY, SELF_ENTRY};
use crate::node::{Entry, Node};

/// Path separator.
pub const SEPARATOR: char = '/';

/// Returns true if `name` can be given to a file or directory.
///
/// # Examples
///
/// ```
/// use memns_core::is_valid_name;
///
/// assert!(is_valid_name("notes.txt"));
/// assert!(!is_valid_name(".."));
/// assert!(!is_valid_name("a/b"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "name cannot be empty"));
    }
    if name == SELF_ENTRY || name == PARENT_ENTRY {
        return Err(Error::invalid_name(name, "name is reserved"));
    }
    if name.contains(SEPARATOR) {
        return Err(Error::invalid_name(name, "name cannot contain '/'"));
    }
    if name.contains('\0') {
        return Err(Error::invalid_name(name, "name cannot contain null bytes"));
    }
    Ok(())
}

impl Namespace {
    /// Resolve an absolute path, starting from the root.
    ///
    /// Empty segments are skipped, so `//a///b/` is `/a/b`. Segments named
    /// `.` and `..` go through the implicit entries like any other name.
    pub fn resolve_path(&self, path: &str) -> Result<Entry> {
        let Some(rest) = path.strip_prefix(SEPARATOR) else {
            return Err(Error::invalid_path(path));
        };

        let mut current = Entry::Directory(self.root());
        for segment in rest.split(SEPARATOR).filter(|s| !s.is_empty()) {
            let dir = match current {
                Entry::File(file) => return Err(Error::not_a_directory(file.name(self))),
                Entry::Directory(dir) => dir,
            };
            current = self
                .get_entry_named(dir, segment)
                .ok_or_else(|| Error::not_found(segment))?;
        }

        Ok(current)
    }

    /// Absolute path of an entry reachable from the root.
    ///
    /// Returns `None` if the entry, or any directory above it, is detached or
    /// belongs to another self-parented directory.
    pub fn path_of(&self, entry: impl Into<Entry>) -> Option<String> {
        let root = Entry::Directory(self.root());
        let mut segments = Vec::new();
        let mut current = entry.into();

        while current != root {
            if !self.is_attached(current) {
                return None;
            }
            segments.push(current.name(self));
            current = Entry::Directory(current.parent(self));
        }

        if segments.is_empty() {
            return Some(SEPARATOR.to_string());
        }

        let mut path = String::new();
        for segment in segments.iter().rev() {
            path.push(SEPARATOR);
            path.push_str(segment);
        }
        Some(path)
    }
}
