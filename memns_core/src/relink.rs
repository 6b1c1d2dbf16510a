//! Moving and renaming entries.
//!
//! A relink validates everything before it touches the tree: a failing call
//! leaves every collection, name and parent exactly as it found them.

use crate::error::{Error, Result};
use crate::namespace::Namespace;
use crate::node::{DirId, Entry, FileId};
use crate::path::validate_name;

impl Namespace {
    /// Move or rename any entry.
    pub fn relink(
        &mut self,
        entry: impl Into<Entry>,
        new_parent: DirId,
        new_name: &str,
    ) -> Result<()> {
        match entry.into() {
            Entry::File(file) => self.relink_file(file, new_parent, new_name),
            Entry::Directory(dir) => self.relink_directory(dir, new_parent, new_name),
        }
    }

    /// Move `file` under `new_parent` as `new_name`.
    ///
    /// A file already sitting at the target name is replaced and left
    /// detached. A directory at the target name is a conflict.
    pub fn relink_file(
        &mut self,
        file: FileId,
        new_parent: DirId,
        new_name: &str,
    ) -> Result<()> {
        validate_name(new_name)?;
        if self.is_at(file.into(), new_parent, new_name) {
            return Ok(());
        }

        let displaced = match self.get_entry_named(new_parent, new_name) {
            Some(Entry::Directory(_)) => return Err(Error::name_conflict(new_name)),
            Some(Entry::File(existing)) => Some(existing),
            None => None,
        };

        if let Some(existing) = displaced {
            self.detach(existing.into());
        }
        self.detach(file.into());
        self.attach(new_parent, file.into(), new_name);

        Ok(())
    }

    /// Move `dir` under `new_parent` as `new_name`.
    ///
    /// An empty directory at the target name is replaced; a non-empty one or
    /// a file is an error. `new_parent` may not be `dir` or lie beneath it.
    pub fn relink_directory(
        &mut self,
        dir: DirId,
        new_parent: DirId,
        new_name: &str,
    ) -> Result<()> {
        if self.is_self_parented(dir) {
            return Err(Error::root_immovable(self.link(dir.into()).name.clone()));
        }
        validate_name(new_name)?;
        if self.is_subdirectory_of(new_parent, dir) {
            return Err(Error::cycle(self.link(dir.into()).name.clone()));
        }
        if self.is_at(dir.into(), new_parent, new_name) {
            return Ok(());
        }

        let displaced = match self.get_entry_named(new_parent, new_name) {
            Some(Entry::File(_)) => return Err(Error::name_conflict(new_name)),
            Some(Entry::Directory(existing)) if !self.is_empty(existing) => {
                return Err(Error::not_empty(new_name));
            }
            Some(Entry::Directory(existing)) => Some(existing),
            None => None,
        };

        if let Some(existing) = displaced {
            self.detach(existing.into());
        }
        self.detach(dir.into());
        self.attach(new_parent, dir.into(), new_name);

        Ok(())
    }

    /// Whether `candidate` is `dir` or lies somewhere beneath it.
    ///
    /// Walks up from `candidate` until it meets `dir` or a self-parented
    /// directory.
    pub fn is_subdirectory_of(&self, candidate: DirId, dir: DirId) -> bool {
        let mut current = candidate;
        loop {
            if current == dir {
                return true;
            }
            let parent = self.link(current.into()).parent;
            if parent == current {
                return false;
            }
            current = parent;
        }
    }

    fn is_at(&self, entry: Entry, parent: DirId, name: &str) -> bool {
        let link = self.link(entry);
        link.attached && link.parent == parent && link.name == name
    }
}
