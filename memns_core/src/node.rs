//! Entry handles and the node contract shared by files and directories.

use crate::error::Result;
use crate::namespace::Namespace;
use serde::Serialize;

/// Handle to a file in a [`Namespace`].
///
/// Handles are plain indices. They are only meaningful for the namespace that
/// issued them; using one with a different namespace is a bug in the caller
/// and panics or addresses an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub(crate) usize);

/// Handle to a directory in a [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(pub(crate) usize);

/// An entry held in a directory: either a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// A leaf holding a string payload.
    File(FileId),
    /// A container of further entries.
    Directory(DirId),
}

impl Entry {
    /// The file handle, if this entry is a file.
    pub fn as_file(self) -> Option<FileId> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    /// The directory handle, if this entry is a directory.
    pub fn as_directory(self) -> Option<DirId> {
        match self {
            Entry::File(_) => None,
            Entry::Directory(dir) => Some(dir),
        }
    }

    /// Kind of this entry.
    pub fn kind(self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Directory(_) => EntryKind::Directory,
        }
    }
}

impl From<FileId> for Entry {
    fn from(file: FileId) -> Self {
        Entry::File(file)
    }
}

impl From<DirId> for Entry {
    fn from(dir: DirId) -> Self {
        Entry::Directory(dir)
    }
}

/// Entry kind, without the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Get the kind name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

/// Name and parent link carried by every node.
///
/// `attached` is true while the node sits in its parent's collection under
/// `name`. Self-parented directories are never attached.
#[derive(Debug, Clone)]
pub(crate) struct Link {
    pub(crate) name: String,
    pub(crate) parent: DirId,
    pub(crate) attached: bool,
}

/// Identity behavior shared by files and directories.
pub trait Node: Copy {
    /// Current name of the node.
    fn name(self, ns: &Namespace) -> &str;

    /// Directory owning the node. A self-parented directory returns itself.
    fn parent(self, ns: &Namespace) -> DirId;

    /// Move the node under `new_parent` as `new_name`.
    ///
    /// Fails without mutating anything if the move is not allowed.
    fn relink(self, ns: &mut Namespace, new_parent: DirId, new_name: &str) -> Result<()>;
}

impl Node for FileId {
    fn name(self, ns: &Namespace) -> &str {
        &ns.link(self.into()).name
    }

    fn parent(self, ns: &Namespace) -> DirId {
        ns.link(self.into()).parent
    }

    fn relink(self, ns: &mut Namespace, new_parent: DirId, new_name: &str) -> Result<()> {
        ns.relink_file(self, new_parent, new_name)
    }
}

impl Node for DirId {
    fn name(self, ns: &Namespace) -> &str {
        &ns.link(self.into()).name
    }

    fn parent(self, ns: &Namespace) -> DirId {
        ns.link(self.into()).parent
    }

    fn relink(self, ns: &mut Namespace, new_parent: DirId, new_name: &str) -> Result<()> {
        ns.relink_directory(self, new_parent, new_name)
    }
}

impl Node for Entry {
    fn name(self, ns: &Namespace) -> &str {
        &ns.link(self).name
    }

    fn parent(self, ns: &Namespace) -> DirId {
        ns.link(self).parent
    }

    fn relink(self, ns: &mut Namespace, new_parent: DirId, new_name: &str) -> Result<()> {
        match self {
            Entry::File(file) => ns.relink_file(file, new_parent, new_name),
            Entry::Directory(dir) => ns.relink_directory(dir, new_parent, new_name),
        }
    }
}
