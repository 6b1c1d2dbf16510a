//! Namespace arena, entry construction, and directory collections.

use crate::error::{Error, Result};
use crate::node::{DirId, Entry, EntryKind, FileId, Link};
use crate::path::validate_name;
use hashlink::LinkedHashMap;

/// Name of the implicit entry pointing at the directory itself.
pub const SELF_ENTRY: &str = ".";

/// Name of the implicit entry pointing at the directory's parent.
pub const PARENT_ENTRY: &str = "..";

#[derive(Debug, Clone)]
struct FileSlot {
    link: Link,
    contents: String,
}

#[derive(Debug, Clone)]
struct DirSlot {
    link: Link,
    /// Real entries only; "." and ".." are derived from `link`.
    entries: LinkedHashMap<String, Entry>,
}

/// An in-memory hierarchical namespace.
///
/// Owns every file and directory it has created. Each namespace has its own
/// root directory, named `""` and parented by itself. Nodes are never freed
/// while the namespace lives: an entry removed from its directory is detached
/// and its handle stays usable.
#[derive(Debug, Clone)]
pub struct Namespace {
    files: Vec<FileSlot>,
    dirs: Vec<DirSlot>,
    root: DirId,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Create a namespace holding only an empty root.
    pub fn new() -> Self {
        let mut ns = Self {
            files: Vec::new(),
            dirs: Vec::new(),
            root: DirId(0),
        };
        ns.root = ns.push_self_parented("");
        ns
    }

    /// The root directory.
    pub fn root(&self) -> DirId {
        self.root
    }

    /// Number of nodes ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    /// Create a file named `name` inside `parent`.
    pub fn new_file(&mut self, name: &str, parent: DirId) -> Result<FileId> {
        validate_name(name)?;
        if self.has_entry_named(parent, name) {
            return Err(Error::name_conflict(name));
        }

        let file = FileId(self.files.len());
        self.files.push(FileSlot {
            link: Link {
                name: name.to_string(),
                parent,
                attached: true,
            },
            contents: String::new(),
        });
        self.dir_slot_mut(parent)
            .entries
            .insert(name.to_string(), Entry::File(file));

        Ok(file)
    }

    /// Create a directory named `name`.
    ///
    /// With a parent the directory is attached to it. Without one the new
    /// directory is self-parented, a root of its own that nothing can move.
    pub fn new_directory(&mut self, name: &str, parent: Option<DirId>) -> Result<DirId> {
        let Some(parent) = parent else {
            return Ok(self.push_self_parented(name));
        };

        validate_name(name)?;
        if self.has_entry_named(parent, name) {
            return Err(Error::name_conflict(name));
        }

        let dir = DirId(self.dirs.len());
        self.dirs.push(DirSlot {
            link: Link {
                name: name.to_string(),
                parent,
                attached: true,
            },
            entries: LinkedHashMap::new(),
        });
        self.dir_slot_mut(parent)
            .entries
            .insert(name.to_string(), Entry::Directory(dir));

        Ok(dir)
    }

    fn push_self_parented(&mut self, name: &str) -> DirId {
        let dir = DirId(self.dirs.len());
        self.dirs.push(DirSlot {
            link: Link {
                name: name.to_string(),
                parent: dir,
                attached: false,
            },
            entries: LinkedHashMap::new(),
        });
        dir
    }

    /// Kind of an entry.
    pub fn kind(&self, entry: impl Into<Entry>) -> EntryKind {
        entry.into().kind()
    }

    /// Whether the entry currently sits in its parent's collection.
    ///
    /// Self-parented directories are never attached.
    pub fn is_attached(&self, entry: impl Into<Entry>) -> bool {
        self.link(entry.into()).attached
    }

    /// Whether `dir` is its own parent.
    pub fn is_self_parented(&self, dir: DirId) -> bool {
        self.dir_slot(dir).link.parent == dir
    }

    /// File payload.
    pub fn contents(&self, file: FileId) -> &str {
        &self.file_slot(file).contents
    }

    /// Replace the file payload.
    pub fn set_contents(&mut self, file: FileId, contents: impl Into<String>) {
        self.file_slot_mut(file).contents = contents.into();
    }

    /// Append to the file payload.
    pub fn append_contents(&mut self, file: FileId, more: &str) {
        self.file_slot_mut(file).contents.push_str(more);
    }

    /// Snapshot of the directory's entries, starting with `.` and `..`.
    pub fn entries(&self, dir: DirId) -> Vec<(String, Entry)> {
        let slot = self.dir_slot(dir);
        let mut entries = Vec::with_capacity(slot.entries.len() + 2);
        entries.push((SELF_ENTRY.to_string(), Entry::Directory(dir)));
        entries.push((PARENT_ENTRY.to_string(), Entry::Directory(slot.link.parent)));
        entries.extend(
            slot.entries
                .iter()
                .map(|(name, entry)| (name.clone(), *entry)),
        );
        entries
    }

    /// Insert a detached entry into `dir` under its current name.
    ///
    /// The entry's parent becomes `dir`.
    pub fn add_entry(&mut self, dir: DirId, entry: impl Into<Entry>) -> Result<()> {
        let entry = entry.into();
        let name = self.link(entry).name.clone();

        if self.has_entry_named(dir, &name) {
            return Err(Error::name_conflict(name));
        }
        if let Entry::Directory(child) = entry {
            if self.is_self_parented(child) {
                return Err(Error::root_immovable(name));
            }
            if self.is_subdirectory_of(dir, child) {
                return Err(Error::cycle(name));
            }
        }
        if self.link(entry).attached {
            return Err(Error::already_attached(name));
        }

        self.attach(dir, entry, &name);
        Ok(())
    }

    /// Remove the entry called `name` from `dir` and return it, detached.
    pub fn remove_entry_named(&mut self, dir: DirId, name: &str) -> Result<Entry> {
        if name == SELF_ENTRY || name == PARENT_ENTRY {
            return Err(Error::invalid_name(
                name,
                "implicit entries cannot be removed",
            ));
        }

        let entry = self
            .dir_slot(dir)
            .entries
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(name))?;
        self.detach(entry);

        Ok(entry)
    }

    /// Whether `dir` has an entry called `name`, implicit entries included.
    pub fn has_entry_named(&self, dir: DirId, name: &str) -> bool {
        name == SELF_ENTRY
            || name == PARENT_ENTRY
            || self.dir_slot(dir).entries.contains_key(name)
    }

    /// Look up the entry called `name` in `dir`, implicit entries included.
    pub fn get_entry_named(&self, dir: DirId, name: &str) -> Option<Entry> {
        match name {
            SELF_ENTRY => Some(Entry::Directory(dir)),
            PARENT_ENTRY => Some(Entry::Directory(self.dir_slot(dir).link.parent)),
            _ => self.dir_slot(dir).entries.get(name).copied(),
        }
    }

    /// Whether `dir` holds nothing but `.` and `..`.
    pub fn is_empty(&self, dir: DirId) -> bool {
        self.dir_slot(dir).entries.is_empty()
    }

    /// Number of real entries in `dir`, not counting `.` and `..`.
    pub fn entry_count(&self, dir: DirId) -> usize {
        self.dir_slot(dir).entries.len()
    }

    pub(crate) fn link(&self, entry: Entry) -> &Link {
        match entry {
            Entry::File(file) => &self.file_slot(file).link,
            Entry::Directory(dir) => &self.dir_slot(dir).link,
        }
    }

    fn link_mut(&mut self, entry: Entry) -> &mut Link {
        match entry {
            Entry::File(file) => &mut self.file_slot_mut(file).link,
            Entry::Directory(dir) => &mut self.dir_slot_mut(dir).link,
        }
    }

    /// Take `entry` out of its parent's collection, if it is in one.
    pub(crate) fn detach(&mut self, entry: Entry) {
        let link = self.link(entry);
        if !link.attached {
            return;
        }
        let (parent, name) = (link.parent, link.name.clone());
        self.dir_slot_mut(parent).entries.remove(&name);
        self.link_mut(entry).attached = false;
    }

    /// Put a detached `entry` into `dir` as `name`.
    pub(crate) fn attach(&mut self, dir: DirId, entry: Entry, name: &str) {
        let link = self.link_mut(entry);
        link.name = name.to_string();
        link.parent = dir;
        link.attached = true;
        self.dir_slot_mut(dir).entries.insert(name.to_string(), entry);
    }

    fn file_slot(&self, file: FileId) -> &FileSlot {
        &self.files[file.0]
    }

    fn file_slot_mut(&mut self, file: FileId) -> &mut FileSlot {
        &mut self.files[file.0]
    }

    fn dir_slot(&self, dir: DirId) -> &DirSlot {
        &self.dirs[dir.0]
    }

    fn dir_slot_mut(&mut self, dir: DirId) -> &mut DirSlot {
        &mut self.dirs[dir.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn test_new_namespace_root() {
        let ns = Namespace::new();
        let root = ns.root();

        assert_eq!(root.name(&ns), "");
        assert_eq!(root.parent(&ns), root);
        assert!(ns.is_self_parented(root));
        assert!(ns.is_empty(root));
        assert_eq!(ns.node_count(), 1);
    }

    #[test]
    fn test_implicit_entries() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let docs = ns.new_directory("docs", Some(root)).unwrap();

        let entries = ns.entries(docs);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (".".to_string(), Entry::Directory(docs)));
        assert_eq!(entries[1], ("..".to_string(), Entry::Directory(root)));

        let root_entries = ns.entries(root);
        assert_eq!(root_entries[0].1, Entry::Directory(root));
        assert_eq!(root_entries[1].1, Entry::Directory(root));
        assert_eq!(root_entries[2], ("docs".to_string(), Entry::Directory(docs)));
    }

    #[test]
    fn test_entries_insertion_order() {
        let mut ns = Namespace::new();
        let root = ns.root();
        ns.new_file("c", root).unwrap();
        ns.new_file("a", root).unwrap();
        ns.new_directory("b", Some(root)).unwrap();

        let names: Vec<String> = ns.entries(root).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec![".", "..", "c", "a", "b"]);
    }

    #[test]
    fn test_new_file_name_conflict() {
        let mut ns = Namespace::new();
        let root = ns.root();
        ns.new_file("a", root).unwrap();

        assert_eq!(ns.new_file("a", root), Err(Error::name_conflict("a")));
        assert!(matches!(
            ns.new_directory("a", Some(root)),
            Err(Error::NameConflict { .. })
        ));
        assert_eq!(ns.entry_count(root), 1);
    }

    #[test]
    fn test_new_entry_invalid_names() {
        let mut ns = Namespace::new();
        let root = ns.root();

        for name in ["", ".", "..", "a/b", "nul\0byte"] {
            assert!(matches!(
                ns.new_file(name, root),
                Err(Error::InvalidName { .. })
            ));
            assert!(matches!(
                ns.new_directory(name, Some(root)),
                Err(Error::InvalidName { .. })
            ));
        }
        assert!(ns.is_empty(root));
    }

    #[test]
    fn test_parentless_directory_is_self_parented() {
        let mut ns = Namespace::new();
        let other = ns.new_directory("", None).unwrap();

        assert_ne!(other, ns.root());
        assert_eq!(other.parent(&ns), other);
        assert!(ns.is_self_parented(other));
        assert!(!ns.is_attached(other));
        assert_eq!(ns.get_entry_named(other, ".."), Some(Entry::Directory(other)));
    }

    #[test]
    fn test_contents() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let file = ns.new_file("notes", root).unwrap();

        assert_eq!(ns.contents(file), "");
        ns.set_contents(file, "hello");
        ns.append_contents(file, " world");
        assert_eq!(ns.contents(file), "hello world");
    }

    #[test]
    fn test_add_entry_and_lookup() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let docs = ns.new_directory("docs", Some(root)).unwrap();
        let file = ns.new_file("x", root).unwrap();

        let removed = ns.remove_entry_named(root, "x").unwrap();
        assert_eq!(removed, Entry::File(file));
        assert!(!ns.is_attached(file));

        ns.add_entry(docs, file).unwrap();
        assert_eq!(ns.get_entry_named(docs, "x"), Some(Entry::File(file)));
        assert!(ns.has_entry_named(docs, "x"));
        assert_eq!(file.parent(&ns), docs);

        assert_eq!(ns.add_entry(docs, file), Err(Error::name_conflict("x")));
    }

    #[test]
    fn test_add_entry_same_name_different_entry() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let docs = ns.new_directory("docs", Some(root)).unwrap();
        ns.new_file("x", docs).unwrap();
        let other = ns.new_file("x", root).unwrap();
        ns.remove_entry_named(root, "x").unwrap();

        assert_eq!(ns.add_entry(docs, other), Err(Error::name_conflict("x")));
        assert!(!ns.is_attached(other));
    }

    #[test]
    fn test_add_entry_already_attached() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let docs = ns.new_directory("docs", Some(root)).unwrap();
        let file = ns.new_file("x", root).unwrap();

        assert_eq!(ns.add_entry(docs, file), Err(Error::already_attached("x")));
        assert_eq!(ns.get_entry_named(root, "x"), Some(Entry::File(file)));
    }

    #[test]
    fn test_add_entry_rejects_cycles_and_roots() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let a = ns.new_directory("a", Some(root)).unwrap();
        let b = ns.new_directory("b", Some(a)).unwrap();
        ns.remove_entry_named(root, "a").unwrap();

        assert_eq!(ns.add_entry(b, a), Err(Error::cycle("a")));
        assert_eq!(ns.add_entry(a, a), Err(Error::cycle("a")));

        let other_root = ns.new_directory("elsewhere", None).unwrap();
        assert_eq!(
            ns.add_entry(root, other_root),
            Err(Error::root_immovable("elsewhere"))
        );
        assert_eq!(ns.add_entry(b, root), Err(Error::root_immovable("")));
    }

    #[test]
    fn test_remove_entry_named() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let dir = ns.new_directory("d", Some(root)).unwrap();
        ns.new_file("inner", dir).unwrap();

        assert_eq!(ns.remove_entry_named(root, "d"), Ok(Entry::Directory(dir)));
        assert!(!ns.has_entry_named(root, "d"));
        assert_eq!(ns.remove_entry_named(root, "d"), Err(Error::not_found("d")));

        // The detached subtree keeps its contents.
        assert!(ns.has_entry_named(dir, "inner"));
    }

    #[test]
    fn test_remove_implicit_entries_rejected() {
        let mut ns = Namespace::new();
        let root = ns.root();

        assert!(matches!(
            ns.remove_entry_named(root, "."),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            ns.remove_entry_named(root, ".."),
            Err(Error::InvalidName { .. })
        ));
        assert_eq!(ns.entries(root).len(), 2);
    }

    #[test]
    fn test_is_directory_empty() {
        let mut ns = Namespace::new();
        let root = ns.root();
        let dir = ns.new_directory("d", Some(root)).unwrap();
        assert!(ns.is_empty(dir));
        assert_eq!(ns.entries(dir).len(), 2);

        ns.new_file("f", dir).unwrap();
        assert!(!ns.is_empty(dir));
        assert_eq!(ns.entries(dir).len(), 3);

        ns.remove_entry_named(dir, "f").unwrap();
        assert!(ns.is_empty(dir));
    }
}
