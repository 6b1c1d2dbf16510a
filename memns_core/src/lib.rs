//! # memns Core
//!
//! An in-memory, path-addressable hierarchical namespace.
//!
//! This library models a virtual filesystem tree: files holding a string
//! payload, directories holding name-keyed entries, and a self-parented root.
//! Entries can be created, moved and renamed ("relinked"), looked up by name or
//! absolute path, and enumerated. Nothing is persisted.
//!
//! ## Features
//!
//! - Unique names within a directory, with implicit `.` and `..` entries
//! - Relink that refuses cycles and never discards a non-empty directory
//! - All-or-nothing operations: a failed call leaves the tree untouched
//! - Isolated namespaces for tests, plus one process-wide namespace
//!
//! ## Example
//!
//! ```
//! use memns_core::{Entry, Namespace, Node};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ns = Namespace::new();
//! let root = ns.root();
//!
//! let readme = ns.new_file("readme", root)?;
//! ns.set_contents(readme, "hi");
//! let docs = ns.new_directory("docs", Some(root))?;
//!
//! readme.relink(&mut ns, docs, "readme")?;
//!
//! assert_eq!(ns.resolve_path("/docs/readme")?, Entry::File(readme));
//! assert!(ns.resolve_path("/readme").is_err());
//! # Ok(())
//! # }
//! ```

mod error;
mod global;
mod namespace;
mod node;
mod path;
mod relink;
mod snapshot;

pub use error::{Error, Result};
pub use global::global;
pub use namespace::{Namespace, PARENT_ENTRY, SELF_ENTRY};
pub use node::{DirId, Entry, EntryKind, FileId, Node};
pub use path::{SEPARATOR, is_valid_name};
pub use snapshot::TreeSnapshot;
