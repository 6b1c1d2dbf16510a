//! Line-oriented command interpreter over a namespace.

use crate::output::{CommandOutput, EntryInfo, ErrorOutput, Outcome, OutputWriter, StatInfo};
use anyhow::{Context, Result, anyhow, bail};
use memns_core::{DirId, Entry, Namespace, Node, SEPARATOR};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir { path: String },
    Touch { path: String },
    Write { path: String, text: String },
    Append { path: String, text: String },
    Cat { path: String },
    Mv { src: String, dst: String },
    Rm { path: String },
    Ls { path: String },
    Tree { path: String },
    Stat { path: String },
}

impl Command {
    /// Parse one script line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("mkdir", [path]) => Command::Mkdir {
                path: path.to_string(),
            },
            ("touch", [path]) => Command::Touch {
                path: path.to_string(),
            },
            ("write", [path, text @ ..]) => Command::Write {
                path: path.to_string(),
                text: text.join(" "),
            },
            ("append", [path, text @ ..]) => Command::Append {
                path: path.to_string(),
                text: text.join(" "),
            },
            ("cat", [path]) => Command::Cat {
                path: path.to_string(),
            },
            ("mv", [src, dst]) => Command::Mv {
                src: src.to_string(),
                dst: dst.to_string(),
            },
            ("rm", [path]) => Command::Rm {
                path: path.to_string(),
            },
            ("ls", []) => Command::Ls {
                path: "/".to_string(),
            },
            ("ls", [path]) => Command::Ls {
                path: path.to_string(),
            },
            ("tree", []) => Command::Tree {
                path: "/".to_string(),
            },
            ("tree", [path]) => Command::Tree {
                path: path.to_string(),
            },
            ("stat", [path]) => Command::Stat {
                path: path.to_string(),
            },
            ("mkdir" | "touch" | "write" | "append" | "cat" | "mv" | "rm" | "ls" | "tree"
            | "stat", _) => bail!("Wrong number of arguments for {}", name),
            _ => bail!("Unknown command: {}", name),
        };

        Ok(Some(command))
    }

    /// Run the command against `ns`.
    pub fn execute(&self, ns: &mut Namespace) -> Result<Outcome> {
        match self {
            Command::Mkdir { path } => {
                let (parent, name) = parent_and_name(ns, path)?;
                ns.new_directory(name, Some(parent))?;
                Ok(Outcome::Created {
                    path: path.clone(),
                    kind: memns_core::EntryKind::Directory,
                })
            }
            Command::Touch { path } => {
                let (parent, name) = parent_and_name(ns, path)?;
                if ns.get_entry_named(parent, name).and_then(Entry::as_file).is_none() {
                    ns.new_file(name, parent)?;
                }
                Ok(Outcome::Created {
                    path: path.clone(),
                    kind: memns_core::EntryKind::File,
                })
            }
            Command::Write { path, text } => {
                let file = open_or_create(ns, path)?;
                ns.set_contents(file, text.as_str());
                Ok(Outcome::Written {
                    path: path.clone(),
                    size: ns.contents(file).len(),
                })
            }
            Command::Append { path, text } => {
                let file = open_or_create(ns, path)?;
                ns.append_contents(file, text);
                Ok(Outcome::Written {
                    path: path.clone(),
                    size: ns.contents(file).len(),
                })
            }
            Command::Cat { path } => {
                let file = ns
                    .resolve_path(path)?
                    .as_file()
                    .ok_or_else(|| anyhow!("Is a directory: {}", path))?;
                Ok(Outcome::Contents {
                    path: path.clone(),
                    contents: ns.contents(file).to_string(),
                })
            }
            Command::Mv { src, dst } => {
                let entry = ns.resolve_path(src)?;
                let (parent, name) = parent_and_name(ns, dst)?;
                ns.relink(entry, parent, name)?;
                Ok(Outcome::Moved {
                    from: src.clone(),
                    to: dst.clone(),
                })
            }
            Command::Rm { path } => {
                let (parent, name) = parent_and_name(ns, path)?;
                let removed = ns.remove_entry_named(parent, name)?;
                Ok(Outcome::Removed {
                    path: path.clone(),
                    kind: removed.kind(),
                })
            }
            Command::Ls { path } => {
                let entries = match ns.resolve_path(path)? {
                    Entry::Directory(dir) => ns
                        .entries(dir)
                        .into_iter()
                        .map(|(name, entry)| EntryInfo {
                            name,
                            kind: entry.kind(),
                        })
                        .collect(),
                    file @ Entry::File(_) => vec![EntryInfo {
                        name: file.name(ns).to_string(),
                        kind: file.kind(),
                    }],
                };
                Ok(Outcome::Listing {
                    path: path.clone(),
                    entries,
                })
            }
            Command::Tree { path } => {
                let entry = ns.resolve_path(path)?;
                Ok(Outcome::Tree {
                    path: path.clone(),
                    root: ns.snapshot(entry),
                })
            }
            Command::Stat { path } => {
                let entry = ns.resolve_path(path)?;
                let parent = entry.parent(ns);
                let (size, entry_count) = match entry {
                    Entry::File(file) => (Some(ns.contents(file).len()), None),
                    Entry::Directory(dir) => (None, Some(ns.entry_count(dir))),
                };
                Ok(Outcome::Stat(StatInfo {
                    path: ns.path_of(entry).unwrap_or_else(|| path.clone()),
                    name: entry.name(ns).to_string(),
                    kind: entry.kind(),
                    parent: ns.path_of(parent).unwrap_or_default(),
                    size,
                    entry_count,
                }))
            }
        }
    }
}

/// Split an absolute path into its parent directory and final name.
///
/// Trailing slashes are ignored, so `/a/b/` names `b` inside `/a`.
pub fn split_path(path: &str) -> Result<(&str, &str)> {
    if !path.starts_with(SEPARATOR) {
        return Err(memns_core::Error::invalid_path(path).into());
    }
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rsplit_once(SEPARATOR) {
        Some((_, "")) | None => bail!("Path has no final component: {}", path),
        Some(("", name)) => Ok(("/", name)),
        Some((parent, name)) => Ok((parent, name)),
    }
}

fn parent_and_name<'p>(ns: &Namespace, path: &'p str) -> Result<(DirId, &'p str)> {
    let (parent_path, name) = split_path(path)?;
    let parent = ns
        .resolve_path(parent_path)?
        .as_directory()
        .ok_or_else(|| memns_core::Error::not_a_directory(parent_path))?;
    Ok((parent, name))
}

fn open_or_create(ns: &mut Namespace, path: &str) -> Result<memns_core::FileId> {
    let (parent, name) = parent_and_name(ns, path)?;
    match ns.get_entry_named(parent, name) {
        Some(Entry::File(file)) => Ok(file),
        Some(Entry::Directory(_)) => bail!("Is a directory: {}", path),
        None => Ok(ns.new_file(name, parent)?),
    }
}

/// Result code reported for a failed command.
///
/// Namespace errors get one code per kind; anything else (parse errors,
/// wrong entry kinds) is 1.
pub fn result_code(error: &anyhow::Error) -> u8 {
    use memns_core::Error;

    match error.downcast_ref::<Error>() {
        Some(Error::NameConflict { .. }) => 2,
        Some(Error::NotEmpty { .. }) => 3,
        Some(Error::CycleError { .. }) => 4,
        Some(Error::NotFound { .. }) => 5,
        Some(Error::NotADirectory { .. }) => 6,
        Some(Error::InvalidPath { .. }) => 7,
        Some(Error::InvalidName { .. }) => 8,
        Some(Error::RootImmovable { .. }) => 9,
        Some(Error::AlreadyAttached { .. }) => 10,
        None => 1,
    }
}

/// Options for [`run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Continue after a failing command instead of stopping.
    pub keep_going: bool,
    /// Print a prompt before reading each line.
    pub interactive: bool,
}

/// Execute every line of `input` against `ns`.
///
/// Returns the number of failed commands. Without `keep_going` execution
/// stops at the first failure.
pub fn run<R, W, E>(
    ns: &mut Namespace,
    input: R,
    output: &mut OutputWriter<W, E>,
    options: RunOptions,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut failures = 0;
    let mut lines = input.lines().enumerate();

    loop {
        if options.interactive {
            output.prompt()?;
        }
        let Some((index, line)) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;
        let number = index + 1;

        let result = Command::parse(&line).and_then(|command| match command {
            Some(command) => {
                debug!("Executing line {number}: {command:?}");
                command.execute(ns).map(Some)
            }
            None => Ok(None),
        });

        match result {
            Ok(Some(outcome)) => output.write(&CommandOutput {
                success: true,
                result_code: 0,
                line: number,
                command: line.trim().to_string(),
                outcome,
            })?,
            Ok(None) => {}
            Err(error) => {
                failures += 1;
                output.write_error(&ErrorOutput {
                    success: false,
                    result_code: result_code(&error),
                    line: number,
                    command: line.trim().to_string(),
                    error: error.to_string(),
                });
                if !options.keep_going {
                    break;
                }
                warn!("Line {number} failed, continuing: {error}");
            }
        }
    }

    Ok(failures)
}
