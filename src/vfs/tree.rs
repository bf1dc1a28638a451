use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{PathKey, SEPARATOR};
use crate::error::{EntryKind, HostError, Result};

/// Children of a directory, in insertion order.
pub type Children<T> = IndexMap<SmolStr, NamespaceEntry<T>>;

/// A node of the namespace: either a directory or a file payload.
///
/// Children are owned exclusively by their parent's map. Nodes keep no
/// pointer to their parent; absolute names are rebuilt from the traversal
/// prefix when an error needs one.
#[derive(Debug, Clone)]
pub enum NamespaceEntry<T> {
    Directory(Children<T>),
    File(T),
}

impl<T> NamespaceEntry<T> {
    fn directory() -> Self {
        Self::Directory(Children::default())
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory(_) => EntryKind::Directory,
            Self::File(_) => EntryKind::File,
        }
    }
}

/// Hierarchical namespace of typed file leaves.
#[derive(Debug, Clone)]
pub struct NamespaceTree<T> {
    root: Children<T>,
}

impl<T> Default for NamespaceTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NamespaceTree<T> {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        Self {
            root: Children::default(),
        }
    }

    /// Set the file payload at `key`, creating missing parent directories.
    ///
    /// Replacing the payload of an existing file is allowed.
    pub fn add_file(&mut self, key: &PathKey, payload: T) -> Result<()> {
        let Some((last, parents)) = key.components().split_last() else {
            return Err(HostError::conflict("", SEPARATOR.to_string(), EntryKind::Directory));
        };

        let mut prefix = String::new();
        let children = ensure_directories(&mut self.root, parents, &mut prefix)?;
        push_segment(&mut prefix, last);

        match children.get_mut(last) {
            Some(NamespaceEntry::Directory(_)) => Err(HostError::conflict(
                last.as_str(),
                prefix,
                EntryKind::Directory,
            )),
            Some(NamespaceEntry::File(existing)) => {
                *existing = payload;
                Ok(())
            }
            None => {
                children.insert(last.clone(), NamespaceEntry::File(payload));
                Ok(())
            }
        }
    }

    /// Create the directory at `key` and all of its parents.
    ///
    /// Returns `false` when the directory already existed.
    pub fn add_directory(&mut self, key: &PathKey) -> Result<bool> {
        let Some((last, parents)) = key.components().split_last() else {
            return Ok(false);
        };

        let mut prefix = String::new();
        let children = ensure_directories(&mut self.root, parents, &mut prefix)?;
        push_segment(&mut prefix, last);

        match children.get(last) {
            Some(NamespaceEntry::Directory(_)) => Ok(false),
            Some(NamespaceEntry::File(_)) => {
                Err(HostError::conflict(last.as_str(), prefix, EntryKind::File))
            }
            None => {
                children.insert(last.clone(), NamespaceEntry::directory());
                Ok(true)
            }
        }
    }

    /// File payload at `key`, if `key` names a file.
    pub fn get_file(&self, key: &PathKey) -> Option<&T> {
        match self.lookup(key)? {
            NamespaceEntry::File(payload) => Some(payload),
            NamespaceEntry::Directory(_) => None,
        }
    }

    pub fn file_exists(&self, key: &PathKey) -> bool {
        self.get_file(key).is_some()
    }

    pub fn directory_exists(&self, key: &PathKey) -> bool {
        self.children(key).is_some()
    }

    /// Children of the directory at `key`, if `key` names a directory.
    pub fn children(&self, key: &PathKey) -> Option<&Children<T>> {
        if key.is_root() {
            return Some(&self.root);
        }
        match self.lookup(key)? {
            NamespaceEntry::Directory(children) => Some(children),
            NamespaceEntry::File(_) => None,
        }
    }

    /// Names of the immediate children of the directory at `key`.
    pub fn directory_entry_names(&self, key: &PathKey) -> Option<Vec<SmolStr>> {
        self.children(key)
            .map(|children| children.keys().cloned().collect())
    }

    /// Detach the entry at `key` from its parent.
    ///
    /// Returns `false` when nothing exists at `key`.
    pub fn remove(&mut self, key: &PathKey) -> Result<bool> {
        let Some((last, parents)) = key.components().split_last() else {
            return Err(HostError::RootRemoval);
        };

        let mut children = &mut self.root;
        for segment in parents {
            children = match children.get_mut(segment) {
                Some(NamespaceEntry::Directory(next)) => next,
                _ => return Ok(false),
            };
        }
        Ok(children.shift_remove(last).is_some())
    }

    /// Drop every entry, leaving an empty root.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn lookup(&self, key: &PathKey) -> Option<&NamespaceEntry<T>> {
        let (last, parents) = key.components().split_last()?;
        let mut children = &self.root;
        for segment in parents {
            children = match children.get(segment)? {
                NamespaceEntry::Directory(next) => next,
                NamespaceEntry::File(_) => return None,
            };
        }
        children.get(last)
    }
}

/// Walk `segments` from `children`, creating directories as needed.
fn ensure_directories<'a, T>(
    mut children: &'a mut Children<T>,
    segments: &[SmolStr],
    prefix: &mut String,
) -> Result<&'a mut Children<T>> {
    for segment in segments {
        push_segment(prefix, segment);
        let entry = children
            .entry(segment.clone())
            .or_insert_with(NamespaceEntry::directory);
        children = match entry {
            NamespaceEntry::Directory(next) => next,
            NamespaceEntry::File(_) => {
                return Err(HostError::conflict(
                    segment.as_str(),
                    prefix.clone(),
                    EntryKind::File,
                ));
            }
        };
    }
    Ok(children)
}

fn push_segment(prefix: &mut String, segment: &str) {
    prefix.push(SEPARATOR);
    prefix.push_str(segment);
}
