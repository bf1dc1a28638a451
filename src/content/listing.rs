//! Filtered directory walks over the namespace.

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::source::FileSource;
use crate::base::ResolvedPath;
use crate::error::{HostError, Result};
use crate::vfs::{Children, NamespaceEntry, NamespaceTree};

/// Parameters of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    /// Directory to start from, relative to the host root or absolute.
    pub root: String,
    /// Accepted file-name suffixes (`.ts`, `.d.ts`); empty accepts every file.
    pub extensions: Vec<String>,
    /// Globs removing files and whole directories from the walk.
    pub exclude: Vec<String>,
    /// Globs a file must match to be listed; empty accepts every file.
    pub include: Vec<String>,
    pub recursive: bool,
    /// Maximum depth below `root`, 1 being its immediate children.
    pub depth: Option<usize>,
}

impl DirectoryQuery {
    /// Recursive listing of every file below `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            exclude: Vec::new(),
            include: Vec::new(),
            recursive: true,
            depth: None,
        }
    }
}

/// Files and directories found by a listing, as sorted absolute paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

struct Walk<'q> {
    query: &'q DirectoryQuery,
    include: GlobSet,
    exclude: GlobSet,
    max_depth: Option<usize>,
    out: DirectoryListing,
}

pub(super) fn list(
    tree: &NamespaceTree<FileSource>,
    root: &ResolvedPath,
    query: &DirectoryQuery,
) -> Result<DirectoryListing> {
    let Some(children) = tree.children(root.key()) else {
        return Ok(DirectoryListing::default());
    };

    let mut walk = Walk {
        query,
        include: build_globset(root, &query.include)?,
        exclude: build_globset(root, &query.exclude)?,
        max_depth: if query.recursive { query.depth } else { Some(1) },
        out: DirectoryListing::default(),
    };
    walk.visit(children, root, 1);

    let mut out = walk.out;
    out.files.sort();
    out.directories.sort();
    Ok(out)
}

impl Walk<'_> {
    fn visit(&mut self, children: &Children<FileSource>, dir: &ResolvedPath, depth: usize) {
        for (name, entry) in children {
            let path = dir.join(name);
            if self.exclude.is_match(path.absolute_path()) {
                continue;
            }
            match entry {
                NamespaceEntry::File(_) => {
                    if self.accepts_file(&path) {
                        self.out.files.push(path.absolute_path().to_string());
                    }
                }
                NamespaceEntry::Directory(grandchildren) => {
                    self.out
                        .directories
                        .push(path.absolute_path().to_string());
                    if self.max_depth.is_none_or(|max| depth < max) {
                        self.visit(grandchildren, &path, depth + 1);
                    }
                }
            }
        }
    }

    fn accepts_file(&self, path: &ResolvedPath) -> bool {
        let name = path.file_name();
        let extension_ok = self.query.extensions.is_empty()
            || self
                .query
                .extensions
                .iter()
                .any(|extension| name.ends_with(extension.as_str()));
        let include_ok =
            self.query.include.is_empty() || self.include.is_match(path.absolute_path());
        extension_ok && include_ok
    }
}

/// Compile `patterns`, anchoring relative ones at `root`.
fn build_globset(root: &ResolvedPath, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let anchored = if pattern.starts_with('/') || pattern.starts_with("**") {
            pattern.clone()
        } else {
            root.join(pattern).absolute_path().to_string()
        };
        let glob = Glob::new(&anchored).map_err(|err| HostError::InvalidPattern {
            pattern: pattern.clone(),
            message: err.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|err| HostError::InvalidPattern {
        pattern: patterns.join(", "),
        message: err.to_string(),
    })
}
