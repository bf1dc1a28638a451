use std::path::PathBuf;
use std::rc::Rc;

use super::listing::{self, DirectoryListing, DirectoryQuery};
use super::resolver::PathResolver;
use super::source::FileSource;
use crate::base::ResolvedPath;
use crate::error::{HostError, Result};
use crate::events::ProjectListener;
use crate::vfs::NamespaceTree;

/// Registry of content producers over a virtual namespace.
pub struct ContentProvider {
    resolver: PathResolver,
    tree: NamespaceTree<FileSource>,
    listener: Option<Rc<dyn ProjectListener>>,
}

impl ContentProvider {
    /// Create an empty provider rooted at `root`.
    pub fn new(root: &str) -> Self {
        Self {
            resolver: PathResolver::new(root),
            tree: NamespaceTree::new(),
            listener: None,
        }
    }

    /// Install the listener notified on every successful content load.
    pub fn set_listener(&mut self, listener: Option<Rc<dyn ProjectListener>>) {
        self.listener = listener;
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn resolve_path(&self, path: &str) -> ResolvedPath {
        self.resolver.resolve(path)
    }

    /// Register literal content at `path`.
    pub fn add_file_in_memory(
        &mut self,
        path: &ResolvedPath,
        content: impl Into<Rc<str>>,
    ) -> Result<()> {
        self.tree
            .add_file(path.key(), FileSource::in_memory(content))
    }

    /// Register content read from `location` on every access, or only once
    /// when `cache_after_reading` is set.
    pub fn add_file_in_disk(
        &mut self,
        path: &ResolvedPath,
        location: impl Into<PathBuf>,
        cache_after_reading: bool,
    ) -> Result<()> {
        self.tree.add_file(
            path.key(),
            FileSource::on_disk(location, cache_after_reading),
        )
    }

    pub fn add_directory(&mut self, path: &ResolvedPath) -> Result<bool> {
        self.tree.add_directory(path.key())
    }

    /// Produce the content registered at `path`.
    ///
    /// The listener hears about every successful call, whether or not the
    /// producer served it from its own cache.
    pub fn get_file(&self, path: &ResolvedPath) -> Result<Rc<str>> {
        let source = self
            .tree
            .get_file(path.key())
            .ok_or_else(|| HostError::not_found(path.absolute_path()))?;
        let content = source.read()?;
        if let Some(listener) = &self.listener {
            listener.on_file_content_loaded(path);
        }
        Ok(content)
    }

    /// Resolved paths of the immediate children of the directory at `path`.
    pub fn get_directories(&self, path: &ResolvedPath) -> Result<Vec<ResolvedPath>> {
        let children = self
            .tree
            .children(path.key())
            .ok_or_else(|| HostError::not_found(path.absolute_path()))?;
        Ok(children.keys().map(|name| path.join(name)).collect())
    }

    pub fn file_exists(&self, path: &ResolvedPath) -> bool {
        self.tree.file_exists(path.key())
    }

    pub fn directory_exists(&self, path: &ResolvedPath) -> bool {
        self.tree.directory_exists(path.key())
    }

    /// Drop the entry at `path`. Returns `false` when nothing was registered.
    pub fn remove(&mut self, path: &ResolvedPath) -> Result<bool> {
        self.tree.remove(path.key())
    }

    /// Walk the namespace the way a directory-listing callback expects.
    pub fn list(&self, query: &DirectoryQuery) -> Result<DirectoryListing> {
        let root = self.resolve_path(&query.root);
        listing::list(&self.tree, &root, query)
    }

    /// Drop every registered producer.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}
