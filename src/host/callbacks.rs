use std::rc::Rc;

use crate::base::ResolvedPath;
use crate::cache::ParseUnitCache;
use crate::config::{ParseOptions, ProjectConfig};
use crate::content::{ContentProvider, DirectoryListing, DirectoryQuery};
use crate::engine::{AnalysisEngine, HostCallbacks};
use crate::error::Result;

/// The host as seen by an engine during one model build.
pub(super) struct HostContext<'h, E: AnalysisEngine> {
    pub(super) engine: &'h E,
    pub(super) files: &'h ContentProvider,
    pub(super) units: &'h mut ParseUnitCache<E::Unit>,
    pub(super) baseline_dir: &'h ResolvedPath,
}

impl<E: AnalysisEngine> HostCallbacks<E::Unit> for HostContext<'_, E> {
    fn resolve_unit(&mut self, path: &str, options: &ParseOptions) -> Result<Rc<E::Unit>> {
        let path = self.files.resolve_path(path);
        self.units
            .get_or_create(&path, options, self.engine, self.files)
    }

    fn file_exists(&self, path: &str) -> bool {
        self.files.file_exists(&self.files.resolve_path(path))
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.files.directory_exists(&self.files.resolve_path(path))
    }

    fn list_directory(&self, query: &DirectoryQuery) -> Result<DirectoryListing> {
        self.files.list(query)
    }

    fn read_raw_text(&self, path: &str) -> Result<Option<Rc<str>>> {
        match self.files.get_file(&self.files.resolve_path(path)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn current_directory(&self) -> &str {
        self.files.resolver().root()
    }

    fn default_baseline_unit_path(&self, config: &ProjectConfig) -> ResolvedPath {
        self.baseline_dir.join(config.target.default_lib_file_name())
    }

    fn environment_variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
