//! # Analysis engine seams
//!
//! The host never looks inside parsed units or models. It calls the engine's
//! two primitives and, while a model is built, lets the engine pull in the
//! units it discovers through [`HostCallbacks`].

use std::rc::Rc;

use crate::base::ResolvedPath;
use crate::cache::UnitKind;
use crate::config::{ParseOptions, ProjectConfig};
use crate::content::{DirectoryListing, DirectoryQuery};
use crate::error::Result;

/// The external parser and semantic model builder.
///
/// Errors are returned as [`HostError::Engine`](crate::HostError::Engine) and
/// travel to the host's caller unchanged.
pub trait AnalysisEngine {
    /// Parsed representation of one source unit.
    type Unit;
    /// Aggregated model spanning the root units and their dependencies.
    type Model;

    /// Parse `text`. Treated as a pure function of its inputs.
    fn parse_unit(
        &self,
        path: &ResolvedPath,
        text: &str,
        version: &str,
        kind: UnitKind,
        options: &ParseOptions,
    ) -> Result<Self::Unit>;

    /// Build a model from `roots`, reusing what it can of `previous`.
    fn build_model(
        &self,
        roots: &[ResolvedPath],
        config: &ProjectConfig,
        host: &mut dyn HostCallbacks<Self::Unit>,
        previous: Option<&Self::Model>,
    ) -> Result<Self::Model>;
}

/// Services the host offers an engine while it builds a model.
///
/// Paths are resolved against the host root, so relative and absolute
/// spellings are both accepted.
pub trait HostCallbacks<U> {
    /// Parsed unit at `path`, created through the unit cache when absent.
    fn resolve_unit(&mut self, path: &str, options: &ParseOptions) -> Result<Rc<U>>;

    fn file_exists(&self, path: &str) -> bool;

    fn directory_exists(&self, path: &str) -> bool;

    fn list_directory(&self, query: &DirectoryQuery) -> Result<DirectoryListing>;

    /// Raw content of `path`, or `None` when nothing is registered there.
    fn read_raw_text(&self, path: &str) -> Result<Option<Rc<str>>>;

    fn current_directory(&self) -> &str;

    /// Path of the baseline declaration unit implied by `config`.
    fn default_baseline_unit_path(&self, config: &ProjectConfig) -> ResolvedPath;

    fn environment_variable(&self, name: &str) -> Option<String>;
}
