use std::path::PathBuf;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use super::baseline::{BASELINE_DIR, BaselineLibrary};
use super::callbacks::HostContext;
use super::listener::{HostObserver, RebuildGuard};
use crate::base::ResolvedPath;
use crate::cache::ParseUnitCache;
use crate::config::{CONFIG_FILE_NAME, ConfigParser, JsonConfigParser, ProjectConfig};
use crate::content::ContentProvider;
use crate::engine::AnalysisEngine;
use crate::error::{HostError, Result};
use crate::events::ProjectListener;

/// Construction options of a [`ProjectHost`].
pub struct HostOptions {
    /// Use this configuration instead of parsing the config file.
    pub configuration: Option<Rc<ProjectConfig>>,
    pub listener: Option<Rc<dyn ProjectListener>>,
    /// Parser for the config file; [`JsonConfigParser`] when unset.
    pub config_parser: Option<Box<dyn ConfigParser>>,
    /// Config file path, relative to the root.
    pub config_file: String,
    pub baseline: BaselineLibrary,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            configuration: None,
            listener: None,
            config_parser: None,
            config_file: CONFIG_FILE_NAME.to_string(),
            baseline: BaselineLibrary::default(),
        }
    }
}

/// Owns the content and unit cache of one project and rebuilds its model
/// lazily.
///
/// Content edits invalidate cached units; invalidations and newly created
/// units mark the host dirty. [`load_model_if_needed`](Self::load_model_if_needed)
/// rebuilds only when dirty, so reading the model repeatedly is free.
pub struct ProjectHost<E: AnalysisEngine> {
    engine: E,
    files: ContentProvider,
    units: ParseUnitCache<E::Unit>,
    observer: Rc<HostObserver>,
    configuration: OnceCell<Rc<ProjectConfig>>,
    injected_configuration: Option<Rc<ProjectConfig>>,
    config_parser: Box<dyn ConfigParser>,
    config_file: String,
    baseline_dir: ResolvedPath,
    model: Option<Rc<E::Model>>,
}

impl<E: AnalysisEngine> ProjectHost<E> {
    /// Create a host rooted at `root` with default options.
    pub fn new(root: &str, engine: E) -> Self {
        let files = ContentProvider::new(root);
        let baseline_dir = files.resolve_path(BASELINE_DIR);
        let mut host = Self {
            engine,
            files,
            units: ParseUnitCache::new(),
            observer: Rc::new(HostObserver::new(None)),
            configuration: OnceCell::new(),
            injected_configuration: None,
            config_parser: Box::new(JsonConfigParser),
            config_file: CONFIG_FILE_NAME.to_string(),
            baseline_dir,
            model: None,
        };
        host.install_observer(None);
        host
    }

    /// Create a host rooted at `root` and register the baseline units.
    pub fn with_options(root: &str, engine: E, options: HostOptions) -> Result<Self> {
        let mut host = Self::new(root, engine);
        host.install_observer(options.listener);
        if let Some(configuration) = options.configuration {
            host.configuration = OnceCell::with_value(configuration.clone());
            host.injected_configuration = Some(configuration);
        }
        if let Some(parser) = options.config_parser {
            host.config_parser = parser;
        }
        host.config_file = options.config_file;
        options.baseline.register(&mut host.files)?;
        Ok(host)
    }

    fn install_observer(&mut self, listener: Option<Rc<dyn ProjectListener>>) {
        let observer = Rc::new(HostObserver::new(listener));
        self.files.set_listener(Some(observer.clone()));
        self.units.set_listener(Some(observer.clone()));
        self.observer = observer;
    }

    /// The project configuration, resolving it on first access.
    ///
    /// A failed resolution caches nothing; the next access starts over.
    pub fn configuration(&self) -> Result<Rc<ProjectConfig>> {
        self.configuration
            .get_or_try_init(|| self.resolve_configuration())
            .cloned()
    }

    fn resolve_configuration(&self) -> Result<Rc<ProjectConfig>> {
        let path = self.files.resolve_path(&self.config_file);
        let text = self.files.get_file(&path)?;
        let parsed = self
            .config_parser
            .parse(&path, &text)
            .map_err(|source| HostError::ConfigParse {
                path: path.absolute_path().to_string(),
                source,
            })?;

        // Validation diagnostics do not fail the resolution.
        for diagnostic in &parsed.diagnostics {
            tracing::warn!(
                "{}: ignoring option '{}': {}",
                path,
                diagnostic.option,
                diagnostic.message
            );
        }

        tracing::debug!("resolved configuration from {path}");
        self.observer.on_configuration_resolved();
        Ok(Rc::new(parsed.config))
    }

    pub fn resolve_path(&self, path: &str) -> ResolvedPath {
        self.files.resolve_path(path)
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.files.file_exists(&self.resolve_path(path))
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.files.directory_exists(&self.resolve_path(path))
    }

    /// Set the content of `path`, invalidating its cached unit even when
    /// the text is unchanged.
    pub fn set_content_at_path(&mut self, path: &str, content: impl Into<Rc<str>>) -> Result<()> {
        let path = self.resolve_path(path);
        self.files.add_file_in_memory(&path, content)?;
        self.units.invalidate(&path);
        Ok(())
    }

    /// Point `path` at a file on disk, invalidating its cached unit.
    pub fn set_content_from_disk_at_path(
        &mut self,
        path: &str,
        location: impl Into<PathBuf>,
        cache_after_reading: bool,
    ) -> Result<()> {
        let path = self.resolve_path(path);
        self.files
            .add_file_in_disk(&path, location, cache_after_reading)?;
        self.units.invalidate(&path);
        Ok(())
    }

    /// Drop `path` and its cached unit. Returns `false` when it was not
    /// registered.
    ///
    /// When `path` is a directory, every unit cached below it is invalidated
    /// as well.
    pub fn remove_source_file(&mut self, path: &str) -> Result<bool> {
        let path = self.resolve_path(path);
        let removed = self.files.remove(&path)?;
        self.units.invalidate_under(path.key());
        Ok(removed)
    }

    /// The parsed unit for `path`, created if it is not cached yet.
    pub fn open_source_unit(&mut self, path: &str) -> Result<Rc<E::Unit>> {
        let options = self.configuration()?.parse_options();
        let path = self.resolve_path(path);
        self.units
            .get_or_create(&path, &options, &self.engine, &self.files)
    }

    /// The cached unit for `path`, without creating one.
    pub fn get_opened_unit(&self, path: &str) -> Option<Rc<E::Unit>> {
        self.units.get(&self.resolve_path(path))
    }

    /// Set the content of `path` and open it.
    pub fn create_source_unit(
        &mut self,
        path: &str,
        content: impl Into<Rc<str>>,
    ) -> Result<Rc<E::Unit>> {
        self.set_content_at_path(path, content)?;
        self.open_source_unit(path)
    }

    /// Open the declaration file of every configured `types` entry that
    /// exists, resolved against the first type root (or the host root).
    pub fn open_declared_type_units(&mut self) -> Result<Vec<ResolvedPath>> {
        let config = self.configuration()?;
        let base = match config.type_roots.first() {
            Some(root) => self.resolve_path(root),
            None => self.resolve_path("."),
        };

        let mut opened = Vec::new();
        for name in &config.types {
            let path = base.join(&format!("{name}.d.ts"));
            if !self.files.file_exists(&path) {
                tracing::debug!("skipping missing type declarations {path}");
                continue;
            }
            self.open_source_unit(path.absolute_path())?;
            opened.push(path);
        }
        Ok(opened)
    }

    /// Whether a change happened since the last successful rebuild.
    pub fn is_dirty(&self) -> bool {
        self.observer.is_dirty()
    }

    /// The current model, without rebuilding it.
    pub fn model(&self) -> Option<Rc<E::Model>> {
        self.model.clone()
    }

    /// Return the model, rebuilding it first if there is none yet or the
    /// host is dirty.
    ///
    /// A failed rebuild keeps the previous model and the dirty flag, so the
    /// next call tries again.
    pub fn load_model_if_needed(&mut self) -> Result<Rc<E::Model>> {
        if let Some(model) = &self.model {
            if !self.observer.is_dirty() {
                return Ok(model.clone());
            }
        }
        let config = self.configuration()?;
        let guard = RebuildGuard::enter(self.observer.clone());
        self.observer.on_model_will_change();

        let roots = self.units.unit_names();
        tracing::debug!("rebuilding model from {} root units", roots.len());
        let mut context = HostContext {
            engine: &self.engine,
            files: &self.files,
            units: &mut self.units,
            baseline_dir: &self.baseline_dir,
        };
        let model = self
            .engine
            .build_model(&roots, &config, &mut context, self.model.as_deref())?;

        drop(guard);
        self.observer.set_dirty(false);
        let model = Rc::new(model);
        self.model = Some(model.clone());
        self.observer.on_model_changed();
        Ok(model)
    }

    /// Release every owned state: content, units, model and any resolved
    /// configuration. A configuration injected at construction survives.
    pub fn destroy(&mut self) {
        self.files.clear();
        self.units.clear();
        self.model = None;
        self.configuration = match &self.injected_configuration {
            Some(configuration) => OnceCell::with_value(configuration.clone()),
            None => OnceCell::new(),
        };
        self.observer.set_dirty(false);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn files(&self) -> &ContentProvider {
        &self.files
    }

    pub fn units(&self) -> &ParseUnitCache<E::Unit> {
        &self.units
    }
}
