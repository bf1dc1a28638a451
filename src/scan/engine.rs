use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use super::unit::{ScannedUnit, scan};
use crate::base::{PathKey, ResolvedPath};
use crate::cache::UnitKind;
use crate::config::{ParseOptions, ProjectConfig, normalize_lib_name};
use crate::engine::{AnalysisEngine, HostCallbacks};
use crate::error::Result;

/// Extensions tried, in order, for a relative specifier without one.
const MODULE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx", ".json"];
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.d.ts", "index.js"];

/// Bundled analysis engine: a declaration-level scanner whose model is the
/// import closure of the root units.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationScanner;

impl DeclarationScanner {
    pub fn new() -> Self {
        Self
    }
}

/// A specifier no registered file satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedImport {
    pub from: ResolvedPath,
    pub specifier: String,
}

/// Every unit reachable from the roots, in depth-first visit order.
#[derive(Debug, Default)]
pub struct ScanModel {
    units: IndexMap<PathKey, Rc<ScannedUnit>>,
    unresolved: Vec<UnresolvedImport>,
    external: IndexSet<String>,
    reused: usize,
}

impl ScanModel {
    pub fn units(&self) -> impl Iterator<Item = &Rc<ScannedUnit>> {
        self.units.values()
    }

    pub fn unit(&self, path: &ResolvedPath) -> Option<&Rc<ScannedUnit>> {
        self.units.get(path.key())
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Absolute paths of the reached units, in visit order.
    pub fn unit_paths(&self) -> Vec<&str> {
        self.units
            .values()
            .map(|unit| unit.path.absolute_path())
            .collect()
    }

    pub fn unresolved(&self) -> &[UnresolvedImport] {
        &self.unresolved
    }

    /// Bare specifiers (package names), left to the embedding application.
    pub fn external_modules(&self) -> impl Iterator<Item = &str> {
        self.external.iter().map(String::as_str)
    }

    /// How many unit instances were carried over from the previous model.
    pub fn reused_units(&self) -> usize {
        self.reused
    }

    /// Total number of top-level statements across every unit.
    pub fn declaration_count(&self) -> usize {
        self.units.values().map(|unit| unit.statement_count()).sum()
    }
}

impl AnalysisEngine for DeclarationScanner {
    type Unit = ScannedUnit;
    type Model = ScanModel;

    fn parse_unit(
        &self,
        path: &ResolvedPath,
        text: &str,
        version: &str,
        kind: UnitKind,
        _options: &ParseOptions,
    ) -> Result<ScannedUnit> {
        Ok(scan(path, text, version, kind))
    }

    fn build_model(
        &self,
        roots: &[ResolvedPath],
        config: &ProjectConfig,
        host: &mut dyn HostCallbacks<ScannedUnit>,
        previous: Option<&ScanModel>,
    ) -> Result<ScanModel> {
        let baseline = host.default_baseline_unit_path(config);
        let mut walk = ModelWalk {
            host,
            options: config.parse_options(),
            baseline_dir: baseline.parent().unwrap_or_else(|| baseline.clone()),
            previous,
            model: ScanModel::default(),
        };

        for root in roots {
            walk.visit(root)?;
        }
        if !config.no_lib {
            if config.lib.is_empty() {
                walk.visit_lib(&baseline, None)?;
            } else {
                for lib in &config.lib {
                    let path = walk.baseline_dir.join(&normalize_lib_name(lib));
                    walk.visit_lib(&path, None)?;
                }
            }
        }

        tracing::debug!(
            units = walk.model.units.len(),
            unresolved = walk.model.unresolved.len(),
            reused = walk.model.reused,
            "scan model built"
        );
        Ok(walk.model)
    }
}

struct ModelWalk<'h, 'p> {
    host: &'h mut dyn HostCallbacks<ScannedUnit>,
    options: ParseOptions,
    baseline_dir: ResolvedPath,
    previous: Option<&'p ScanModel>,
    model: ScanModel,
}

impl ModelWalk<'_, '_> {
    fn visit(&mut self, path: &ResolvedPath) -> Result<()> {
        if self.model.units.contains_key(path.key()) {
            return Ok(());
        }
        let unit = self.host.resolve_unit(path.absolute_path(), &self.options)?;
        let reused = self
            .previous
            .and_then(|previous| previous.units.get(path.key()))
            .is_some_and(|old| Rc::ptr_eq(old, &unit));
        if reused {
            self.model.reused += 1;
        }
        self.model.units.insert(path.key().clone(), unit.clone());

        for specifier in &unit.imports {
            if !is_relative(specifier) {
                self.model.external.insert(specifier.clone());
                continue;
            }
            match self.resolve_relative(path, specifier) {
                Some(target) => self.visit(&target)?,
                None => self.model.unresolved.push(UnresolvedImport {
                    from: path.clone(),
                    specifier: specifier.clone(),
                }),
            }
        }
        for lib in &unit.lib_references {
            let target = self.baseline_dir.join(&normalize_lib_name(lib));
            self.visit_lib(&target, Some((path, lib.as_str())))?;
        }
        Ok(())
    }

    /// Visit a baseline unit, recording it as unresolved when it is missing.
    fn visit_lib(
        &mut self,
        path: &ResolvedPath,
        from: Option<(&ResolvedPath, &str)>,
    ) -> Result<()> {
        if self.host.file_exists(path.absolute_path()) {
            return self.visit(path);
        }
        let (from, specifier) = match from {
            Some((from, name)) => (from.clone(), name.to_string()),
            None => (path.clone(), path.absolute_path().to_string()),
        };
        self.model
            .unresolved
            .push(UnresolvedImport { from, specifier });
        Ok(())
    }

    fn resolve_relative(&self, from: &ResolvedPath, specifier: &str) -> Option<ResolvedPath> {
        let dir = from.parent()?;
        let base = dir.join(specifier);
        let exists = |path: &str| self.host.file_exists(path);

        if exists(base.absolute_path()) {
            return Some(base);
        }
        for extension in MODULE_EXTENSIONS {
            let candidate = format!("{}{extension}", base.absolute_path());
            if exists(&candidate) {
                return Some(ResolvedPath::from_absolute(candidate));
            }
        }
        if self.host.directory_exists(base.absolute_path()) {
            return INDEX_FILES
                .iter()
                .map(|index| base.join(index))
                .find(|candidate| exists(candidate.absolute_path()));
        }
        None
    }
}

fn is_relative(specifier: &str) -> bool {
    matches!(specifier, "." | "..")
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}
