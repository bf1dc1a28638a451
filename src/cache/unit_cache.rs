use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::UnitKind;
use crate::base::{PathKey, ResolvedPath};
use crate::config::ParseOptions;
use crate::content::ContentProvider;
use crate::engine::AnalysisEngine;
use crate::error::Result;
use crate::events::ProjectListener;

/// Per-path record. `snapshot` and `unit`, when both present, were derived
/// together in the current `version`.
#[derive(Debug)]
struct UnitEntry<U> {
    path: ResolvedPath,
    version: u32,
    snapshot: Option<Rc<str>>,
    unit: Option<Rc<U>>,
}

impl<U> UnitEntry<U> {
    fn new(path: ResolvedPath) -> Self {
        Self {
            path,
            version: 0,
            snapshot: None,
            unit: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.snapshot.is_none() && self.unit.is_none()
    }
}

/// Versioned cache of parsed units, keyed by path.
pub struct ParseUnitCache<U> {
    entries: FxHashMap<PathKey, UnitEntry<U>>,
    listener: Option<Rc<dyn ProjectListener>>,
}

impl<U> Default for ParseUnitCache<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ParseUnitCache<U> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            listener: None,
        }
    }

    /// Install the listener notified on unit creation and invalidation.
    pub fn set_listener(&mut self, listener: Option<Rc<dyn ProjectListener>>) {
        self.listener = listener;
    }

    /// Return the parsed unit for `path`, parsing it first when needed.
    ///
    /// A cache hit returns the same instance and notifies nobody. A miss
    /// loads the snapshot (unless one is already cached), hands it to
    /// `engine` with the stringified version, and reports the new unit once.
    pub fn get_or_create<E>(
        &mut self,
        path: &ResolvedPath,
        options: &ParseOptions,
        engine: &E,
        files: &ContentProvider,
    ) -> Result<Rc<U>>
    where
        E: AnalysisEngine<Unit = U> + ?Sized,
    {
        let entry = self
            .entries
            .entry(path.key().clone())
            .or_insert_with(|| UnitEntry::new(path.clone()));

        if let Some(unit) = &entry.unit {
            return Ok(unit.clone());
        }

        let snapshot = match &entry.snapshot {
            Some(snapshot) => snapshot.clone(),
            None => {
                let snapshot = files.get_file(path)?;
                entry.snapshot = Some(snapshot.clone());
                snapshot
            }
        };

        let kind = UnitKind::from_extension(path.extension());
        tracing::trace!("parsing {} v{} as {}", path, entry.version, kind);
        let unit = Rc::new(engine.parse_unit(
            path,
            &snapshot,
            &entry.version.to_string(),
            kind,
            options,
        )?);
        entry.unit = Some(unit.clone());

        if let Some(listener) = &self.listener {
            listener.on_unit_created(path);
        }
        Ok(unit)
    }

    /// Drop the snapshot and unit cached for `path`.
    ///
    /// Returns `false`, without bumping the version or notifying, when the
    /// path is unknown or its entry is already empty.
    pub fn invalidate(&mut self, path: &ResolvedPath) -> bool {
        let Some(entry) = self.entries.get_mut(path.key()) else {
            return false;
        };
        if entry.is_empty() {
            return false;
        }

        entry.version += 1;
        entry.snapshot = None;
        entry.unit = None;
        tracing::trace!("invalidated {} (now v{})", path, entry.version);

        if let Some(listener) = &self.listener {
            listener.on_unit_invalidated(path);
        }
        true
    }

    /// Invalidate `prefix` and every entry below it, in key order.
    ///
    /// Returns the number of entries that were actually invalidated.
    pub fn invalidate_under(&mut self, prefix: &PathKey) -> usize {
        let mut paths: Vec<ResolvedPath> = self
            .entries
            .values()
            .filter(|entry| entry.path.key().starts_with(prefix))
            .map(|entry| entry.path.clone())
            .collect();
        paths.sort_by(|a, b| a.key().cmp(b.key()));

        paths.iter().filter(|path| self.invalidate(path)).count()
    }

    /// The cached unit for `path`, without creating one.
    pub fn get(&self, path: &ResolvedPath) -> Option<Rc<U>> {
        self.entries.get(path.key())?.unit.clone()
    }

    /// Current version counter of `path`, if it has an entry.
    pub fn version(&self, path: &ResolvedPath) -> Option<u32> {
        self.entries.get(path.key()).map(|entry| entry.version)
    }

    /// Paths of every entry holding a parsed unit, sorted by key.
    pub fn unit_names(&self) -> Vec<ResolvedPath> {
        let mut names: Vec<ResolvedPath> = self
            .entries
            .values()
            .filter(|entry| entry.unit.is_some())
            .map(|entry| entry.path.clone())
            .collect();
        names.sort_by(|a, b| a.key().cmp(b.key()));
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
