use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::content::ContentProvider;
use crate::error::{HostError, Result};

/// Reserved virtual directory holding the baseline declaration units.
pub const BASELINE_DIR: &str = "/__libs__";

#[derive(Debug, Clone)]
enum BaselineSource {
    Text(Rc<str>),
    Disk(PathBuf),
}

/// Synthetic baseline declaration units (`lib.d.ts`, `lib.es2015.d.ts`, ...)
/// registered under [`BASELINE_DIR`] when a host is built.
#[derive(Debug, Clone, Default)]
pub struct BaselineLibrary {
    units: Vec<(String, BaselineSource)>,
}

impl BaselineLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit with literal content.
    pub fn add_text(&mut self, file_name: impl Into<String>, text: impl Into<Rc<str>>) -> &mut Self {
        self.units
            .push((file_name.into(), BaselineSource::Text(text.into())));
        self
    }

    /// Add a unit read from `location` the first time it is needed.
    pub fn add_disk(&mut self, file_name: impl Into<String>, location: impl Into<PathBuf>) -> &mut Self {
        self.units
            .push((file_name.into(), BaselineSource::Disk(location.into())));
        self
    }

    /// Collect every `*.d.ts` file directly inside `dir`, sorted by name.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let io_error = |source| HostError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut found = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let location = entry.path();
            let Some(name) = location.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.ends_with(".d.ts") && location.is_file() {
                found.push((name.to_string(), location.clone()));
            }
        }
        found.sort();

        let mut library = Self::new();
        for (name, location) in found {
            library.add_disk(name, location);
        }
        tracing::debug!("found {} baseline units in {}", library.len(), dir.display());
        Ok(library)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Register every unit with `files`. Disk units are read at most once.
    pub(super) fn register(&self, files: &mut ContentProvider) -> Result<()> {
        let dir = files.resolve_path(BASELINE_DIR);
        files.add_directory(&dir)?;
        for (name, source) in &self.units {
            let path = dir.join(name);
            match source {
                BaselineSource::Text(text) => files.add_file_in_memory(&path, text.clone())?,
                BaselineSource::Disk(location) => {
                    files.add_file_in_disk(&path, location.clone(), true)?
                }
            }
        }
        Ok(())
    }
}
