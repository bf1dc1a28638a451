use std::path::PathBuf;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::{HostError, Result};

/// Producer of one file's content.
#[derive(Debug)]
pub enum FileSource {
    /// Literal content, returned as-is forever.
    Memory(Rc<str>),
    /// Content read from storage. With a cache cell, storage is read at most
    /// once; a failed read leaves the cell empty so the next call retries.
    Disk {
        location: PathBuf,
        cache: Option<OnceCell<Rc<str>>>,
    },
}

impl FileSource {
    pub fn in_memory(content: impl Into<Rc<str>>) -> Self {
        Self::Memory(content.into())
    }

    pub fn on_disk(location: impl Into<PathBuf>, cache_after_reading: bool) -> Self {
        Self::Disk {
            location: location.into(),
            cache: cache_after_reading.then(OnceCell::new),
        }
    }

    /// Produce the content.
    pub fn read(&self) -> Result<Rc<str>> {
        match self {
            Self::Memory(content) => Ok(content.clone()),
            Self::Disk {
                location,
                cache: None,
            } => read_from_disk(location),
            Self::Disk {
                location,
                cache: Some(cell),
            } => cell.get_or_try_init(|| read_from_disk(location)).cloned(),
        }
    }
}

fn read_from_disk(location: &PathBuf) -> Result<Rc<str>> {
    tracing::trace!("reading {}", location.display());
    std::fs::read_to_string(location)
        .map(Rc::from)
        .map_err(|source| HostError::Io {
            path: location.clone(),
            source,
        })
}
