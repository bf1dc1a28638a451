//! Foundation types for the project host.
//!
//! This module provides the path primitives used throughout the crate:
//! - [`PathKey`] - Canonical segment list identifying one namespace entry
//! - [`ResolvedPath`] - Absolute path string, key and extension of a resolved input
//! - [`normalize_path`] - `/`-separated normalization of `.`, `..` and separators
//!
//! This module has NO dependencies on other project-host modules.

mod path;

pub use path::{PathKey, ResolvedPath, SEPARATOR, normalize_path};

// Re-export smol_str for callers building keys by hand
pub use smol_str::SmolStr;
