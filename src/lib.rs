//! # project-host
//!
//! Incremental project host: a virtual file namespace, a versioned cache of
//! parsed source units, and the orchestration that rebuilds an aggregated
//! semantic model only when its inputs actually changed.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! host      → ProjectHost: configuration, dirty tracking, lazy model rebuilds
//!   ↓
//! scan      → Bundled analysis engine (logos lexer, declaration scanner)
//!   ↓
//! engine    → AnalysisEngine / HostCallbacks seams
//!   ↓
//! cache     → ParseUnitCache: versioned snapshots and parsed units
//!   ↓
//! content   → PathResolver + ContentProvider: lazy content producers
//!   ↓
//! vfs       → NamespaceTree: directories and typed file leaves
//!   ↓
//! config    → ProjectConfig and the config parser collaborator
//!   ↓
//! base      → Primitives (PathKey, ResolvedPath, path normalization)
//! ```
//!
//! Everything is single-threaded and synchronous. Lifecycle notifications are
//! delivered inline through [`ProjectListener`].

/// Foundation types: PathKey, ResolvedPath, path normalization
pub mod base;

/// Error types shared by every layer
pub mod error;

/// Lifecycle notifications shared by every component
pub mod events;

/// Project configuration and the config parser collaborator
pub mod config;

/// Virtual namespace tree of directories and file leaves
pub mod vfs;

/// Path resolution and lazy content retrieval
pub mod content;

/// Versioned cache of parsed units
pub mod cache;

/// Seams to the external analysis engine
pub mod engine;

/// Bundled declaration-scanning analysis engine
pub mod scan;

/// Top-level orchestration: ProjectHost and its listeners
pub mod host;

pub use base::{PathKey, ResolvedPath};
pub use cache::{ParseUnitCache, UnitKind};
pub use config::{ConfigParser, JsonConfigParser, ParseOptions, ProjectConfig};
pub use content::{ContentProvider, DirectoryListing, DirectoryQuery, PathResolver};
pub use engine::{AnalysisEngine, HostCallbacks};
pub use error::{ConfigError, HostError, Result};
pub use events::ProjectListener;
pub use host::{BaselineLibrary, HostOptions, ProjectHost, TracingListener};
pub use scan::{DeclarationScanner, ScanModel, ScannedUnit};
pub use vfs::{NamespaceEntry, NamespaceTree};
