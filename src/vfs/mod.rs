//! # Virtual namespace
//!
//! Hierarchical map of path segments to directories or typed file leaves.
//!
//! A path is never both a file and a directory: adding a file underneath a
//! file, or a directory on top of one, fails with
//! [`HostError::StructuralConflict`](crate::HostError::StructuralConflict).

mod tree;

pub use tree::{Children, NamespaceEntry, NamespaceTree};
