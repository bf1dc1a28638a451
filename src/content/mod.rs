//! # Content
//!
//! Canonical naming and lazy content retrieval.
//!
//! [`PathResolver`] turns caller paths into [`ResolvedPath`](crate::ResolvedPath)s
//! relative to the host root. [`ContentProvider`] stores one [`FileSource`]
//! per path in a [`NamespaceTree`](crate::NamespaceTree) and produces content
//! on demand, reporting every successful load to its listener.

mod listing;
mod provider;
mod resolver;
mod source;

pub use listing::{DirectoryListing, DirectoryQuery};
pub use provider::ContentProvider;
pub use resolver::PathResolver;
pub use source::FileSource;
