//! # Project host
//!
//! [`ProjectHost`] ties the layers together: it owns the content provider
//! and the unit cache, memoizes the configuration, tracks whether anything
//! changed since the last model build, and drives the analysis engine.

mod baseline;
mod callbacks;
mod listener;
mod project;

pub use baseline::{BASELINE_DIR, BaselineLibrary};
pub use listener::TracingListener;
pub use project::{HostOptions, ProjectHost};
