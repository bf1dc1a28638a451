//! # Project configuration
//!
//! [`ProjectConfig`] is the resolved, immutable configuration of a project.
//! It is either injected when the host is built or produced by a
//! [`ConfigParser`] from the configuration source unit.

mod jsonc;
mod parser;
mod types;

pub use jsonc::strip_jsonc;
pub use parser::{ConfigDiagnostic, ConfigParser, JsonConfigParser, ParsedConfig};
pub use types::{ModuleKind, ModuleResolution, ParseOptions, ProjectConfig, Target, normalize_lib_name};

/// Default file name of the configuration source unit, relative to the host root.
pub const CONFIG_FILE_NAME: &str = "project.json";
