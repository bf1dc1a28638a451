use crate::base::{ResolvedPath, SEPARATOR, normalize_path};

/// Resolves caller paths against a fixed root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: String,
}

impl PathResolver {
    /// Create a resolver rooted at `root`. A relative root is taken from `/`.
    pub fn new(root: &str) -> Self {
        Self {
            root: normalize_path(&SEPARATOR.to_string(), root),
        }
    }

    /// The normalized root directory.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Resolve a relative or absolute path into its canonical form.
    ///
    /// Unlike a resolver that takes the extension from the caller's input
    /// string, the extension here is taken from the canonical path, so every
    /// spelling of the same file (`a.ts`, `./x/../a.ts`, `/a.ts`) infers the
    /// same unit kind.
    pub fn resolve(&self, path: &str) -> ResolvedPath {
        ResolvedPath::from_absolute(normalize_path(&self.root, path))
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new("/")
    }
}
