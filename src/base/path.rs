//! Canonical virtual paths.
//!
//! The namespace is virtual, so paths are always `/`-separated regardless of
//! the host platform. An absolute path such as `/a/b` splits into the segments
//! `["", "a", "b"]`: the leading empty segment marks the root. The root itself
//! is the single segment `[""]`, never an empty list.

use std::fmt;

use smol_str::SmolStr;

/// Separator used by every virtual path.
pub const SEPARATOR: char = '/';

/// Canonical, ordered list of path segments.
///
/// Two keys are equal exactly when they name the same namespace entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(Vec<SmolStr>);

impl PathKey {
    /// The key of the namespace root.
    pub fn root() -> Self {
        Self(vec![SmolStr::default()])
    }

    /// Build a key from raw segments.
    ///
    /// An empty sequence yields the root key.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments: Vec<SmolStr> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            Self::root()
        } else {
            Self(segments)
        }
    }

    /// Split an already normalized absolute path into a key.
    pub fn from_absolute(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            return Self::root();
        }
        Self(path.split(SEPARATOR).map(SmolStr::from).collect())
    }

    /// All segments, including the leading root marker when present.
    pub fn segments(&self) -> &[SmolStr] {
        &self.0
    }

    /// Segments below the root marker.
    pub fn components(&self) -> &[SmolStr] {
        match self.0.first() {
            Some(first) if first.is_empty() => &self.0[1..],
            _ => &self.0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.components().is_empty()
    }

    /// Whether `prefix` names this entry or one of its ancestors.
    pub fn starts_with(&self, prefix: &PathKey) -> bool {
        self.components().starts_with(prefix.components())
    }

    /// Last component, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.components().last().map(SmolStr::as_str)
    }

    /// Absolute `/`-separated rendering of this key.
    pub fn to_absolute(&self) -> String {
        let mut out = String::new();
        for component in self.components() {
            out.push(SEPARATOR);
            out.push_str(component);
        }
        if out.is_empty() {
            out.push(SEPARATOR);
        }
        out
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_absolute())
    }
}

/// A caller-supplied path after resolution against the host root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedPath {
    key: PathKey,
    absolute: String,
    extension: SmolStr,
}

impl ResolvedPath {
    /// Build from a normalized absolute path.
    pub fn from_absolute(absolute: impl Into<String>) -> Self {
        let absolute = absolute.into();
        let key = PathKey::from_absolute(&absolute);
        let extension = SmolStr::from(extension_of(key.name().unwrap_or_default()));
        Self {
            key,
            absolute,
            extension,
        }
    }

    pub fn key(&self) -> &PathKey {
        &self.key
    }

    pub fn absolute_path(&self) -> &str {
        &self.absolute
    }

    /// Extension including its leading dot (`.ts`), empty when there is none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Last path component, empty for the root.
    pub fn file_name(&self) -> &str {
        self.key.name().unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.key.is_root()
    }

    /// The containing directory, or `None` for the root.
    pub fn parent(&self) -> Option<ResolvedPath> {
        if self.is_root() {
            return None;
        }
        Some(Self::from_absolute(normalize_path(&self.absolute, "..")))
    }

    /// Resolve `relative` against this path as a directory.
    pub fn join(&self, relative: &str) -> ResolvedPath {
        Self::from_absolute(normalize_path(&self.absolute, relative))
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.absolute)
    }
}

/// Resolve `input` against the absolute directory `base`.
///
/// Absolute inputs ignore `base`. Empty and `.` segments are dropped, `..`
/// pops one level and clamps at the root. The result never has a trailing
/// separator unless it is the root itself.
pub fn normalize_path(base: &str, input: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    if !input.starts_with(SEPARATOR) {
        push_segments(&mut stack, base);
    }
    push_segments(&mut stack, input);

    if stack.is_empty() {
        return SEPARATOR.to_string();
    }
    let mut out = String::with_capacity(input.len() + base.len());
    for segment in stack {
        out.push(SEPARATOR);
        out.push_str(segment);
    }
    out
}

fn push_segments<'a>(stack: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
}

/// Extension of a file name the way `path.extname` reports it.
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        None | Some(0) => "",
        Some(index) => &name[index..],
    }
}
