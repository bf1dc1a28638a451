/// Kind of source unit, inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Json,
    /// Fallback for every unrecognized extension.
    Unknown,
}

impl UnitKind {
    /// Map an extension, including its leading dot, to a unit kind.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".ts" => Self::TypeScript,
            ".tsx" => Self::Tsx,
            ".js" | ".mjs" | ".cjs" => Self::JavaScript,
            ".jsx" => Self::Jsx,
            ".json" => Self::Json,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::Json => "json",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
