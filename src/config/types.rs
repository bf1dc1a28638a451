//! Configuration value types.

/// Language level the sources are parsed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Target {
    Es3,
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    EsNext,
}

impl Target {
    /// Parse a target name, case-insensitively. `es6` is an alias of `es2015`.
    pub fn parse(name: &str) -> Option<Self> {
        let target = match name.to_ascii_lowercase().as_str() {
            "es3" => Self::Es3,
            "es5" => Self::Es5,
            "es6" | "es2015" => Self::Es2015,
            "es7" | "es2016" => Self::Es2016,
            "es2017" => Self::Es2017,
            "es2018" => Self::Es2018,
            "es2019" => Self::Es2019,
            "es2020" => Self::Es2020,
            "es2021" => Self::Es2021,
            "es2022" => Self::Es2022,
            "esnext" => Self::EsNext,
            _ => return None,
        };
        Some(target)
    }

    /// File name of the baseline declaration unit loaded for this target
    /// when no explicit `lib` list is configured.
    pub fn default_lib_file_name(&self) -> &'static str {
        match self {
            Self::Es3 | Self::Es5 => "lib.d.ts",
            Self::Es2015 => "lib.es6.d.ts",
            Self::Es2016 => "lib.es2016.full.d.ts",
            Self::Es2017 => "lib.es2017.full.d.ts",
            Self::Es2018 => "lib.es2018.full.d.ts",
            Self::Es2019 => "lib.es2019.full.d.ts",
            Self::Es2020 => "lib.es2020.full.d.ts",
            Self::Es2021 => "lib.es2021.full.d.ts",
            Self::Es2022 => "lib.es2022.full.d.ts",
            Self::EsNext => "lib.esnext.full.d.ts",
        }
    }
}

/// Module system emitted code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleKind {
    None,
    #[default]
    CommonJs,
    Amd,
    Umd,
    System,
    Es2015,
    Es2020,
    Es2022,
    EsNext,
    Node16,
    NodeNext,
}

impl ModuleKind {
    pub fn parse(name: &str) -> Option<Self> {
        let module = match name.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "commonjs" => Self::CommonJs,
            "amd" => Self::Amd,
            "umd" => Self::Umd,
            "system" => Self::System,
            "es6" | "es2015" => Self::Es2015,
            "es2020" => Self::Es2020,
            "es2022" => Self::Es2022,
            "esnext" => Self::EsNext,
            "node16" => Self::Node16,
            "nodenext" => Self::NodeNext,
            _ => return None,
        };
        Some(module)
    }
}

/// Strategy used to locate imported modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleResolution {
    Classic,
    Node10,
    Node16,
    NodeNext,
    Bundler,
}

impl ModuleResolution {
    pub fn parse(name: &str) -> Option<Self> {
        let resolution = match name.to_ascii_lowercase().as_str() {
            "classic" => Self::Classic,
            "node" | "node10" => Self::Node10,
            "node16" => Self::Node16,
            "nodenext" => Self::NodeNext,
            "bundler" => Self::Bundler,
            _ => return None,
        };
        Some(resolution)
    }
}

/// Resolved project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectConfig {
    pub target: Target,
    pub module: ModuleKind,
    pub module_resolution: Option<ModuleResolution>,
    /// Baseline declaration units to load, as file names (`lib.es2015.d.ts`).
    pub lib: Vec<String>,
    pub strict: bool,
    /// Skip baseline declaration units entirely.
    pub no_lib: bool,
    /// Type declaration packages opened eagerly by the host.
    pub types: Vec<String>,
    pub type_roots: Vec<String>,
    pub base_url: Option<String>,
}

impl ProjectConfig {
    /// Settings handed to the engine when a unit is parsed.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            target: self.target,
            module: self.module,
        }
    }
}

/// Per-unit parse settings derived from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseOptions {
    pub target: Target,
    pub module: ModuleKind,
}

/// Normalize a `lib` entry to the file name of its baseline unit.
///
/// `es6` and `ES2015` both become `lib.es2015.d.ts`; names already in
/// `lib.*.d.ts` form are kept.
pub fn normalize_lib_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.starts_with("lib.") && lower.ends_with(".d.ts") {
        return lower;
    }
    let canonical = match lower.as_str() {
        "es6" => "es2015",
        "es7" => "es2016",
        other => other,
    };
    format!("lib.{canonical}.d.ts")
}
