//! Configuration parsing collaborator.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::jsonc::strip_jsonc;
use super::types::{ModuleKind, ModuleResolution, ProjectConfig, Target, normalize_lib_name};
use crate::base::ResolvedPath;
use crate::error::ConfigError;

/// Turns the text of a configuration source unit into a [`ProjectConfig`].
pub trait ConfigParser {
    /// Parse `text`, read from `path`.
    ///
    /// Syntax errors fail the whole parse. Problems with individual options
    /// are returned as diagnostics next to the best-effort configuration.
    fn parse(&self, path: &ResolvedPath, text: &str) -> Result<ParsedConfig, ConfigError>;
}

/// Output of a successful configuration parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfig {
    pub config: ProjectConfig,
    pub diagnostics: Vec<ConfigDiagnostic>,
}

/// A validation problem with one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub option: String,
    pub message: String,
}

impl ConfigDiagnostic {
    fn new(option: &str, message: impl Into<String>) -> Self {
        Self {
            option: option.to_string(),
            message: message.into(),
        }
    }
}

/// Parser for `{ "compilerOptions": { ... } }` files written as JSON with
/// comments and trailing commas.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigParser;

#[derive(Deserialize)]
struct RawConfigFile {
    #[serde(default, rename = "compilerOptions")]
    compiler_options: Map<String, Value>,
}

impl ConfigParser for JsonConfigParser {
    fn parse(&self, _path: &ResolvedPath, text: &str) -> Result<ParsedConfig, ConfigError> {
        let cleaned = strip_jsonc(text);
        let raw: RawConfigFile = serde_json::from_str(&cleaned)
            .map_err(|err| ConfigError::new(err.to_string(), err.line(), err.column()))?;

        let mut config = ProjectConfig::default();
        let mut diagnostics = Vec::new();

        for (name, value) in &raw.compiler_options {
            let mut reader = OptionReader {
                name,
                value,
                diagnostics: &mut diagnostics,
            };
            match name.as_str() {
                "target" => {
                    if let Some(target) = reader.enumeration(Target::parse) {
                        config.target = target;
                    }
                }
                "module" => {
                    if let Some(module) = reader.enumeration(ModuleKind::parse) {
                        config.module = module;
                    }
                }
                "moduleResolution" => {
                    config.module_resolution = reader.enumeration(ModuleResolution::parse);
                }
                "lib" => {
                    if let Some(libs) = reader.string_list() {
                        config.lib = libs.iter().map(|lib| normalize_lib_name(lib)).collect();
                    }
                }
                "strict" => {
                    if let Some(strict) = reader.boolean() {
                        config.strict = strict;
                    }
                }
                "noLib" => {
                    if let Some(no_lib) = reader.boolean() {
                        config.no_lib = no_lib;
                    }
                }
                "types" => {
                    if let Some(types) = reader.string_list() {
                        config.types = types;
                    }
                }
                "typeRoots" => {
                    if let Some(roots) = reader.string_list() {
                        config.type_roots = roots;
                    }
                }
                "baseUrl" => {
                    config.base_url = reader.string().map(str::to_string);
                }
                _ => reader.report("unknown compiler option"),
            }
        }

        Ok(ParsedConfig {
            config,
            diagnostics,
        })
    }
}

struct OptionReader<'a> {
    name: &'a str,
    value: &'a Value,
    diagnostics: &'a mut Vec<ConfigDiagnostic>,
}

impl<'a> OptionReader<'a> {
    fn report(&mut self, message: &str) {
        self.diagnostics
            .push(ConfigDiagnostic::new(self.name, message));
    }

    fn string(&mut self) -> Option<&'a str> {
        let value = self.value.as_str();
        if value.is_none() {
            self.report("expected a string");
        }
        value
    }

    fn boolean(&mut self) -> Option<bool> {
        let value = self.value.as_bool();
        if value.is_none() {
            self.report("expected a boolean");
        }
        value
    }

    fn string_list(&mut self) -> Option<Vec<String>> {
        let Some(items) = self.value.as_array() else {
            self.report("expected a list of strings");
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str() {
                Some(item) => out.push(item.to_string()),
                None => self.report("expected a list of strings"),
            }
        }
        Some(out)
    }

    fn enumeration<T>(&mut self, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let name = self.string()?;
        let parsed = parse(name);
        if parsed.is_none() {
            self.report(&format!("unsupported value {name:?}"));
        }
        parsed
    }
}
