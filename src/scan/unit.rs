//! Declaration-level scan of one source unit.

use smol_str::SmolStr;

use super::lexer::{Lexer, Token, TokenKind};
use crate::base::ResolvedPath;
use crate::cache::UnitKind;

/// What a top-level statement declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Import,
    /// `export { .. }`, `export * from ..`
    ExportList,
    Variable,
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
    Expression,
}

impl StatementKind {
    /// Declarations whose closing brace ends the statement.
    fn is_block_bodied(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Class | Self::Interface | Self::Enum | Self::Namespace
        )
    }
}

/// One top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub name: Option<SmolStr>,
    pub exported: bool,
}

/// Parsed unit produced by [`DeclarationScanner`](super::DeclarationScanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedUnit {
    pub path: ResolvedPath,
    pub kind: UnitKind,
    pub version: SmolStr,
    pub statements: Vec<Statement>,
    /// Module specifiers in source order, as written.
    pub imports: Vec<String>,
    /// Names from `/// <reference lib="..." />` directives.
    pub lib_references: Vec<String>,
}

impl ScannedUnit {
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// Names of exported declarations.
    pub fn exported_names(&self) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .filter(|s| s.exported)
            .filter_map(|s| s.name.as_deref())
    }
}

/// Scan `text` into a unit.
pub(super) fn scan(path: &ResolvedPath, text: &str, version: &str, kind: UnitKind) -> ScannedUnit {
    let mut unit = ScannedUnit {
        path: path.clone(),
        kind,
        version: SmolStr::new(version),
        statements: Vec::new(),
        imports: Vec::new(),
        lib_references: Vec::new(),
    };

    if kind == UnitKind::Json {
        if !text.trim().is_empty() {
            unit.statements.push(Statement {
                kind: StatementKind::Expression,
                name: None,
                exported: false,
            });
        }
        return unit;
    }

    let mut scanner = Scanner {
        unit: &mut unit,
        head: Vec::new(),
        depth: 0,
    };
    for token in Lexer::new(text) {
        scanner.feed(token);
    }
    scanner.finish();
    unit
}

struct Scanner<'u, 'a> {
    unit: &'u mut ScannedUnit,
    /// Depth-0 tokens of the statement being read.
    head: Vec<Token<'a>>,
    depth: usize,
}

impl<'a> Scanner<'_, 'a> {
    fn feed(&mut self, token: Token<'a>) {
        if token.kind == TokenKind::LineComment {
            self.directive(token.text);
            return;
        }

        if self.depth == 0 {
            if token.newline_before && !self.head.is_empty() && starts_statement(token.text) {
                self.finish();
            }
            self.head.push(token);
        }

        if token.kind.opens() {
            self.depth += 1;
        } else if token.kind.closes() {
            self.depth = self.depth.saturating_sub(1);
            if self.depth == 0
                && token.kind == TokenKind::CloseBrace
                && classify(&self.head).statement.kind.is_block_bodied()
            {
                self.finish();
            }
        } else if self.depth == 0 && token.kind == TokenKind::Semicolon {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let head = std::mem::take(&mut self.head);
        let significant = head.iter().any(|t| t.kind != TokenKind::Semicolon);
        if !significant {
            return;
        }
        let classified = classify(&head);
        if let Some(specifier) = classified.specifier {
            self.unit.imports.push(specifier);
        }
        self.unit.statements.push(classified.statement);
    }

    fn directive(&mut self, comment: &str) {
        let Some(body) = comment.strip_prefix("///") else {
            return;
        };
        if !body.trim_start().starts_with("<reference") {
            return;
        }
        if let Some(lib) = attribute(body, "lib") {
            self.unit.lib_references.push(lib.to_string());
        } else if let Some(path) = attribute(body, "path") {
            let specifier = if path.starts_with('.') || path.starts_with('/') {
                path.to_string()
            } else {
                format!("./{path}")
            };
            self.unit.imports.push(specifier);
        }
    }
}

struct Classified {
    statement: Statement,
    specifier: Option<String>,
}

fn starts_statement(word: &str) -> bool {
    matches!(
        word,
        "import"
            | "export"
            | "const"
            | "let"
            | "var"
            | "function"
            | "class"
            | "interface"
            | "type"
            | "enum"
            | "declare"
            | "namespace"
            | "module"
            | "abstract"
            | "async"
    )
}

fn classify(head: &[Token<'_>]) -> Classified {
    let mut exported = false;
    let mut rest = head;
    while let Some((first, tail)) = rest.split_first() {
        match first.text {
            "export" => exported = true,
            "default" if exported => {}
            "declare" | "abstract" | "async" => {}
            _ => break,
        }
        rest = tail;
    }

    let (kind, name_at) = match rest.first().map(|t| t.text) {
        Some("import") => (StatementKind::Import, None),
        Some("{") | Some("*") if exported => (StatementKind::ExportList, None),
        Some("const") if rest.get(1).is_some_and(|t| t.text == "enum") => (StatementKind::Enum, Some(2)),
        Some("const" | "let" | "var") => (StatementKind::Variable, Some(1)),
        Some("function") => {
            let skip_star = rest.get(1).is_some_and(|t| t.kind == TokenKind::Star);
            (StatementKind::Function, Some(if skip_star { 2 } else { 1 }))
        }
        Some("class") => (StatementKind::Class, Some(1)),
        Some("interface") => (StatementKind::Interface, Some(1)),
        Some("type") if rest.get(1).is_some_and(|t| t.kind == TokenKind::Ident) => {
            (StatementKind::TypeAlias, Some(1))
        }
        Some("enum") => (StatementKind::Enum, Some(1)),
        Some("namespace" | "module") => (StatementKind::Namespace, Some(1)),
        Some("global") => (StatementKind::Namespace, Some(0)),
        _ => (StatementKind::Expression, None),
    };

    let name = name_at
        .and_then(|index| rest.get(index))
        .and_then(|token| match token.kind {
            TokenKind::Ident => Some(SmolStr::new(token.text)),
            TokenKind::String => Some(SmolStr::new(unquote(token.text))),
            _ => None,
        });

    let specifier = match kind {
        StatementKind::Import => rest
            .iter()
            .find(|t| t.kind == TokenKind::String)
            .map(|t| unquote(t.text).to_string()),
        StatementKind::ExportList => rest
            .iter()
            .position(|t| t.text == "from")
            .and_then(|at| rest.get(at + 1))
            .filter(|t| t.kind == TokenKind::String)
            .map(|t| unquote(t.text).to_string()),
        _ => None,
    };

    Classified {
        statement: Statement {
            kind,
            name,
            exported,
        },
        specifier,
    }
}

fn unquote(literal: &str) -> &str {
    literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default()
}

/// Value of `name="..."` (or single-quoted) inside a directive.
fn attribute<'c>(body: &'c str, name: &str) -> Option<&'c str> {
    let at = body.find(&format!("{name}="))?;
    let value = &body[at + name.len() + 1..];
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    value.find(quote).map(|end| &value[..end])
}
