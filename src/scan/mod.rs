//! # Declaration scanner
//!
//! A lightweight [`AnalysisEngine`](crate::AnalysisEngine): units are lexed
//! with logos and reduced to their top-level statements, module specifiers,
//! and lib references. The model is the closure of the root units over
//! their relative imports and baseline libraries.

mod engine;
mod lexer;
mod unit;

pub use engine::{DeclarationScanner, ScanModel, UnresolvedImport};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use unit::{ScannedUnit, Statement, StatementKind};
