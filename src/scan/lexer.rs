//! Logos-based lexer for script sources.
//!
//! Only as much of the language is recognized as the declaration scanner
//! needs: trivia, identifiers, literals, and bracket punctuation. Anything
//! else comes out as [`TokenKind::Other`].

use logos::Logos;

/// A token with its kind and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// A line break separates this token from the previous non-trivia token.
    pub newline_before: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    String,
    Template,
    Number,
    /// `//` comment, kept for triple-slash directives.
    LineComment,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Star,
    Equals,
    Other,
}

impl TokenKind {
    pub fn opens(self) -> bool {
        matches!(self, Self::OpenBrace | Self::OpenParen | Self::OpenBracket)
    }

    pub fn closes(self) -> bool {
        matches!(self, Self::CloseBrace | Self::CloseParen | Self::CloseBracket)
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("*")]
    Star,
    #[token("=")]
    Equals,
}

impl LogosToken {
    fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            Self::Whitespace | Self::BlockComment => return None,
            Self::LineComment => TokenKind::LineComment,
            Self::Ident => TokenKind::Ident,
            Self::String => TokenKind::String,
            Self::Template => TokenKind::Template,
            Self::Number => TokenKind::Number,
            Self::OpenBrace => TokenKind::OpenBrace,
            Self::CloseBrace => TokenKind::CloseBrace,
            Self::OpenParen => TokenKind::OpenParen,
            Self::CloseParen => TokenKind::CloseParen,
            Self::OpenBracket => TokenKind::OpenBracket,
            Self::CloseBracket => TokenKind::CloseBracket,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Comma => TokenKind::Comma,
            Self::Star => TokenKind::Star,
            Self::Equals => TokenKind::Equals,
        };
        Some(kind)
    }
}

/// Lexer wrapping the logos-generated tokenizer. Whitespace and block
/// comments are folded into the `newline_before` flag of the next token.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    pending_newline: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            pending_newline: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let logos_token = self.inner.next()?;
            let text = self.inner.slice();
            let kind = match logos_token {
                Ok(token) => token.kind(),
                Err(()) => Some(TokenKind::Other),
            };
            let Some(kind) = kind else {
                self.pending_newline |= text.contains('\n');
                continue;
            };
            let newline_before = std::mem::take(&mut self.pending_newline);
            // A line comment runs to the end of its line.
            if kind == TokenKind::LineComment {
                self.pending_newline = true;
            }
            return Some(Token {
                kind,
                text,
                newline_before,
            });
        }
    }
}

/// Tokenize an entire string into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
