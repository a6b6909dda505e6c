//! Typed failures for every build- and parse-time error mode this crate can
//! raise. Each is a plain struct or enum with a hand-written [Display] impl
//! naming the offending construct — no derive-macro error crate is pulled in,
//! consistent with how the rest of this workspace reports failures.
use crate::util::Position;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A malformed regular expression, raised by the regex compiler.
pub struct RegexSyntaxError {
    pub pattern: String,
    pub offset: usize,
    pub message: String,
}

impl RegexSyntaxError {
    pub fn new(pattern: &str, offset: usize, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            offset,
            message: message.into(),
        }
    }

    /// Position of the offending construct within the pattern text itself.
    pub fn position(&self) -> Position {
        crate::util::Code::new(&self.pattern).obtain_position(self.offset)
    }
}

impl Display for RegexSyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RegexSyntaxError: {} (in /{}/ at {})",
            self.message,
            self.pattern,
            self.position()
        )
    }
}

impl std::error::Error for RegexSyntaxError {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised by [build_lexer](crate::build_lexer) when no token classes were
/// supplied.
pub struct EmptyLexerError;

impl Display for EmptyLexerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmptyLexerError: at least one token class is required")
    }
}

impl std::error::Error for EmptyLexerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised by [build_lexer](crate::build_lexer) when two token classes share
/// a declared name.
pub struct DuplicateClassError {
    pub class: String,
}

impl Display for DuplicateClassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DuplicateClassError: class '{}' declared twice", self.class)
    }
}

impl std::error::Error for DuplicateClassError {}

/// The union of every failure a [build_lexer](crate::build_lexer) call can
/// raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerBuildError {
    Regex(RegexSyntaxError),
    Empty(EmptyLexerError),
    Duplicate(DuplicateClassError),
}

impl Display for LexerBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LexerBuildError::Regex(e) => Display::fmt(e, f),
            LexerBuildError::Empty(e) => Display::fmt(e, f),
            LexerBuildError::Duplicate(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for LexerBuildError {}

impl From<RegexSyntaxError> for LexerBuildError {
    fn from(e: RegexSyntaxError) -> Self {
        LexerBuildError::Regex(e)
    }
}
impl From<EmptyLexerError> for LexerBuildError {
    fn from(e: EmptyLexerError) -> Self {
        LexerBuildError::Empty(e)
    }
}
impl From<DuplicateClassError> for LexerBuildError {
    fn from(e: DuplicateClassError) -> Self {
        LexerBuildError::Duplicate(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised by the grammar text loader: a malformed `head ::= body` line, a
/// missing head, or a reserved symbol (`ε`, `$`) declared by the user.
pub struct GrammarSyntaxError {
    pub line: usize,
    pub message: String,
}

impl Display for GrammarSyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GrammarSyntaxError: {} (line {})", self.message, self.line)
    }
}

impl std::error::Error for GrammarSyntaxError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Distinguishes the two ways an SLR(1) table can fail to be well defined.
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::ShiftReduce => write!(f, "shift/reduce"),
            ConflictKind::ReduceReduce => write!(f, "reduce/reduce"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised by [ParserGenerator](crate::parser::ParserGenerator) when the
/// grammar is not SLR(1): two actions compete for the same `(state, symbol)`
/// table cell.
pub struct GrammarNotSlr {
    pub state: usize,
    pub symbol: String,
    pub kind: ConflictKind,
}

impl Display for GrammarNotSlr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GrammarNotSlr: {} conflict in state {} on symbol '{}'",
            self.kind, self.state, self.symbol
        )
    }
}

impl std::error::Error for GrammarNotSlr {}

/// The union of every failure a [build_parser](crate::build_parser) call can
/// raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserBuildError {
    Grammar(GrammarSyntaxError),
    NotSlr(GrammarNotSlr),
}

impl Display for ParserBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserBuildError::Grammar(e) => Display::fmt(e, f),
            ParserBuildError::NotSlr(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for ParserBuildError {}

impl From<GrammarSyntaxError> for ParserBuildError {
    fn from(e: GrammarSyntaxError) -> Self {
        ParserBuildError::Grammar(e)
    }
}
impl From<GrammarNotSlr> for ParserBuildError {
    fn from(e: GrammarNotSlr) -> Self {
        ParserBuildError::NotSlr(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised by [Parser::parse](crate::parser::Parser::parse) when the token
/// stream has no valid `ACTION` entry for the current `(state, token)` pair.
pub struct SyntaxError {
    pub state: usize,
    pub token: String,
    pub lexeme: String,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SyntaxError: unexpected '{}' ({}) in state {}",
            self.lexeme, self.token, self.state
        )
    }
}

impl std::error::Error for SyntaxError {}
