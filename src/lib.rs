//! A lexer-and-parser generator: given named regular expressions for token
//! classes and a context-free grammar, build a scanner that tokenizes input
//! text and an SLR(1) parser that validates the resulting token stream.
//!
//! The pipeline is source text → tokens → parse verdict, and the two halves
//! are independent:
//!
//! - [regex]/[lexer]: regex surface syntax → [automaton::Dfa] via the
//!   followpos construction, then per-class DFAs combine into one
//!   longest-match scanner.
//! - [grammar]/[parser]: grammar text → augmented grammar → FIRST/FOLLOW →
//!   canonical LR(0) collection → ACTION/GOTO tables → a table-driven
//!   shift/reduce driver.
//!
//! # Example
//!
//! ```
//! use lexparse_gen::{build_lexer, build_parser};
//!
//! let lexer = build_lexer(&[("NUM", "[0-9]+"), ("PLUS", r"\+")]).unwrap();
//! let tokens = lexer.scan("1 + 2");
//! let classes: Vec<&str> = tokens.iter().map(|t| t.class.as_str()).collect();
//! assert_eq!(classes, ["NUM", "PLUS", "NUM"]);
//!
//! let parser = build_parser("S ::= NUM PLUS NUM\n").unwrap();
//! assert!(parser.parse(&tokens).is_ok());
//! ```
pub mod automaton;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod regex;
mod util;

pub use error::{LexerBuildError, ParserBuildError};
pub use lexer::{build_lexer, Lexer, Token};
pub use parser::{build_parser, Parser};
pub use regex::compile_regex;
pub use util::Position;
