//! Regex → DFA compilation via the followpos (Aho/Sethi/Ullman) construction
//! on an augmented syntax tree.
//!
//! Surface syntax: postfix `* + ?`, implicit concatenation, alternation `|`,
//! grouping `( )`, `\x` escapes, and `[...]` character classes with `-`
//! ranges. There is no dot-any and no anchoring.
//!
//! ```
//! use lexparse_gen::regex::compile_regex;
//!
//! let dfa = compile_regex(r"a(b|c)*").unwrap();
//! assert!(dfa.accepts("abcbb"));
//! assert!(!dfa.accepts("abca d"));
//! ```
mod compiler;
mod shunting;
mod token;
mod tree;

pub use compiler::{compile_regex, RegexCompiler};
