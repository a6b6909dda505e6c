//! Multi-pattern lexer: per-class regex compilation, NFA union, and subset
//! construction into one combined DFA, driven by a longest-match scanner
//! with panic-mode recovery.
mod builder;

use crate::automaton::{Dfa, StateId};
use crate::error::{DuplicateClassError, EmptyLexerError, LexerBuildError};
use crate::regex::compile_regex;
use crate::util::{Code, Log};
use builder::LexerBuilder;
use once_cell::unsync::OnceCell;
use std::collections::{HashMap, HashSet};

/// A single scanned lexeme: its token class name and the exact text matched.
/// An in-band `"error!"` class marks panic-mode recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: String,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    pub const ERROR_CLASS: &'static str = "error!";
}

/// The hard-coded whitespace alphabet skipped between tokens. Not a token
/// class: it never appears in the output stream.
fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// A compiled multi-pattern scanner: one combined DFA plus the declaration
/// order used to break equal-length-match ties.
pub struct Lexer {
    classes: Vec<String>,
    dfa: Dfa,
    accept_class: HashMap<StateId, usize>,
    log: OnceCell<Log<&'static str>>,
}

impl Lexer {
    fn new(classes: Vec<String>, dfa: Dfa, accept_class: HashMap<StateId, usize>) -> Self {
        Self {
            classes,
            dfa,
            accept_class,
            log: OnceCell::new(),
        }
    }

    /// Configure verbosity for [Lexer::scan]'s tracing (builder-pattern,
    /// mirroring the rest of this workspace's configuration surface).
    pub fn set_log(&mut self, log: Log<&'static str>) -> &mut Self {
        let _ = self.log.set(log);
        self
    }

    fn log(&self) -> &Log<&'static str> {
        self.log.get_or_init(|| Log::None)
    }

    /// Scan `text` into a stream of tokens using maximal munch: at each
    /// position, the scanner runs the combined DFA as far as it can go and
    /// backtracks to the last state it passed through that was accepting.
    /// Whitespace is skipped between tokens; an unrecognized run of input
    /// produces a single-character `"error!"` token per input character so
    /// scanning can always make progress.
    pub fn scan(&self, text: &str) -> Vec<Token> {
        let code = Code::new(text);
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut tokens = Vec::new();
        let mut i = 0usize;

        while i < chars.len() {
            let (offset, ch) = chars[i];
            if is_whitespace(ch) {
                i += 1;
                continue;
            }

            let mut state = self.dfa.start();
            let mut last_accept: Option<(usize, usize)> = None; // (chars-consumed, class index)
            let mut consumed = 0usize;

            loop {
                if let Some(&class_idx) = self.accept_class.get(&state) {
                    last_accept = Some((consumed, class_idx));
                }
                if i + consumed >= chars.len() {
                    break;
                }
                let (_, next_ch) = chars[i + consumed];
                match self.dfa.step(state, next_ch) {
                    Some(next_state) => {
                        state = next_state;
                        consumed += 1;
                    }
                    None => break,
                }
            }

            match last_accept {
                Some((len, class_idx)) if len > 0 => {
                    let end = chars.get(i + len).map(|&(o, _)| o).unwrap_or(text.len());
                    let lexeme = text[offset..end].to_string();
                    if self.log().shows_verbose() {
                        let pos = code.obtain_position(offset);
                        println!(
                            "matched '{}' as {} at {}",
                            lexeme, self.classes[class_idx], pos
                        );
                    }
                    tokens.push(Token {
                        class: self.classes[class_idx].clone(),
                        lexeme,
                        offset,
                    });
                    i += len;
                }
                _ => {
                    // Zero-length or nonexistent match: panic-mode recovery.
                    // Consuming at least one character guarantees progress
                    // even when some class's DFA accepts the empty string.
                    if self.log().shows_result() {
                        let pos = code.obtain_position(offset);
                        println!("no match at {}, emitting error! token for '{}'", pos, ch);
                    }
                    tokens.push(Token {
                        class: Token::ERROR_CLASS.to_string(),
                        lexeme: ch.to_string(),
                        offset,
                    });
                    i += 1;
                }
            }
        }

        tokens
    }
}

/// Compile a set of named regex patterns into a single [Lexer]. `classes` is
/// declaration order, which doubles as tie-break priority: when two classes
/// match the same longest lexeme, the one earlier in this slice wins.
pub fn build_lexer(classes: &[(&str, &str)]) -> Result<Lexer, LexerBuildError> {
    if classes.is_empty() {
        return Err(EmptyLexerError.into());
    }

    let mut seen = HashSet::new();
    for (name, _) in classes {
        if !seen.insert(*name) {
            return Err(DuplicateClassError {
                class: name.to_string(),
            }
            .into());
        }
    }

    let mut dfas = Vec::with_capacity(classes.len());
    for (_, pattern) in classes {
        dfas.push(compile_regex(pattern)?);
    }

    let (combined, accept_class) = LexerBuilder::new(dfas).build();
    let names = classes.iter().map(|(name, _)| name.to_string()).collect();
    Ok(Lexer::new(names, combined, accept_class))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.class.as_str(), t.lexeme.as_str())).collect()
    }

    #[test]
    fn tokenizes_numbers_and_identifiers() {
        let lexer = build_lexer(&[
            ("NUM", "[0-9]+"),
            ("ID", "[a-zA-Z][a-zA-Z0-9]*"),
        ])
        .unwrap();
        let tokens = lexer.scan("x1 22 y");
        assert_eq!(
            classes(&tokens),
            vec![("ID", "x1"), ("NUM", "22"), ("ID", "y")]
        );
    }

    #[test]
    fn longest_match_prefers_identifier_over_keyword_prefix() {
        let lexer = build_lexer(&[("IF", "if"), ("ID", "[a-z]+")]).unwrap();
        let tokens = lexer.scan("ifx");
        assert_eq!(classes(&tokens), vec![("ID", "ifx")]);
    }

    #[test]
    fn declaration_priority_breaks_equal_length_ties() {
        let lexer = build_lexer(&[("IF", "if"), ("ID", "[a-z]+")]).unwrap();
        let tokens = lexer.scan("if");
        assert_eq!(classes(&tokens), vec![("IF", "if")]);
    }

    #[test]
    fn unrecognized_input_emits_error_tokens_and_keeps_scanning() {
        let lexer = build_lexer(&[("NUM", "[0-9]+")]).unwrap();
        let tokens = lexer.scan("1#2");
        assert_eq!(
            classes(&tokens),
            vec![("NUM", "1"), (Token::ERROR_CLASS, "#"), ("NUM", "2")]
        );
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        let lexer = build_lexer(&[("WORD", "[a-z]+")]).unwrap();
        let tokens = lexer.scan("  a\tb\n");
        assert_eq!(classes(&tokens), vec![("WORD", "a"), ("WORD", "b")]);
    }

    #[test]
    fn empty_classes_is_an_error() {
        assert!(build_lexer(&[]).is_err());
    }

    #[test]
    fn duplicate_class_name_is_an_error() {
        let err = build_lexer(&[("A", "a"), ("A", "b")]).unwrap_err();
        assert!(matches!(err, LexerBuildError::Duplicate(_)));
    }
}
