use crate::error::SyntaxError;
use crate::grammar::{Production, END_MARKER};
use crate::lexer::Token;
use crate::util::Log;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;

/// A single ACTION-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// The three parse tables synthesized by [ParserGenerator](super::ParserGenerator),
/// plus the shift/reduce execution driver over them. This is the only piece
/// of the parser that survives a build: syntax trees, item sets, and
/// FIRST/FOLLOW are all discarded once the tables exist.
#[derive(Debug)]
pub struct Parser {
    productions: Vec<Production>,
    action: HashMap<(usize, String), Action>,
    goto: HashMap<(usize, String), usize>,
    log: OnceCell<Log<&'static str>>,
}

impl Parser {
    pub(super) fn new(
        productions: Vec<Production>,
        action: HashMap<(usize, String), Action>,
        goto: HashMap<(usize, String), usize>,
    ) -> Self {
        Self {
            productions,
            action,
            goto,
            log: OnceCell::new(),
        }
    }

    pub fn set_log(&mut self, log: Log<&'static str>) -> &mut Self {
        let _ = self.log.set(log);
        self
    }

    fn log(&self) -> &Log<&'static str> {
        self.log.get_or_init(|| Log::None)
    }

    /// Validate `tokens` against the grammar. A trailing end-marker is
    /// appended internally; callers pass only the scanned token classes.
    /// A parse is a pure function of `(tables, token stream)`.
    pub fn parse(&self, tokens: &[Token]) -> Result<(), SyntaxError> {
        let mut stack: Vec<usize> = vec![0];
        let mut pos = 0usize;

        loop {
            let state = *stack.last().expect("stack is never empty during a parse");
            let (symbol, lexeme): (&str, &str) = match tokens.get(pos) {
                Some(tok) => (tok.class.as_str(), tok.lexeme.as_str()),
                None => (END_MARKER, ""),
            };

            match self.action.get(&(state, symbol.to_string())) {
                Some(Action::Shift(next)) => {
                    if self.log().shows_verbose() {
                        println!("state {}: shift '{}' -> state {}", state, symbol, next);
                    }
                    stack.push(*next);
                    pos += 1;
                }
                Some(Action::Reduce(prod_idx)) => {
                    let production = &self.productions[*prod_idx];
                    if self.log().shows_verbose() {
                        println!(
                            "state {}: reduce by {} ::= {}",
                            state,
                            production.head,
                            production.body.join(" ")
                        );
                    }
                    for _ in 0..production.body.len() {
                        stack.pop();
                    }
                    let uncovered = *stack.last().expect("stack is never empty during a parse");
                    let next = *self
                        .goto
                        .get(&(uncovered, production.head.clone()))
                        .expect("ACTION/GOTO were synthesized together; a reduce always has a goto");
                    stack.push(next);
                }
                Some(Action::Accept) => {
                    if self.log().shows_success() {
                        println!("accept");
                    }
                    return Ok(());
                }
                None => {
                    if self.log().shows_result() {
                        println!("syntax error in state {} on '{}'", state, symbol);
                    }
                    return Err(SyntaxError {
                        state,
                        token: symbol.to_string(),
                        lexeme: lexeme.to_string(),
                    });
                }
            }
        }
    }
}
