use super::driver::{Action, Parser};
use super::first_follow::{compute_first, compute_follow};
use super::lr0::build_collection;
use crate::error::{ConflictKind, GrammarNotSlr};
use crate::grammar::{Grammar, Production, END_MARKER};
use std::collections::{BTreeSet, HashMap};

/// Builds the augmented grammar, FIRST/FOLLOW sets, canonical LR(0)
/// collection, and ACTION/GOTO tables for SLR(1) parsing.
pub struct ParserGenerator;

impl ParserGenerator {
    /// Augment `grammar` with a fresh start production `S' → S`, then
    /// synthesize ACTION/GOTO. Fails with [GrammarNotSlr] on the first
    /// shift/reduce or reduce/reduce conflict encountered, in state-then-
    /// symbol discovery order.
    pub fn generate(grammar: &Grammar) -> Result<Parser, GrammarNotSlr> {
        let augmented_start = fresh_start_name(&grammar.start, &grammar.non_terminals);

        let mut productions = Vec::with_capacity(grammar.productions.len() + 1);
        productions.push(Production {
            head: augmented_start.clone(),
            body: vec![grammar.start.clone()],
        });
        productions.extend(grammar.productions.iter().cloned());

        let mut non_terminals = grammar.non_terminals.clone();
        non_terminals.insert(augmented_start.clone());

        let augmented = Grammar {
            non_terminals,
            terminals: grammar.terminals.clone(),
            productions: productions.clone(),
            start: augmented_start.clone(),
        };

        let first = compute_first(&augmented);
        let follow = compute_follow(&augmented, &first);

        let mut symbols: Vec<String> = augmented
            .terminals
            .iter()
            .chain(augmented.non_terminals.iter())
            .cloned()
            .collect();
        symbols.sort();
        symbols.dedup();

        let collection = build_collection(&productions, &symbols);

        let mut action: HashMap<(usize, String), Action> = HashMap::new();
        let mut goto_table: HashMap<(usize, String), usize> = HashMap::new();

        for (state_id, items) in collection.states.iter().enumerate() {
            for &(prod_idx, dot) in items {
                let prod = &productions[prod_idx];

                if dot < prod.body.len() {
                    let next_sym = &prod.body[dot];
                    if augmented.terminals.contains(next_sym) {
                        if let Some(&next_state) = collection.goto.get(&(state_id, next_sym.clone())) {
                            set_action(
                                &mut action,
                                state_id,
                                next_sym.clone(),
                                Action::Shift(next_state),
                            )?;
                        }
                    }
                    continue;
                }

                // dot at end of body.
                if prod.head == augmented_start {
                    set_action(&mut action, state_id, END_MARKER.to_string(), Action::Accept)?;
                } else {
                    let follow_set: BTreeSet<String> =
                        follow.get(&prod.head).cloned().unwrap_or_default();
                    for terminal in &follow_set {
                        set_action(
                            &mut action,
                            state_id,
                            terminal.clone(),
                            Action::Reduce(prod_idx),
                        )?;
                    }
                }
            }

            for non_terminal in &augmented.non_terminals {
                if let Some(&next_state) = collection.goto.get(&(state_id, non_terminal.clone())) {
                    goto_table.insert((state_id, non_terminal.clone()), next_state);
                }
            }
        }

        Ok(Parser::new(productions, action, goto_table))
    }
}

/// Shift and reduce compete for the same cell under a different rule than
/// reduce vs. reduce (both are still conflicts, but the message differs);
/// record which was already there to name the right [ConflictKind].
fn set_action(
    table: &mut HashMap<(usize, String), Action>,
    state: usize,
    symbol: String,
    new_action: Action,
) -> Result<(), GrammarNotSlr> {
    match table.get(&(state, symbol.clone())) {
        None => {
            table.insert((state, symbol), new_action);
            Ok(())
        }
        Some(existing) if *existing == new_action => Ok(()),
        Some(existing) => {
            let kind = match (existing, &new_action) {
                (Action::Shift(_), Action::Reduce(_)) | (Action::Reduce(_), Action::Shift(_)) => {
                    ConflictKind::ShiftReduce
                }
                _ => ConflictKind::ReduceReduce,
            };
            Err(GrammarNotSlr { state, symbol, kind })
        }
    }
}

/// Prime `name` until it no longer collides with any declared non-terminal.
fn fresh_start_name(start: &str, non_terminals: &BTreeSet<String>) -> String {
    let mut candidate = format!("{}'", start);
    while non_terminals.contains(&candidate) {
        candidate.push('\'');
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_else_grammar_is_not_slr() {
        let grammar = Grammar::parse(
            "S ::= i E t S\n\
             S ::= i E t S e S\n\
             S ::= a\n\
             E ::= b\n",
        )
        .unwrap();
        let err = ParserGenerator::generate(&grammar).unwrap_err();
        assert_eq!(err.kind, ConflictKind::ShiftReduce);
        assert_eq!(err.symbol, "e");
    }

    #[test]
    fn simple_bracket_grammar_is_slr() {
        let grammar = Grammar::parse("S ::= a S b\nS ::= a b\n").unwrap();
        assert!(ParserGenerator::generate(&grammar).is_ok());
    }
}
