//! Finite automata: the [Dfa] produced by the regex compiler and the
//! combined lexer, and the [Nfa] used as the intermediate union step before
//! subset construction.
mod dfa;
mod nfa;

pub use dfa::Dfa;
pub use nfa::Nfa;

/// Identifier for a single automaton state. States are always numbered
/// `0..num_states` in the order they were discovered while building the
/// automaton, and that discovery order is part of the observable contract
/// (it is what a `write_debug` dump or an error message refers to as
/// "state N").
pub type StateId = usize;
