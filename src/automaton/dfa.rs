use super::StateId;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write;

/// A deterministic finite automaton over `char`. `delta` is partial: a
/// missing `(state, char)` entry means "no transition," which the scanner
/// reads as "this is as far as the current match can go."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    num_states: usize,
    start: StateId,
    accepting: BTreeSet<StateId>,
    alphabet: BTreeSet<char>,
    delta: HashMap<(StateId, char), StateId>,
}

impl Dfa {
    pub fn new(
        num_states: usize,
        start: StateId,
        accepting: BTreeSet<StateId>,
        alphabet: BTreeSet<char>,
        delta: HashMap<(StateId, char), StateId>,
    ) -> Self {
        debug_assert!(start < num_states);
        debug_assert!(accepting.iter().all(|&s| s < num_states));
        Self {
            num_states,
            start,
            accepting,
            alphabet,
            delta,
        }
    }

    /// A DFA with a single accepting start state and an empty alphabet,
    /// accepting only the empty string. The edge case for an empty regex.
    pub fn empty_accepting() -> Self {
        let mut accepting = BTreeSet::new();
        accepting.insert(0);
        Self::new(1, 0, accepting, BTreeSet::new(), HashMap::new())
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn accepting_states(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    /// Single-step transition. `None` means the automaton has no edge for
    /// `ch` from `state`.
    pub fn step(&self, state: StateId, ch: char) -> Option<StateId> {
        self.delta.get(&(state, ch)).copied()
    }

    /// All transitions, in no particular order. Used by the lexer builder to
    /// copy a per-class DFA's edges into the combined NFA during the union
    /// step.
    pub fn transitions(&self) -> impl Iterator<Item = ((StateId, char), StateId)> + '_ {
        self.delta.iter().map(|(&k, &v)| (k, v))
    }

    /// Whether the DFA accepts `input` in its entirety (used by the regex
    /// oracle tests, not by the scanner which only ever needs `step`).
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start;
        for ch in input.chars() {
            match self.step(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Emit the on-disk debug format described in the external interfaces:
    /// state count, start id, comma-separated accepting ids, comma-separated
    /// alphabet, then one `from,sym,to` line per transition. This crate never
    /// opens a file itself; the embedder decides whether/where to persist it.
    pub fn write_debug<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        writeln!(w, "{}", self.num_states)?;
        writeln!(w, "{}", self.start)?;
        writeln!(
            w,
            "{}",
            self.accepting
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )?;
        writeln!(
            w,
            "{}",
            self.alphabet.iter().collect::<Vec<_>>().iter().map(|c| c.to_string()).collect::<Vec<_>>().join(",")
        )?;
        let mut edges: Vec<_> = self.delta.iter().collect();
        edges.sort_by_key(|((from, sym), to)| (*from, *sym, *to));
        for ((from, sym), to) in edges {
            writeln!(w, "{},{},{}", from, sym, to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accepting_accepts_only_the_empty_string() {
        let dfa = Dfa::empty_accepting();
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
        assert!(dfa.alphabet().is_empty());
    }

    #[test]
    fn step_returns_none_off_the_edge_of_the_alphabet() {
        let mut delta = HashMap::new();
        delta.insert((0, 'a'), 1);
        let mut accepting = BTreeSet::new();
        accepting.insert(1);
        let dfa = Dfa::new(2, 0, accepting, ['a'].into_iter().collect(), delta);
        assert_eq!(dfa.step(0, 'a'), Some(1));
        assert_eq!(dfa.step(0, 'b'), None);
        assert_eq!(dfa.step(1, 'a'), None);
    }

    #[test]
    fn write_debug_emits_the_documented_format() {
        let mut delta = HashMap::new();
        delta.insert((0, 'a'), 1);
        let mut accepting = BTreeSet::new();
        accepting.insert(1);
        let dfa = Dfa::new(2, 0, accepting, ['a'].into_iter().collect(), delta);

        let mut out = String::new();
        dfa.write_debug(&mut out).unwrap();
        assert_eq!(out, "2\n0\n1\na\n0,a,1\n");
    }
}
