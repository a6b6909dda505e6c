use super::StateId;
use std::collections::{BTreeSet, HashMap};

/// A non-deterministic finite automaton over `char ∪ {ε}`. Used only as the
/// intermediate union step between per-class DFAs and the subset-constructed
/// combined DFA — it never outlives `LexerBuilder::build`.
///
/// Each state optionally carries the declaration index of the token class it
/// was copied from (`origin_class`), tagged directly on the state rather than
/// encoded into a synthetic state name and parsed back out later.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    num_states: usize,
    start: StateId,
    accepting: BTreeSet<StateId>,
    origin_class: Vec<Option<usize>>,
    /// `None` is the epsilon symbol; it can never collide with a `char`.
    transitions: HashMap<(StateId, Option<char>), BTreeSet<StateId>>,
}

impl Nfa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, origin_class: Option<usize>) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        self.origin_class.push(origin_class);
        id
    }

    pub fn set_start(&mut self, state: StateId) {
        self.start = state;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn mark_accept(&mut self, state: StateId) {
        self.accepting.insert(state);
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn origin_class_of(&self, state: StateId) -> Option<usize> {
        self.origin_class[state]
    }

    pub fn add_transition(&mut self, from: StateId, sym: Option<char>, to: StateId) {
        self.transitions.entry((from, sym)).or_default().insert(to);
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// The distinct non-epsilon symbols used anywhere in this automaton.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transitions.keys().filter_map(|&(_, sym)| sym).collect()
    }

    fn targets(&self, from: StateId, sym: Option<char>) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&(from, sym))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// The set of states reachable from `states` via epsilon transitions
    /// only, including `states` themselves.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut worklist: Vec<StateId> = states.iter().copied().collect();
        while let Some(s) = worklist.pop() {
            for next in self.targets(s, None) {
                if closure.insert(next) {
                    worklist.push(next);
                }
            }
        }
        closure
    }

    /// All states reachable from any state in `states` on a single `ch`
    /// transition (epsilon excluded; the caller is expected to take the
    /// epsilon closure of the result).
    pub fn step_set(&self, states: &BTreeSet<StateId>, ch: char) -> BTreeSet<StateId> {
        states
            .iter()
            .flat_map(|&s| self.targets(s, Some(ch)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_closure_follows_chains_of_epsilon_edges() {
        let mut nfa = Nfa::new();
        let s0 = nfa.add_state(None);
        let s1 = nfa.add_state(None);
        let s2 = nfa.add_state(None);
        nfa.add_transition(s0, None, s1);
        nfa.add_transition(s1, None, s2);

        let start: BTreeSet<StateId> = [s0].into_iter().collect();
        let closure = nfa.epsilon_closure(&start);
        assert_eq!(closure, [s0, s1, s2].into_iter().collect());
    }

    #[test]
    fn step_set_excludes_epsilon_transitions() {
        let mut nfa = Nfa::new();
        let s0 = nfa.add_state(None);
        let s1 = nfa.add_state(None);
        let s2 = nfa.add_state(None);
        nfa.add_transition(s0, Some('a'), s1);
        nfa.add_transition(s0, None, s2);

        let start: BTreeSet<StateId> = [s0].into_iter().collect();
        let moved = nfa.step_set(&start, 'a');
        assert_eq!(moved, [s1].into_iter().collect());
    }

    #[test]
    fn origin_class_is_recorded_per_state() {
        let mut nfa = Nfa::new();
        let s0 = nfa.add_state(Some(2));
        let s1 = nfa.add_state(None);
        assert_eq!(nfa.origin_class_of(s0), Some(2));
        assert_eq!(nfa.origin_class_of(s1), None);
    }
}
