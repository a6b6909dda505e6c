use crate::automaton::{Dfa, Nfa, StateId};
use std::collections::{BTreeSet, HashMap};

/// Combines per-token-class DFAs into a single DFA via an epsilon-joined
/// union followed by subset construction. Declaration order of the input
/// DFAs is priority order: on an equal-length match, the class with the
/// smaller index wins.
pub struct LexerBuilder {
    dfas: Vec<Dfa>,
}

impl LexerBuilder {
    pub fn new(dfas: Vec<Dfa>) -> Self {
        Self { dfas }
    }

    /// Build the combined DFA and its accept-state → class-index map.
    pub fn build(&self) -> (Dfa, HashMap<StateId, usize>) {
        let nfa = self.union();
        subset_construct(&nfa)
    }

    fn union(&self) -> Nfa {
        let mut nfa = Nfa::new();
        let start = nfa.add_state(None);
        nfa.set_start(start);

        for (class_idx, dfa) in self.dfas.iter().enumerate() {
            let mut remap: HashMap<StateId, StateId> = HashMap::with_capacity(dfa.num_states());
            for s in 0..dfa.num_states() {
                let copied = nfa.add_state(Some(class_idx));
                remap.insert(s, copied);
                if dfa.is_accepting(s) {
                    nfa.mark_accept(copied);
                }
            }
            for ((from, ch), to) in dfa.transitions() {
                nfa.add_transition(remap[&from], Some(ch), remap[&to]);
            }
            nfa.add_transition(start, None, remap[&dfa.start()]);
        }

        nfa
    }
}

/// Determinize `nfa`, recording at each accepting combined-DFA state the
/// declaration index of the highest-priority class whose original accepting
/// state is a member of that state's NFA-state set.
fn subset_construct(nfa: &Nfa) -> (Dfa, HashMap<StateId, usize>) {
    let alphabet = nfa.alphabet();
    let mut start = BTreeSet::new();
    start.insert(nfa.start());
    let start = nfa.epsilon_closure(&start);

    let mut states: Vec<BTreeSet<StateId>> = vec![start.clone()];
    let mut index: HashMap<BTreeSet<StateId>, usize> = HashMap::new();
    index.insert(start.clone(), 0);

    let mut accepting = BTreeSet::new();
    let mut accept_class: HashMap<StateId, usize> = HashMap::new();
    record_accept_class(nfa, 0, &start, &mut accepting, &mut accept_class);

    let mut delta = HashMap::new();
    let mut worklist = std::collections::VecDeque::new();
    worklist.push_back(0usize);

    while let Some(state_id) = worklist.pop_front() {
        let members = states[state_id].clone();
        for &ch in &alphabet {
            let moved = nfa.step_set(&members, ch);
            if moved.is_empty() {
                continue;
            }
            let next = nfa.epsilon_closure(&moved);
            let next_id = *index.entry(next.clone()).or_insert_with(|| {
                let id = states.len();
                states.push(next.clone());
                record_accept_class(nfa, id, &next, &mut accepting, &mut accept_class);
                worklist.push_back(id);
                id
            });
            delta.insert((state_id, ch), next_id);
        }
    }

    (Dfa::new(states.len(), 0, accepting, alphabet, delta), accept_class)
}

fn record_accept_class(
    nfa: &Nfa,
    combined_state: StateId,
    members: &BTreeSet<StateId>,
    accepting: &mut BTreeSet<StateId>,
    accept_class: &mut HashMap<StateId, usize>,
) {
    let winner = members
        .iter()
        .filter(|&&s| nfa.is_accepting(s))
        .filter_map(|&s| nfa.origin_class_of(s))
        .min();
    if let Some(class_idx) = winner {
        accepting.insert(combined_state);
        accept_class.insert(combined_state, class_idx);
    }
}
