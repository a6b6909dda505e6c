use super::shunting::to_postfix;
use super::token::{insert_concat, tokenize, TokKind};
use super::tree::{Node, PositionId};
use crate::automaton::Dfa;
use crate::error::RegexSyntaxError;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Compiles regex surface syntax into a [Dfa] via the followpos (Aho/Sethi/
/// Ullman) construction. The position-id counter is a field on the compiler,
/// reset by `new()`, so repeated compilations never share state.
pub struct RegexCompiler {
    next_pos: PositionId,
}

impl Default for RegexCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexCompiler {
    pub fn new() -> Self {
        Self { next_pos: 0 }
    }

    fn fresh_pos(&mut self) -> PositionId {
        let id = self.next_pos;
        self.next_pos += 1;
        id
    }

    /// Compile a single regex pattern into its minimal-construction DFA.
    pub fn compile(&mut self, pattern: &str) -> Result<Dfa, RegexSyntaxError> {
        let tokens = tokenize(pattern)?;
        if tokens.is_empty() {
            // Edge case: empty regex.
            return Ok(Dfa::empty_accepting());
        }

        let tokens = insert_concat(tokens);
        let postfix = to_postfix(&tokens, pattern)?;

        let root = self.build_tree(&postfix, pattern)?;

        let mut symbols = HashMap::new();
        root.collect_symbols(&mut symbols);

        let mut followpos = HashMap::new();
        root.compute_followpos(&mut followpos);

        Ok(build_dfa(&root, &followpos, &symbols))
    }

    /// Evaluate the postfix token stream over an operand stack, appending the
    /// distinguished end-marker position before building.
    fn build_tree(
        &mut self,
        postfix: &[super::token::Tok],
        pattern: &str,
    ) -> Result<Node, RegexSyntaxError> {
        let mut stack: Vec<Node> = Vec::new();

        for tok in postfix {
            match tok.kind {
                TokKind::Literal(ch) => stack.push(Node::literal(self.fresh_pos(), ch)),
                TokKind::Star => {
                    let c = pop_operand(&mut stack, tok.offset, pattern, "'*'")?;
                    stack.push(Node::star(c));
                }
                TokKind::Plus => {
                    let c = pop_operand(&mut stack, tok.offset, pattern, "'+'")?;
                    stack.push(Node::plus(c));
                }
                TokKind::Question => {
                    let c = pop_operand(&mut stack, tok.offset, pattern, "'?'")?;
                    stack.push(Node::option(c));
                }
                TokKind::Concat => {
                    let r = pop_operand(&mut stack, tok.offset, pattern, "concatenation")?;
                    let l = pop_operand(&mut stack, tok.offset, pattern, "concatenation")?;
                    stack.push(Node::concat(l, r));
                }
                TokKind::Union => {
                    let r = pop_operand(&mut stack, tok.offset, pattern, "'|'")?;
                    let l = pop_operand(&mut stack, tok.offset, pattern, "'|'")?;
                    stack.push(Node::union(l, r));
                }
                TokKind::LParen | TokKind::RParen | TokKind::EndMarker => {
                    unreachable!("parentheses are consumed by shunting-yard")
                }
            }
        }

        let root = pop_operand(&mut stack, pattern.len(), pattern, "regex")?;
        if !stack.is_empty() {
            return Err(RegexSyntaxError::new(
                pattern,
                pattern.len(),
                "trailing operand with no operator to combine it",
            ));
        }

        // Augmentation: root . #
        let end_marker = Node::end_marker(self.fresh_pos());
        Ok(Node::concat(root, end_marker))
    }
}

fn pop_operand(
    stack: &mut Vec<Node>,
    offset: usize,
    pattern: &str,
    op: &str,
) -> Result<Node, RegexSyntaxError> {
    stack
        .pop()
        .ok_or_else(|| RegexSyntaxError::new(pattern, offset, format!("{} is missing an operand", op)))
}

/// Subset construction over sets of positions.
fn build_dfa(
    root: &Node,
    followpos: &HashMap<PositionId, BTreeSet<PositionId>>,
    symbols: &HashMap<PositionId, char>,
) -> Dfa {
    let alphabet: BTreeSet<char> = symbols.values().copied().collect();
    let end_marker_pos = root.end_marker_pos();

    let start_set = root.attrs().firstpos.clone();
    let mut states: Vec<BTreeSet<PositionId>> = vec![start_set.clone()];
    let mut index: HashMap<BTreeSet<PositionId>, usize> = HashMap::new();
    index.insert(start_set.clone(), 0);

    let mut accepting = BTreeSet::new();
    if start_set.contains(&end_marker_pos) {
        accepting.insert(0);
    }

    let mut delta = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();
    worklist.push_back(0);

    while let Some(state_id) = worklist.pop_front() {
        let positions = states[state_id].clone();
        for &ch in &alphabet {
            let mut next = BTreeSet::new();
            for &p in &positions {
                if symbols.get(&p) == Some(&ch) {
                    if let Some(fp) = followpos.get(&p) {
                        next.extend(fp.iter().copied());
                    }
                }
            }
            if next.is_empty() {
                continue;
            }
            let next_id = *index.entry(next.clone()).or_insert_with(|| {
                let id = states.len();
                states.push(next.clone());
                if next.contains(&end_marker_pos) {
                    accepting.insert(id);
                }
                worklist.push_back(id);
                id
            });
            delta.insert((state_id, ch), next_id);
        }
    }

    Dfa::new(states.len(), 0, accepting, alphabet, delta)
}

/// Compile `pattern` into a DFA. This is the crate's top-level regex entry
/// point.
pub fn compile_regex(pattern: &str) -> Result<Dfa, RegexSyntaxError> {
    RegexCompiler::new().compile(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_union_scenario() {
        let dfa = compile_regex("a(b|c)*").unwrap();
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("abcbb"));
        assert!(!dfa.accepts("abca d"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn empty_regex_accepts_only_empty_string() {
        let dfa = compile_regex("").unwrap();
        assert_eq!(dfa.num_states(), 1);
        assert!(dfa.alphabet().is_empty());
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn plus_requires_at_least_one_repetition() {
        let dfa = compile_regex("a+").unwrap();
        assert!(!dfa.accepts(""));
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("aaaa"));
    }

    #[test]
    fn question_mark_makes_subexpression_optional() {
        let dfa = compile_regex("ab?c").unwrap();
        assert!(dfa.accepts("ac"));
        assert!(dfa.accepts("abc"));
        assert!(!dfa.accepts("abbc"));
    }

    #[test]
    fn character_class_with_range_and_literal() {
        let dfa = compile_regex("[a-cX]+").unwrap();
        assert!(dfa.accepts("abcXba"));
        assert!(!dfa.accepts("abcd"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn escaped_metacharacter_is_literal() {
        let dfa = compile_regex(r"a\*b").unwrap();
        assert!(dfa.accepts("a*b"));
        assert!(!dfa.accepts("aab"));
    }

    #[test]
    fn unclosed_group_is_a_syntax_error() {
        assert!(compile_regex("(ab").is_err());
    }

    #[test]
    fn empty_character_class_is_a_syntax_error() {
        assert!(compile_regex("[]").is_err());
    }

    #[test]
    fn operator_missing_operand_is_a_syntax_error() {
        assert!(compile_regex("*ab").is_err());
        assert!(compile_regex("a|").is_err());
    }

    #[test]
    fn repeated_compilation_does_not_leak_position_counter_state() {
        let mut compiler = RegexCompiler::new();
        let first = compiler.compile("ab").unwrap();
        let mut fresh = RegexCompiler::new();
        let second = fresh.compile("ab").unwrap();
        assert_eq!(first.num_states(), second.num_states());
    }
}
