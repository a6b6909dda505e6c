//! Cross-checks the hand-rolled followpos-based regex compiler against the
//! `regex` crate (a dev-dependency only — see DESIGN.md) for a curated set
//! of patterns and candidate strings, per the "reference NFA simulator"
//! property test called for in SPEC_FULL §8.
use lexparse_gen::compile_regex;

fn oracle_matches(pattern: &str, input: &str) -> bool {
    let anchored = format!("^(?:{})$", pattern);
    regex::Regex::new(&anchored).unwrap().is_match(input)
}

fn check(pattern: &str, candidates: &[&str]) {
    let dfa = compile_regex(pattern).unwrap();
    for &candidate in candidates {
        let ours = dfa.accepts(candidate);
        let oracle = oracle_matches(pattern, candidate);
        assert_eq!(
            ours, oracle,
            "pattern {:?}, input {:?}: DFA said {}, oracle said {}",
            pattern, candidate, ours, oracle
        );
    }
}

const CANDIDATES: &[&str] = &[
    "", "a", "b", "c", "ab", "ac", "abc", "abcbb", "aab", "aabb", "abab", "cab", "aaaa", "bbbb",
    "accb", "x", "a*b",
];

#[test]
fn star_union_against_oracle() {
    check("a(b|c)*", CANDIDATES);
}

#[test]
fn plus_against_oracle() {
    check("a+b", CANDIDATES);
}

#[test]
fn question_against_oracle() {
    check("ab?c", CANDIDATES);
}

#[test]
fn nested_groups_against_oracle() {
    check("(a|b)(c|d)*(a|b)", CANDIDATES);
}

#[test]
fn alternation_of_concatenations_against_oracle() {
    check("ab|ba", CANDIDATES);
}

#[test]
fn character_class_against_oracle() {
    check("[a-c]+b", CANDIDATES);
}

#[test]
fn escaped_metacharacter_against_oracle() {
    check(r"a\*b", &["a*b", "aab", "a**b", ""]);
}

#[test]
fn deeply_nested_repetition_against_oracle() {
    check("(a+b+)*", CANDIDATES);
}
