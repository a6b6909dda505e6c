use crate::grammar::{Grammar, EPSILON, END_MARKER};
use std::collections::{BTreeSet, HashMap};

pub type SymbolSet = BTreeSet<String>;

/// `FIRST(X)` for every terminal and non-terminal `X` in `grammar`, computed
/// by fixed-point iteration. Terminals are seeded to their own singleton and
/// never change; [EPSILON] is used as the in-set marker for "this symbol can
/// vanish."
pub fn compute_first(grammar: &Grammar) -> HashMap<String, SymbolSet> {
    let mut first: HashMap<String, SymbolSet> = HashMap::new();
    for t in &grammar.terminals {
        first.insert(t.clone(), [t.clone()].into_iter().collect());
    }
    for n in &grammar.non_terminals {
        first.entry(n.clone()).or_default();
    }

    loop {
        let mut changed = false;
        for p in &grammar.productions {
            let (seq_first, nullable) = first_of_sequence(&p.body, &first);
            let entry = first.entry(p.head.clone()).or_default();
            for sym in &seq_first {
                changed |= entry.insert(sym.clone());
            }
            if nullable {
                changed |= entry.insert(EPSILON.to_string());
            }
        }
        if !changed {
            break;
        }
    }

    first
}

/// `FIRST` of a symbol sequence: the set of terminals that can begin a
/// string derived from it (epsilon excluded from the returned set), plus
/// whether the whole sequence is nullable.
pub fn first_of_sequence(seq: &[String], first: &HashMap<String, SymbolSet>) -> (SymbolSet, bool) {
    let mut result = SymbolSet::new();
    for sym in seq {
        let fx = match first.get(sym) {
            Some(set) => set.clone(),
            None => [sym.clone()].into_iter().collect(),
        };
        for t in fx.iter().filter(|t| t.as_str() != EPSILON) {
            result.insert(t.clone());
        }
        if !fx.contains(EPSILON) {
            return (result, false);
        }
    }
    (result, true)
}

/// `FOLLOW(A)` for every non-terminal `A`, computed by fixed-point
/// iteration over the augmented grammar.
pub fn compute_follow(grammar: &Grammar, first: &HashMap<String, SymbolSet>) -> HashMap<String, SymbolSet> {
    let mut follow: HashMap<String, SymbolSet> = HashMap::new();
    for n in &grammar.non_terminals {
        follow.entry(n.clone()).or_default();
    }
    follow
        .entry(grammar.start.clone())
        .or_default()
        .insert(END_MARKER.to_string());

    loop {
        let mut changed = false;
        for p in &grammar.productions {
            for (i, sym) in p.body.iter().enumerate() {
                if !grammar.non_terminals.contains(sym) {
                    continue;
                }
                let beta = &p.body[i + 1..];
                let (beta_first, beta_nullable) = first_of_sequence(beta, first);

                let entry = follow.entry(sym.clone()).or_default();
                for t in &beta_first {
                    changed |= entry.insert(t.clone());
                }

                if beta_nullable {
                    let head_follow: Vec<String> = follow
                        .get(&p.head)
                        .cloned()
                        .unwrap_or_default()
                        .into_iter()
                        .collect();
                    let entry = follow.entry(sym.clone()).or_default();
                    for t in head_follow {
                        changed |= entry.insert(t);
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn expr_grammar() -> Grammar {
        Grammar::parse(
            "E ::= E + T\n\
             E ::= T\n\
             T ::= T * F\n\
             T ::= F\n\
             F ::= ( E )\n\
             F ::= id\n",
        )
        .unwrap()
    }

    #[test]
    fn first_of_expression_grammar() {
        let g = expr_grammar();
        let first = compute_first(&g);
        assert_eq!(
            first["F"],
            ["(", "id"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(first["T"], first["F"]);
        assert_eq!(first["E"], first["F"]);
    }

    #[test]
    fn follow_of_expression_grammar() {
        let g = expr_grammar();
        let first = compute_first(&g);
        let follow = compute_follow(&g, &first);
        assert!(follow["E"].contains("$"));
        assert!(follow["E"].contains(")"));
        assert!(follow["E"].contains("+"));
        assert!(follow["T"].contains("*"));
        assert!(follow["F"].contains("*"));
    }

    #[test]
    fn fixed_point_is_idempotent() {
        let g = expr_grammar();
        let first1 = compute_first(&g);
        let first2 = compute_first(&g);
        assert_eq!(first1, first2);
        let follow1 = compute_follow(&g, &first1);
        let follow2 = compute_follow(&g, &first2);
        assert_eq!(follow1, follow2);
    }
}
