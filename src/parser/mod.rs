//! SLR(1) parser generation and the table-driven shift/reduce parse driver.
mod driver;
mod first_follow;
mod generator;
mod lr0;

pub use driver::{Action, Parser};
pub use generator::ParserGenerator;
pub use lr0::Item;

use crate::error::ParserBuildError;
use crate::grammar::Grammar;

/// Parse grammar source text and synthesize its SLR(1) parse tables in one
/// step.
pub fn build_parser(grammar_text: &str) -> Result<Parser, ParserBuildError> {
    let grammar = Grammar::parse(grammar_text)?;
    let parser = ParserGenerator::generate(&grammar)?;
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;

    fn token(class: &str) -> Token {
        Token {
            class: class.to_string(),
            lexeme: class.to_string(),
            offset: 0,
        }
    }

    #[test]
    fn accepts_balanced_bracket_sentence() {
        let parser = build_parser("S ::= a S b\nS ::= a b\n").unwrap();
        let tokens = vec![token("a"), token("a"), token("b"), token("b")];
        assert!(parser.parse(&tokens).is_ok());
    }

    #[test]
    fn rejects_unbalanced_bracket_sentence() {
        let parser = build_parser("S ::= a S b\nS ::= a b\n").unwrap();
        let tokens = vec![token("a"), token("a"), token("b")];
        assert!(parser.parse(&tokens).is_err());
    }

    fn expr_parser() -> Parser {
        build_parser(
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
    fn expression_grammar_accepts_id_plus_id_times_id() {
        let parser = expr_parser();
        let tokens = vec![
            token("id"),
            token("+"),
            token("id"),
            token("*"),
            token("id"),
        ];
        assert!(parser.parse(&tokens).is_ok());
    }

    #[test]
    fn expression_grammar_rejects_trailing_plus() {
        let parser = expr_parser();
        let tokens = vec![token("id"), token("+")];
        let err = parser.parse(&tokens).unwrap_err();
        assert_eq!(err.token, "$");
    }

    #[test]
    fn expression_grammar_accepts_parenthesized_id() {
        let parser = expr_parser();
        let tokens = vec![token("("), token("id"), token(")")];
        assert!(parser.parse(&tokens).is_ok());
    }

    #[test]
    fn expression_grammar_rejects_two_ids_in_a_row() {
        let parser = expr_parser();
        let tokens = vec![token("id"), token("id")];
        let err = parser.parse(&tokens).unwrap_err();
        assert_eq!(err.token, "id");
    }
}
