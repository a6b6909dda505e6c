use super::token::{Tok, TokKind};
use crate::error::RegexSyntaxError;

fn precedence(kind: TokKind) -> u8 {
    match kind {
        TokKind::Union => 1,
        TokKind::Concat => 2,
        TokKind::Star | TokKind::Plus | TokKind::Question => 3,
        _ => 0,
    }
}

/// Shunting-yard: infix token stream (with explicit concat markers already
/// spliced in) to postfix.
pub(crate) fn to_postfix(tokens: &[Tok], pattern: &str) -> Result<Vec<Tok>, RegexSyntaxError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for &tok in tokens {
        match tok.kind {
            TokKind::Literal(_) => output.push(tok),
            TokKind::LParen => ops.push(tok),
            TokKind::RParen => loop {
                match ops.pop() {
                    Some(op) if op.kind == TokKind::LParen => break,
                    Some(op) => output.push(op),
                    None => {
                        return Err(RegexSyntaxError::new(
                            pattern,
                            tok.offset,
                            "unmatched ')'",
                        ))
                    }
                }
            },
            TokKind::Union | TokKind::Concat | TokKind::Star | TokKind::Plus | TokKind::Question => {
                let kind = tok.kind;
                while let Some(&top) = ops.last() {
                    if top.kind != TokKind::LParen && precedence(top.kind) >= precedence(kind) {
                        output.push(ops.pop().expect("just confirmed non-empty via ops.last()"));
                    } else {
                        break;
                    }
                }
                ops.push(tok);
            }
            TokKind::EndMarker => unreachable!("EndMarker is appended after postfix conversion"),
        }
    }

    while let Some(op) = ops.pop() {
        if op.kind == TokKind::LParen {
            return Err(RegexSyntaxError::new(pattern, op.offset, "unmatched '('"));
        }
        output.push(op);
    }

    Ok(output)
}
