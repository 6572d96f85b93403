//! Compact `<count><denomination>` notation shared by pools and symbol sets.
//!
//! A token is an optional signed count followed by a single denomination
//! letter; a missing count means one. Whitespace, `,` and `+` separate
//! tokens and are otherwise ignored, so `2a1p`, `aap` and `2a + p` all
//! describe the same thing.

use crate::error::{DiceError, EngineResult};

/// Split notation into `(count, denomination)` pairs in input order.
pub(crate) fn tokens(input: &str) -> EngineResult<Vec<(i64, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();

    for c in input.chars() {
        match c {
            '0'..='9' => digits.push(c),
            '-' if digits.is_empty() => digits.push(c),
            c if c.is_whitespace() || c == ',' || c == '+' => {
                if !digits.is_empty() {
                    return Err(DiceError::InvalidNotation(format!(
                        "count '{digits}' in '{input}' has no denomination"
                    )));
                }
            }
            c if c.is_ascii_alphabetic() => {
                let count = match digits.as_str() {
                    "" => 1,
                    "-" => -1,
                    n => n.parse::<i64>().map_err(|_| {
                        DiceError::InvalidNotation(format!("count '{n}' in '{input}' is too large"))
                    })?,
                };
                out.push((count, c.to_ascii_lowercase()));
                digits.clear();
            }
            other => {
                return Err(DiceError::InvalidNotation(format!(
                    "unexpected character '{other}' in '{input}'"
                )));
            }
        }
    }

    if !digits.is_empty() {
        return Err(DiceError::InvalidNotation(format!(
            "trailing count '{digits}' in '{input}' has no denomination"
        )));
    }

    Ok(out)
}
