//! Detokenizer
//!
//! Converts a token stream back into source text. Tokens keep the exact text they were
//! matched from, so detokenizing the full output of the tokenizer (whitespace and
//! terminators included) gives back the original input. This is what the round-trip
//! tests rely on.

use crate::objj::token::Token;

/// Concatenate the text of `tokens` in order.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}
