//! Lexing
//!
//!     Turns a line of Objective-J into typed tokens. The pieces are:
//!
//!         1. [rules](rules): the ordered rule cascade that decides the kind of every
//!            piece of text. The default rule set lives here too.
//!         2. [source](source): pull-based character sources feeding the tokenizer.
//!         3. [tokenizer](tokenizer): the streaming tokenizer that buffers input and
//!            releases tokens lazily.
//!         4. [detokenizer](detokenizer): the inverse, used for round-trip checks.
//!
//!     Whitespace and terminator tokens are produced like any other token, so the token
//!     stream covers every character of the input. They carry no meaning for bracket
//!     resolution and [significant_tokens] drops them.

pub mod detokenizer;
pub mod rules;
pub mod source;
pub mod tokenizer;

pub use detokenizer::detokenize;
pub use rules::{objective_j_rules, Handler, Rule, RuleSet};
pub use source::{CharSource, ChunkedSource, StrSource};
pub use tokenizer::Tokenizer;

use crate::objj::token::Token;

/// Tokenize a complete line with the default rules, keeping every token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(objective_j_rules(), StrSource::new(source)).collect()
}

/// Tokenize a complete line with the default rules, dropping whitespace and terminators.
pub fn significant_tokens(source: &str) -> Vec<Token> {
    Tokenizer::new(objective_j_rules(), StrSource::new(source))
        .filter(|token| !token.kind.is_insignificant())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objj::token::TokenKind;

    #[test]
    fn test_significant_tokens_drop_whitespace_and_newlines() {
        let tokens = significant_tokens("foo bar\n");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Identifier, "foo", 0),
                Token::new(TokenKind::Identifier, "bar", 4),
            ]
        );
    }

    #[test]
    fn test_semicolon_is_an_operator() {
        let tokens = significant_tokens("foo bar];");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::GenericOperator));
        assert_eq!(tokens.len(), 4);
    }
}
