//! Property-based tests for the tokenizer and the bracket matcher
//!
//! These check the invariants the resolver relies on: the token stream covers the input
//! exactly, chunked input tokenizes to the same text, keywords keep their priority, and
//! balanced bracket groups are always matched.

use objj_brackets::objj::lexing::{
    detokenize, objective_j_rules, significant_tokens, tokenize, ChunkedSource, Tokenizer,
};
use objj_brackets::objj::resolving::Resolver;
use objj_brackets::objj::token::TokenKind;
use proptest::prelude::*;

/// Lines made of the characters Objective-J code is made of, plus a few oddities
fn line_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ :;.,\\[\\](){}*+\\-@\"\\\\=<>!?&|^~%/#$\té\n]{0,60}"
}

/// Nested bracket groups around plain identifiers
fn balanced_strategy() -> impl Strategy<Value = String> {
    let leaf = "[xyz][0-9]{0,2}";
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} {}", a, b)),
            inner.clone().prop_map(|s| format!("({})", s)),
            inner.clone().prop_map(|s| format!("[{}]", s)),
            inner.prop_map(|s| format!("{{{}}}", s)),
        ]
    })
}

proptest! {
    #[test]
    fn tokens_reconstruct_the_input(line in line_strategy()) {
        prop_assert_eq!(detokenize(&tokenize(&line)), line);
    }

    #[test]
    fn positions_are_character_offsets(line in line_strategy()) {
        let mut expected = 0;
        for token in tokenize(&line) {
            prop_assert_eq!(token.position, expected);
            prop_assert!(!token.text.is_empty());
            expected += token.char_len();
        }
        prop_assert_eq!(expected, line.chars().count());
    }

    #[test]
    fn chunking_does_not_change_the_text(line in line_strategy(), size in 1usize..8) {
        let tokens: Vec<_> =
            Tokenizer::new(objective_j_rules(), ChunkedSource::new(&line, size)).collect();
        prop_assert_eq!(detokenize(&tokens), line);
    }

    #[test]
    fn chunking_single_lines_gives_identical_tokens(
        line in "[a-zA-Z0-9_ :;.\\[\\]()*+\\-@\"=]{0,40}",
        size in 1usize..8,
    ) {
        let chunked: Vec<_> =
            Tokenizer::new(objective_j_rules(), ChunkedSource::new(&line, size)).collect();
        prop_assert_eq!(chunked, tokenize(&line));
    }

    #[test]
    fn keywords_keep_priority(
        words in prop::collection::vec(
            prop_oneof![Just("return".to_string()), Just("nil".to_string()), "[a-z]{1,8}"],
            1..8,
        )
    ) {
        let line = words.join(" ");
        let tokens = significant_tokens(&line);
        prop_assert_eq!(tokens.len(), words.len());
        for (token, word) in tokens.iter().zip(&words) {
            let expected = match word.as_str() {
                "return" => TokenKind::Return,
                "nil" => TokenKind::NilLiteral,
                _ => TokenKind::Identifier,
            };
            prop_assert_eq!(token.kind, expected);
            prop_assert_eq!(&token.text, word);
        }
    }

    #[test]
    fn balanced_groups_are_matched(body in balanced_strategy()) {
        let line = format!("[{}]", body);
        let tokens = significant_tokens(&line);
        let (closing, rest) = tokens.split_last().expect("line has tokens");
        prop_assert_eq!(closing.kind, TokenKind::CloseBracket);
        prop_assert_eq!(Resolver::new(rest).match_bracket("]"), Some(0));
    }

    #[test]
    fn missing_opener_is_unmatched(body in balanced_strategy()) {
        let line = format!("{}]", body);
        let tokens = significant_tokens(&line);
        let (_, rest) = tokens.split_last().expect("line has tokens");
        prop_assert_eq!(Resolver::new(rest).match_bracket("]"), None);
    }

    #[test]
    fn plain_identifier_starts_at_its_own_position(
        indent in " {0,4}",
        name in "[A-Za-z_][A-Za-z0-9_]{0,10}",
    ) {
        prop_assume!(name != "return" && name != "nil");
        let line = format!("{}{}", indent, name);
        let tokens = significant_tokens(&line);
        prop_assert_eq!(Resolver::new(&tokens).find_object_start(), Some(indent.len()));
    }
}
