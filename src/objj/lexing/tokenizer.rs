//! Streaming tokenizer
//!
//! [`Tokenizer`] pulls chunks from a [`CharSource`], buffers them, and releases tokens
//! lazily. Text is only classified once it can no longer change: everything up to and
//! including the last newline in the buffer is released as soon as it arrives, and the
//! remainder is held back until more input or the end of input shows up. A match that
//! could still grow (an identifier split across two chunks, say) is never emitted early.

use crate::objj::lexing::rules::RuleSet;
use crate::objj::lexing::source::CharSource;
use crate::objj::token::Token;
use log::trace;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct Tokenizer<S> {
    rules: Arc<RuleSet>,
    source: S,
    /// Pulled but not yet classified text
    buffer: String,
    /// Character offset of the start of `buffer`
    offset: usize,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<S: CharSource> Tokenizer<S> {
    pub fn new(rules: Arc<RuleSet>, source: S) -> Self {
        Self {
            rules,
            source,
            buffer: String::new(),
            offset: 0,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Consume and return the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.fill();
        self.pending.pop_front()
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Option<&Token> {
        self.fill();
        self.pending.front()
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.pending.is_empty()
    }

    fn fill(&mut self) {
        while self.pending.is_empty() && !self.finished {
            match self.source.next_chunk() {
                Some(chunk) => {
                    self.buffer.push_str(&chunk);
                    self.release_complete_lines();
                }
                None => {
                    let rest = std::mem::take(&mut self.buffer);
                    self.release(&rest);
                    self.finished = true;
                    trace!("tokenizer finished at offset {}", self.offset);
                }
            }
        }
    }

    fn release_complete_lines(&mut self) {
        let Some(newline) = self.buffer.rfind('\n') else {
            return;
        };
        let rest = self.buffer.split_off(newline + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);
        self.release(&complete);
    }

    fn release(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.pending
            .extend(self.rules.classify(text, self.offset));
        self.offset += text.chars().count();
    }
}

impl<S: CharSource> Iterator for Tokenizer<S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objj::lexing::rules::objective_j_rules;
    use crate::objj::lexing::source::{ChunkedSource, StrSource};
    use crate::objj::token::TokenKind;

    fn collect(source: impl CharSource) -> Vec<Token> {
        Tokenizer::new(objective_j_rules(), source).collect()
    }

    #[test]
    fn test_whole_line() {
        let tokens = collect(StrSource::new("[self foo]"));
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::OpenBracket, "[", 0),
                Token::new(TokenKind::Identifier, "self", 1),
                Token::new(TokenKind::Whitespace, " ", 5),
                Token::new(TokenKind::Identifier, "foo", 6),
                Token::new(TokenKind::CloseBracket, "]", 9),
            ]
        );
    }

    #[test]
    fn test_chunks_do_not_split_tokens() {
        let line = "obj withObject:\"some string\" ++";
        let whole = collect(StrSource::new(line));
        for size in 1..6 {
            assert_eq!(collect(ChunkedSource::new(line, size)), whole, "chunk size {}", size);
        }
    }

    #[test]
    fn test_lines_are_released_before_end_of_input() {
        let mut chunks = vec![None, Some("second".to_string()), Some("first\n".to_string())];
        let mut tokenizer = Tokenizer::new(objective_j_rules(), move || chunks.pop().flatten());

        assert_eq!(
            tokenizer.next_token(),
            Some(Token::new(TokenKind::Identifier, "first", 0))
        );
        assert_eq!(
            tokenizer.next_token(),
            Some(Token::new(TokenKind::Terminator, "\n", 5))
        );
        assert_eq!(
            tokenizer.next_token(),
            Some(Token::new(TokenKind::Identifier, "second", 6))
        );
        assert_eq!(tokenizer.next_token(), None);
        assert!(tokenizer.is_finished());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new(objective_j_rules(), StrSource::new("a b"));
        let peeked = tokenizer.peek().cloned();
        assert_eq!(peeked, Some(Token::new(TokenKind::Identifier, "a", 0)));
        assert_eq!(tokenizer.next_token(), peeked);
        assert_eq!(tokenizer.peek().map(|t| t.kind), Some(TokenKind::Whitespace));
    }

    #[test]
    fn test_exhausted_tokenizer_keeps_returning_none() {
        let mut tokenizer = Tokenizer::new(objective_j_rules(), StrSource::new(""));
        assert_eq!(tokenizer.next_token(), None);
        assert_eq!(tokenizer.next_token(), None);
        assert!(tokenizer.peek().is_none());
    }
}
