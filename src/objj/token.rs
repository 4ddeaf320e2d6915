//! Token definitions for Objective-J source lines
//!
//! Tokens are produced by the rule cascade in [lexing](crate::objj::lexing) and consumed
//! backward by the [resolver](crate::objj::resolving). A token carries its kind, the exact
//! text it was matched from, and the character offset where that text starts in the line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a lexical token.
///
/// The declaration order is also the priority order of the default rule set: a piece of
/// text claimed by an earlier kind is never offered to a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// The `return` keyword
    Return,
    /// The `nil` keyword
    NilLiteral,
    /// `if`, `while`, `for` or `do` together with the following `(`
    ControlKeyword,
    /// A double quoted string, escapes included
    StringLiteral,
    /// A keyword part of a selector: an identifier directly followed by `:`
    Selector,
    Identifier,
    /// `.` or `->`
    BindOperator,
    /// `++` or `--`
    PostIncrement,
    AtSign,
    Star,
    /// `)`, `]` or `}`
    CloseBracket,
    /// `(`, `[` or `{`
    OpenBracket,
    GenericOperator,
    Terminator,
    Whitespace,
    /// Anything no other rule claimed
    Unknown,
}

impl TokenKind {
    /// Every kind, in default priority order.
    pub const ALL: [TokenKind; 16] = [
        TokenKind::Return,
        TokenKind::NilLiteral,
        TokenKind::ControlKeyword,
        TokenKind::StringLiteral,
        TokenKind::Selector,
        TokenKind::Identifier,
        TokenKind::BindOperator,
        TokenKind::PostIncrement,
        TokenKind::AtSign,
        TokenKind::Star,
        TokenKind::CloseBracket,
        TokenKind::OpenBracket,
        TokenKind::GenericOperator,
        TokenKind::Terminator,
        TokenKind::Whitespace,
        TokenKind::Unknown,
    ];

    /// Whitespace and terminators only exist as a by-product of matching and are
    /// dropped before resolution.
    pub fn is_insignificant(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Terminator)
    }

    /// Kinds that open an expression: a receiver can never extend to the left of one.
    pub fn opens_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::GenericOperator
                | TokenKind::Selector
                | TokenKind::OpenBracket
                | TokenKind::Return
                | TokenKind::ControlKeyword
        )
    }

    /// Kinds that look like the end of a complete expression.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseBracket
                | TokenKind::PostIncrement
                | TokenKind::StringLiteral
                | TokenKind::Identifier
        )
    }

    /// Snake case name, as used in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Return => "return",
            TokenKind::NilLiteral => "nil_literal",
            TokenKind::ControlKeyword => "control_keyword",
            TokenKind::StringLiteral => "string_literal",
            TokenKind::Selector => "selector",
            TokenKind::Identifier => "identifier",
            TokenKind::BindOperator => "bind_operator",
            TokenKind::PostIncrement => "post_increment",
            TokenKind::AtSign => "at_sign",
            TokenKind::Star => "star",
            TokenKind::CloseBracket => "close_bracket",
            TokenKind::OpenBracket => "open_bracket",
            TokenKind::GenericOperator => "generic_operator",
            TokenKind::Terminator => "terminator",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified piece of a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Character offset of the first character of `text` in the line
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Number of characters covered by this token.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} {:?}", self.kind, self.position, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insignificant_kinds() {
        assert!(TokenKind::Whitespace.is_insignificant());
        assert!(TokenKind::Terminator.is_insignificant());
        assert!(!TokenKind::Identifier.is_insignificant());
        assert!(!TokenKind::GenericOperator.is_insignificant());
    }

    #[test]
    fn test_expression_openers() {
        assert!(TokenKind::GenericOperator.opens_expression());
        assert!(TokenKind::Selector.opens_expression());
        assert!(TokenKind::OpenBracket.opens_expression());
        assert!(TokenKind::Return.opens_expression());
        assert!(TokenKind::ControlKeyword.opens_expression());
        assert!(!TokenKind::Star.opens_expression());
        assert!(!TokenKind::Identifier.opens_expression());
    }

    #[test]
    fn test_expression_endings() {
        assert!(TokenKind::CloseBracket.ends_expression());
        assert!(TokenKind::PostIncrement.ends_expression());
        assert!(TokenKind::StringLiteral.ends_expression());
        assert!(TokenKind::Identifier.ends_expression());
        assert!(!TokenKind::Selector.ends_expression());
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::Selector, "withObject:", 4);
        assert_eq!(token.to_string(), "selector@4 \"withObject:\"");
    }

    #[test]
    fn test_serialized_kind_matches_name() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(Token::new(TokenKind::StringLiteral, "\"héllo\"", 0).char_len(), 7);
    }
}
