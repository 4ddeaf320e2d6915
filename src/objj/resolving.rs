//! Bracket-scope resolution
//!
//!     Given the significant tokens from the start of a line up to the caret, find where
//!     the `[` matching a freshly typed `]` has to go, and whether the bracketed
//!     expression is a message send.
//!
//!     The line is usually incomplete at the caret, so nothing is parsed forward. Instead
//!     the [Resolver] walks the tokens backward from the caret with a cursor, skipping
//!     balanced bracket groups by depth counting, until it reaches a token that cannot be
//!     part of the receiver expression.
//!
//! Message Detection
//!
//!     A message send is recognized by its keywords: identifiers directly followed by a
//!     colon (`withObject:`). Scanning left from the caret, the first keyword found
//!     outside of any bracket group starts the probe; further keywords to its left extend
//!     the selector (`setObject:forKey:`) without moving the cursor. The probe succeeds
//!     once no keywords remain, and leaves the cursor just before the keyword closest to
//!     the caret, so the object scan sees that keyword's argument next. An unmatched
//!     opening bracket ends the probe in failure and the cursor goes back to where it was.
//!
//! Object Start
//!
//!     The object scan pops tokens until the next one opens an expression (an operator,
//!     a keyword, an opening bracket, `return` or a control keyword). Every popped token
//!     moves the boundary to its own position, a closing bracket moves it to its matching
//!     opener, `nil` clears it, and a `*` is only kept as a prefix when nothing but an
//!     expression opener precedes it.

use crate::objj::token::{Token, TokenKind};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Where to put the `[`, and how the bracket pair should be treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Character offset at which `[` goes; `None` when there is nothing to wrap
    pub insertion: Option<usize>,
    pub is_message: bool,
    /// Keywords of the detected message, left to right (`setObject:forKey:`)
    pub selector: Option<String>,
}

/// Outcome of a backward scan for a selector keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorScan {
    /// Index of the keyword token
    Found(usize),
    /// Ran out of tokens without seeing a keyword
    Exhausted,
    /// Hit an opening bracket, or a closing bracket with no opener
    Unmatched,
}

/// The opening bracket paired with `closing`.
pub fn partner(closing: &str) -> Option<&'static str> {
    match closing {
        "]" => Some("["),
        ")" => Some("("),
        "}" => Some("{"),
        _ => None,
    }
}

/// Resolve a token list in one go.
pub fn resolve(tokens: &[Token]) -> Resolution {
    Resolver::new(tokens).resolve()
}

/// Backward scanner over a token slice.
///
/// The tokens in `tokens[..cursor]` are still unconsumed; the token at `cursor - 1` is
/// the one closest to the caret.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            cursor: tokens.len(),
        }
    }

    /// Tokens not consumed yet, in source order.
    pub fn remaining(&self) -> &'a [Token] {
        let tokens: &'a [Token] = self.tokens;
        &tokens[..self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn tail(&self) -> Option<&'a Token> {
        let tokens: &'a [Token] = self.tokens;
        self.cursor.checked_sub(1).map(|index| &tokens[index])
    }

    fn pop(&mut self) -> Option<&'a Token> {
        let token = self.tail()?;
        self.cursor -= 1;
        Some(token)
    }

    pub fn resolve(&mut self) -> Resolution {
        let Some(last) = self.pop() else {
            return Resolution {
                insertion: None,
                is_message: true,
                selector: None,
            };
        };

        let trails_expression = last.kind == TokenKind::Identifier
            && self.tail().is_some_and(|tail| tail.kind.ends_expression());

        let selector = if trails_expression {
            trace!("{} trails a complete expression", last);
            None
        } else {
            self.cursor += 1;
            self.has_message_send()
        };
        let is_message = trails_expression || selector.is_some();
        let insertion = self.find_object_start();

        debug!(
            "resolved insertion {:?}, message {} ({:?})",
            insertion, is_message, selector
        );

        Resolution {
            insertion,
            is_message,
            selector,
        }
    }

    /// Probe for a keyword message ending at the cursor.
    ///
    /// On success returns the selector and leaves the cursor just before the keyword
    /// closest to the caret. Keywords further left only extend the selector text. On
    /// failure the cursor is restored.
    pub fn has_message_send(&mut self) -> Option<String> {
        let saved = self.cursor;

        let SelectorScan::Found(first) = self.selector_scan() else {
            self.cursor = saved;
            return None;
        };
        let mut selector = self.tokens[first].text.clone();
        let committed = self.cursor;

        // A message needs a receiver to the left of its leftmost keyword.
        while self.cursor > 0 {
            match self.selector_scan() {
                SelectorScan::Found(index) => {
                    selector.insert_str(0, &self.tokens[index].text);
                }
                SelectorScan::Exhausted => {
                    self.cursor = committed;
                    return Some(selector);
                }
                SelectorScan::Unmatched => break,
            }
        }

        self.cursor = saved;
        None
    }

    /// Pop tokens until a selector keyword turns up, skipping balanced bracket groups.
    pub fn selector_scan(&mut self) -> SelectorScan {
        while let Some(token) = self.pop() {
            match token.kind {
                TokenKind::Selector => return SelectorScan::Found(self.cursor),
                TokenKind::CloseBracket => {
                    if self.match_bracket(&token.text).is_none() {
                        return SelectorScan::Unmatched;
                    }
                }
                TokenKind::OpenBracket => return SelectorScan::Unmatched,
                _ => {}
            }
        }
        SelectorScan::Exhausted
    }

    /// Pop tokens up to the opener matching `closing`, which has already been popped.
    ///
    /// Returns the opener's position, or `None` if the tokens run out first.
    pub fn match_bracket(&mut self, closing: &str) -> Option<usize> {
        let opener = partner(closing);
        let mut depth = 1usize;

        while let Some(token) = self.pop() {
            if token.text == closing {
                depth += 1;
            } else if Some(token.text.as_str()) == opener {
                depth -= 1;
                if depth == 0 {
                    return Some(token.position);
                }
            }
        }
        None
    }

    /// Pop the receiver expression and return the position where it starts.
    pub fn find_object_start(&mut self) -> Option<usize> {
        let mut boundary = None;

        while let Some(tail) = self.tail() {
            if tail.kind.opens_expression() {
                break;
            }
            self.cursor -= 1;

            match tail.kind {
                TokenKind::CloseBracket => {
                    if let Some(opener) = self.match_bracket(&tail.text) {
                        boundary = Some(opener);
                    }
                }
                TokenKind::Star => {
                    let (star_boundary, ate) = self.eat_star(boundary, tail.position);
                    if !ate {
                        return star_boundary;
                    }
                    boundary = star_boundary;
                }
                TokenKind::NilLiteral => boundary = None,
                _ => boundary = Some(tail.position),
            }
        }

        boundary
    }

    /// A `*` is a prefix of the receiver only if an expression opener, another `*`, or
    /// the start of the line precedes it. Otherwise it is a binary operator and the
    /// receiver ends at `previous`.
    fn eat_star(&self, previous: Option<usize>, star: usize) -> (Option<usize>, bool) {
        match self.tail() {
            Some(tail) if !tail.kind.opens_expression() && tail.kind != TokenKind::Star => {
                (previous, false)
            }
            _ => (Some(star), true),
        }
    }
}
