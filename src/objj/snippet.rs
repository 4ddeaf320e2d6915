//! Editor snippet generation
//!
//! The editor hands over the current line and the caret column right before it inserts
//! a `]`. [balance] replaces the whole line with a snippet that contains the `]`, the
//! matching `[` when one can be placed, and a caret marker telling the editor where the
//! caret ends up.
//!
//!     - Lines whose brackets are already unbalanced are left alone: the `]` is inserted
//!       at the caret and nothing else changes.
//!     - A message send is closed completely and the caret goes after the `]`.
//!     - A plain receiver gets a space and the caret inside the brackets, ready for the
//!       selector to be typed.
//!     - A `]` already sitting right after the caret is typed over instead of doubled
//!       when it already closes the expression.

use crate::objj::config::{EditorConfig, SnippetConfig};
use crate::objj::error::{Error, Result};
use crate::objj::lexing::significant_tokens;
use crate::objj::resolving::Resolver;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// String literals or square brackets
static BRACKET_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:\\.|[^"\\])*"|\[|\]"#).expect("bracket pattern compiles"));

/// Net count of `[` over `]` in `line`, ignoring brackets inside string literals.
pub fn bracket_depth(line: &str) -> i64 {
    BRACKET_MARKS
        .find_iter(line)
        .map(|found| match found.as_str() {
            "[" => 1,
            "]" => -1,
            _ => 0,
        })
        .sum()
}

/// Backslash-escape the characters that are special in editor snippets.
pub fn escape_snippet(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '$' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A line and caret column as reported by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub line: String,
    /// Caret column in characters; the `]` goes at this column
    pub line_index: usize,
}

impl Request {
    pub fn new(line: impl Into<String>, line_index: usize) -> Self {
        Self {
            line: line.into(),
            line_index,
        }
    }

    /// Read the request from the process environment.
    pub fn from_env(editor: &EditorConfig) -> Result<Self> {
        Self::from_lookup(editor, |name| std::env::var(name).ok())
    }

    /// Read the request through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(editor: &EditorConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let line = lookup(&editor.line_variable)
            .ok_or_else(|| Error::MissingVariable(editor.line_variable.clone()))?;
        let index = lookup(&editor.index_variable)
            .ok_or_else(|| Error::MissingVariable(editor.index_variable.clone()))?;
        let line_index = index
            .trim()
            .parse()
            .map_err(|_| Error::InvalidLineIndex(index.clone()))?;
        Ok(Self::new(line, line_index))
    }

    pub fn balance(&self, config: &SnippetConfig) -> String {
        balance(&self.line, self.line_index, config)
    }
}

/// Character-indexed view of the line used to assemble the snippet.
struct Splice<'a> {
    chars: Vec<char>,
    config: &'a SnippetConfig,
}

impl Splice<'_> {
    /// Text of `chars[start..end]`, clamped to the line.
    fn raw(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    fn text(&self, start: usize, end: usize) -> String {
        let raw = self.raw(start, end);
        if self.config.escape {
            escape_snippet(&raw)
        } else {
            raw
        }
    }

    /// `]` inserted at the caret, nothing else touched.
    fn close_at(&self, caret: usize) -> String {
        format!(
            "{}]{}{}",
            self.text(0, caret + 1),
            self.config.caret_marker,
            self.text(caret + 1, self.chars.len())
        )
    }

    /// `]` typed over the bracket already following the caret.
    fn overtype_at(&self, caret: usize) -> String {
        format!(
            "{}]{}{}",
            self.text(0, caret + 1),
            self.config.caret_marker,
            self.text(caret + 2, self.chars.len())
        )
    }

    /// `chars[start..=caret]` wrapped in brackets.
    fn wrap(&self, start: usize, caret: usize, is_message: bool) -> String {
        let marker = &self.config.caret_marker;
        let close = if is_message {
            format!("]{}", marker)
        } else if self.chars.get(caret).is_some_and(|c| c.is_whitespace()) {
            format!("{}]", marker)
        } else {
            format!(" {}]", marker)
        };
        format!(
            "{}[{}{}{}",
            self.text(0, start),
            self.text(start, caret + 1),
            close,
            self.text(caret + 1, self.chars.len())
        )
    }
}

/// Build the snippet that replaces `line` when `]` is typed at column `line_index`.
pub fn balance(line: &str, line_index: usize, config: &SnippetConfig) -> String {
    let splice = Splice {
        chars: line.chars().collect(),
        config,
    };

    let Some(caret) = line_index.checked_sub(1) else {
        return format!("]{}{}", config.caret_marker, splice.text(0, splice.chars.len()));
    };

    let depth = bracket_depth(line);
    if depth != 0 {
        debug!("line already unbalanced (depth {}), inserting plain ]", depth);
        return splice.close_at(caret);
    }

    let before_caret = splice.raw(0, caret + 1);
    let tokens = significant_tokens(&before_caret);
    if tokens.is_empty() {
        return splice.close_at(caret);
    }

    let mut resolver = Resolver::new(&tokens);
    let resolution = resolver.resolve();

    if splice.chars.get(caret + 1) == Some(&']') {
        let already_closed = resolution.insertion.is_none()
            || resolver
                .remaining()
                .last()
                .map_or(true, |token| token.text == "[");
        if already_closed {
            return splice.overtype_at(caret);
        }
    }

    match resolution.insertion {
        Some(start) if start <= caret => splice.wrap(start, caret, resolution.is_message),
        _ => splice.close_at(caret),
    }
}
