//! Classification rules and the rule cascade
//!
//! A [`RuleSet`] is an ordered list of named regex rules. Classification is a cascade:
//! the first rule is applied across a whole segment of text, the plain text left between
//! its matches is handed to the second rule, and so on down the list. Priority is
//! therefore expressed purely by registration order, and no rule ever sees text an
//! earlier rule already claimed.
//!
//! ```text
//! Text:    "return [self foo:1];"
//! Rule 1:  return          -> Return("return"), rest " [self foo:1];" goes to rule 2
//! ...
//! Rule 5:  selector        -> Selector("foo:")
//! ```
//!
//! Text that no rule claims is emitted as [`TokenKind::Unknown`].

use crate::objj::error::{Error, Result};
use crate::objj::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Post-processes a match into the kind and text of the emitted token.
pub type Handler = Arc<dyn Fn(TokenKind, &str) -> (TokenKind, String) + Send + Sync>;

/// Default Objective-J rules, in priority order
const OBJECTIVE_J_PATTERNS: &[(TokenKind, &str)] = &[
    (TokenKind::Return, r"\breturn\b"),
    (TokenKind::NilLiteral, r"\bnil\b"),
    (TokenKind::ControlKeyword, r"\b(?:if|while|for|do)\s*\("),
    (TokenKind::StringLiteral, r#""(?:\\.|[^"\\])*""#),
    (TokenKind::Selector, r"\b[A-Za-z_0-9]+:"),
    (TokenKind::Identifier, r"\b[A-Za-z_0-9]+\b"),
    (TokenKind::BindOperator, r"->|\."),
    (TokenKind::PostIncrement, r"\+\+|--"),
    (TokenKind::AtSign, r"@"),
    (TokenKind::Star, r"\*"),
    (TokenKind::CloseBracket, r"[)\]}]"),
    (TokenKind::OpenBracket, r"[(\[{]"),
    (TokenKind::GenericOperator, r"[&\-+/=%!:,?;<>|~^]"),
    (TokenKind::Terminator, r";\n*|\n+"),
    (TokenKind::Whitespace, r"\s+"),
    (TokenKind::Unknown, r"(?s:.)"),
];

static OBJECTIVE_J_RULES: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    Arc::new(
        RuleSet::from_patterns(OBJECTIVE_J_PATTERNS.iter().copied())
            .expect("built-in Objective-J patterns compile"),
    )
});

/// The shared default rule set for Objective-J lines.
pub fn objective_j_rules() -> Arc<RuleSet> {
    Arc::clone(&OBJECTIVE_J_RULES)
}

/// A single named classification rule
#[derive(Clone)]
pub struct Rule {
    kind: TokenKind,
    regex: Regex,
    handler: Option<Handler>,
}

impl Rule {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    fn apply(&self, matched: &str) -> (TokenKind, String) {
        match &self.handler {
            Some(handler) => handler(self.kind, matched),
            None => (self.kind, matched.to_string()),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern())
            .field("custom_handler", &self.handler.is_some())
            .finish()
    }
}

/// Ordered list of rules; earlier rules claim text first.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set. Everything classified by it is [`TokenKind::Unknown`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from `(kind, pattern)` pairs, keeping their order.
    pub fn from_patterns<'a, I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TokenKind, &'a str)>,
    {
        patterns
            .into_iter()
            .try_fold(Self::new(), |rules, (kind, pattern)| {
                rules.add_rule(kind, pattern)
            })
    }

    /// Register a rule that emits its matches unchanged.
    pub fn add_rule(mut self, kind: TokenKind, pattern: &str) -> Result<Self> {
        let regex = compile(kind, pattern)?;
        self.rules.push(Rule {
            kind,
            regex,
            handler: None,
        });
        Ok(self)
    }

    /// Register a rule whose matches are passed through `handler` before being emitted.
    pub fn add_rule_with<F>(mut self, kind: TokenKind, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(TokenKind, &str) -> (TokenKind, String) + Send + Sync + 'static,
    {
        let regex = compile(kind, pattern)?;
        self.rules.push(Rule {
            kind,
            regex,
            handler: Some(Arc::new(handler)),
        });
        Ok(self)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify a complete piece of text whose first character sits at `position`.
    pub fn classify(&self, text: &str, position: usize) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.cascade(text, position, 0, &mut tokens);
        tokens
    }

    fn cascade(&self, text: &str, position: usize, depth: usize, out: &mut Vec<Token>) {
        if text.is_empty() {
            return;
        }

        let Some(rule) = self.rules.get(depth) else {
            out.push(Token::new(TokenKind::Unknown, text, position));
            return;
        };

        let mut consumed = 0;
        let mut position = position;

        for found in rule.regex.find_iter(text) {
            if found.start() == found.end() {
                continue;
            }

            let gap = &text[consumed..found.start()];
            self.cascade(gap, position, depth + 1, out);
            position += gap.chars().count();

            let (kind, token_text) = rule.apply(found.as_str());
            out.push(Token::new(kind, token_text, position));
            position += found.as_str().chars().count();
            consumed = found.end();
        }

        self.cascade(&text[consumed..], position, depth + 1, out);
    }
}

fn compile(kind: TokenKind, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern { kind, source })
}
