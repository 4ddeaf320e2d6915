//! Error type for the fallible edges of the crate
//!
//! The tokenizer and resolver themselves never fail; errors only come from building
//! rule sets, loading configuration and reading the editor environment.

use crate::objj::token::TokenKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A rule pattern did not compile
    #[error("invalid pattern for {kind} rule: {source}")]
    InvalidPattern {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An editor variable that the caller relied on is not set
    #[error("environment variable {0} is not set")]
    MissingVariable(String),

    #[error("invalid caret index {0:?}")]
    InvalidLineIndex(String),
}

pub type Result<T> = std::result::Result<T, Error>;
