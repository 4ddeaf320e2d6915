//! # objj-brackets
//!
//! Places the opening `[` for an auto-inserted `]` in Objective-J source lines.
//!
//! ```text
//! str doSomethingWith:arg|    ->  [str doSomethingWith:arg]|
//! a + b|                      ->  a + [b |]
//! ```
//!
//! See the [objj] module for the pipeline.

pub mod objj;

pub use objj::error::{Error, Result};
pub use objj::resolving::{resolve, Resolution};
pub use objj::snippet::balance;
pub use objj::token::{Token, TokenKind};
