//! Bracket balancing for Objective-J
//!
//!     When `]` is typed at the end of a message send, the `[` that opens it usually is
//!     not there yet. This module works out where it belongs.
//!
//!         1. [lexing]: rule-cascade tokenizer turning the line into typed tokens.
//!         2. [resolving]: backward scan from the caret that finds where the receiver
//!            starts and whether the bracket pair is a message send.
//!         3. [snippet]: the editor-facing driver that splices `[`, `]` and the caret
//!            marker into the line.
//!
//!     [config] loads the snippet and editor settings, [error] holds the error type of
//!     the fallible edges. The tokenizer and resolver never fail.

pub mod config;
pub mod error;
pub mod lexing;
pub mod resolving;
pub mod snippet;
pub mod token;
