//! mixfix: pins two hex packages in a mix.lock back to older releases
//!
//! This library exposes the rewriter for use in integration and property tests.
//! The main binary is at src/main.rs.

pub mod cli;
pub mod diff_formatter;
pub mod error_helpers;
pub mod file_processor;
pub mod logger;
pub mod rules;

pub use file_processor::{rewrite, rewrite_content, FileDiff, LineChange, LineRewriter, LOCK_FILE};
pub use rules::{Rule, RULES};
