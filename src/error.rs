//! Error types for scanning and extraction.
//!
//! None of these abort an extraction run: the extractor reports them through
//! the injected log and moves on to the next file.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons the scanner stops tracking declarations in a file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("unbalanced closing brace at line {line}")]
    UnbalancedBrace { line: usize },

    #[error("{open} unclosed brace(s) at end of input")]
    UnclosedBraces { open: usize },

    #[error("unterminated {what} starting at line {line}")]
    Unterminated { what: &'static str, line: usize },
}

/// Per-file failures during extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 (invalid byte at offset {offset})")]
    Decode { path: PathBuf, offset: usize },
}
