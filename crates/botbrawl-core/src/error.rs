//! Error types for the botbrawl core.
//!
//! The simulation itself never fails: bad catalog ids and malformed script
//! lines degrade to defaults. Errors only surface where a caller hands us
//! data we cannot interpret (custom catalogs) or misuses the interactive
//! session.

use thiserror::Error;

/// A single line-numbered problem found while parsing a strategy script.
///
/// Parsing is non-fatal: each error drops only the offending rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Line {line}: {message}")]
pub struct ScriptError {
    /// 1-based line number in the original script text.
    pub line: usize,
    /// Human readable description.
    pub message: String,
}

impl ScriptError {
    /// Creates a new script error for the given line.
    #[must_use]
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Failure to load a custom catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON document could not be decoded.
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    /// An entry decoded but carries a value the engine cannot use.
    #[error("{table} entry '{id}': {reason}")]
    InvalidEntry {
        /// Which table the entry belongs to.
        table: &'static str,
        /// Entry id.
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Misuse of the interactive [`Session`](crate::session::Session).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Fighters can only be added before the first tick.
    #[error("cannot add fighter '{0}' after the match has started")]
    AlreadyStarted(String),
    /// Fighter ids must be unique within a match.
    #[error("a fighter with id '{0}' is already in the match")]
    DuplicateId(String),
    /// A match holds exactly two fighters.
    #[error("match already has {0} fighters")]
    RosterFull(usize),
}
