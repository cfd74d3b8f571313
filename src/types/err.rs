/*!
Error types used throughout the library.

Following the teacher crate's convention, one top-level [FolError] wraps a per-subsystem error
enum, and each subsystem enum has a `From` impl into [FolError] so `?` composes across module
boundaries without manual mapping at every call site.
*/

use crate::ast::Span;
use std::fmt;

/// A union of the error kinds named in the error taxonomy.
#[derive(Clone, Debug, PartialEq)]
pub enum FolError {
    /// Failed to parse surface syntax into an AST.
    Parse(ParseError),

    /// A formula failed validation prior to use.
    Validation(String),

    /// Clausification could not complete within its node budget.
    ClausificationBlowup { budget: usize, reached: usize },

    /// Clausification failed for a reason other than blowup or timeout.
    ClausificationFailed(String),

    /// A wall-clock deadline was exceeded.
    Timeout,

    /// The inference counter was exhausted before a proof completed.
    InferenceLimitExceeded { limit: u64 },

    /// The clause set submitted to the Horn engine was not Horn.
    NonHorn,

    /// A goal contained a universally-quantified variable the Horn engine cannot handle.
    UniversalGoal,

    /// An engine was explicitly selected that cannot run the given input.
    CapabilityMismatch { engine: &'static str, needed: &'static str },

    /// A session's engine does not support retraction; the caller must rebuild.
    RetractionUnsupported,

    /// No session exists with the given id.
    SessionNotFound,

    /// The session manager is at its configured capacity.
    SessionLimit { max: usize },

    /// An unexpected internal error, carrying a short diagnostic message.
    EngineInternal(String),
}

impl fmt::Display for FolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolError::Parse(e) => write!(f, "parse error: {e}"),
            FolError::Validation(msg) => write!(f, "validation error: {msg}"),
            FolError::ClausificationBlowup { budget, reached } => {
                write!(f, "clausification exceeded node budget ({reached} > {budget})")
            }
            FolError::ClausificationFailed(msg) => write!(f, "clausification failed: {msg}"),
            FolError::Timeout => write!(f, "operation timed out"),
            FolError::InferenceLimitExceeded { limit } => {
                write!(f, "inference limit exceeded ({limit})")
            }
            FolError::NonHorn => write!(f, "clause set is not Horn"),
            FolError::UniversalGoal => write!(f, "goal contains a universally-quantified variable"),
            FolError::CapabilityMismatch { engine, needed } => {
                write!(f, "engine {engine} lacks capability {needed}")
            }
            FolError::RetractionUnsupported => write!(f, "this engine does not support retraction"),
            FolError::SessionNotFound => write!(f, "session not found"),
            FolError::SessionLimit { max } => write!(f, "session limit reached ({max})"),
            FolError::EngineInternal(msg) => write!(f, "internal engine error: {msg}"),
        }
    }
}

impl std::error::Error for FolError {}

/// Errors during lexing/parsing of surface syntax, carrying a position.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,

    /// The offending token's text, if any.
    pub token: Option<String>,

    /// Position of the offending token.
    pub span: Span,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(tok) => write!(
                f,
                "{} at {}:{} (near '{}')",
                self.message, self.span.line, self.span.col, tok
            ),
            None => write!(f, "{} at {}:{}", self.message, self.span.line, self.span.col),
        }
    }
}

impl From<ParseError> for FolError {
    fn from(e: ParseError) -> Self {
        FolError::Parse(e)
    }
}
