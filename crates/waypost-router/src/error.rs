//! Error types for waypost-router

use thiserror::Error;

/// A route spec that could not be compiled into a [`Pattern`](crate::Pattern).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Blank spec
    #[error("empty pattern")]
    Empty,

    /// Only one field, or no `/` in the second field
    #[error("missing path: expected \"METHOD [HOST]/PATH\"")]
    MissingPath,

    /// More than two whitespace-separated fields
    #[error("unexpected field {0:?} after path")]
    TrailingField(String),

    /// Method contains characters outside the HTTP token set
    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    /// Wildcards are only allowed in the path
    #[error("host {0:?} contains a wildcard")]
    WildcardInHost(String),

    /// `//` inside a path
    #[error("empty path segment")]
    EmptySegment,

    /// Unbalanced braces, or a wildcard sharing a segment with literal text
    #[error("malformed wildcard segment {0:?}")]
    MalformedWildcard(String),

    /// Wildcard name is not an identifier
    #[error("invalid wildcard name {0:?}")]
    InvalidName(String),

    /// `{name...}` followed by more segments
    #[error("catch-all {{{0}...}} must be the final segment")]
    CatchAllNotLast(String),

    /// `{$}` followed by more segments
    #[error("{{$}} must be the final segment")]
    AnchorNotLast,

    /// Same wildcard name bound twice
    #[error("duplicate wildcard name {0:?}")]
    DuplicateName(String),
}

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteErrorKind {
    /// The pattern failed to compile
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// No handler was supplied
    #[error("handler cannot be empty")]
    MissingHandler,

    /// Another route already ends on the same trie node
    #[error("conflicts with registered route {existing:?}")]
    Conflict { existing: String },
}

/// Registration failure, tagged with the pattern string that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid route {pattern:?}: {kind}")]
pub struct RouteError {
    pattern: String,
    kind: RouteErrorKind,
}

impl RouteError {
    pub(crate) fn new(pattern: &str, kind: impl Into<RouteErrorKind>) -> Self {
        Self {
            pattern: pattern.to_string(),
            kind: kind.into(),
        }
    }

    /// The pattern string passed to `handle`
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> &RouteErrorKind {
        &self.kind
    }

    /// Human-readable reason, without the pattern prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
