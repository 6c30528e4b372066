//! Expected failures of name resolution.
//!
//! A query either resolves to exactly one entity or fails in one of two ways.
//! Both are ordinary values so callers can apply suppression policies (`!!`)
//! without inspecting message text.

use std::sync::Arc;

use thiserror::Error;

/// Outcome of a resolution: the resolved value or a typed failure.
pub type Resolution<T> = Result<T, ResolveFailure>;

/// Why a query did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Nothing matched the query.
    Absent,
    /// More than one entity matched the query.
    Ambiguous,
}

/// A resolution failure with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResolveFailure {
    kind: FailureKind,
    message: Arc<str>,
    /// Full query-namespace names of every match (empty for `Absent`).
    candidates: Vec<Arc<str>>,
}

impl ResolveFailure {
    /// Create an absent failure.
    pub fn absent(message: impl Into<Arc<str>>) -> Self {
        Self {
            kind: FailureKind::Absent,
            message: message.into(),
            candidates: Vec::new(),
        }
    }

    /// Create an ambiguous failure listing every candidate.
    pub fn ambiguous(message: impl Into<Arc<str>>, candidates: Vec<Arc<str>>) -> Self {
        Self {
            kind: FailureKind::Ambiguous,
            message: message.into(),
            candidates,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn is_absent(&self) -> bool {
        self.kind == FailureKind::Absent
    }

    pub fn is_ambiguous(&self) -> bool {
        self.kind == FailureKind::Ambiguous
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn candidates(&self) -> &[Arc<str>] {
        &self.candidates
    }
}
