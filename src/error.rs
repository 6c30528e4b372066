//! Error types for mapping generation.

use thiserror::Error;

use crate::base::{FailureKind, ResolveFailure};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MappingGenError>;

/// Errors that can occur while loading mappings, interpreting commands or
/// writing the generated mapping.
#[derive(Debug, Error)]
pub enum MappingGenError {
    /// A query did not resolve to exactly one entity.
    #[error(transparent)]
    Resolve(#[from] ResolveFailure),

    /// A command line could not be parsed.
    #[error("{0}")]
    Syntax(String),

    /// A namespace name is not part of the mapping tree.
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// Malformed mapping source.
    #[error("Invalid mapping at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A mapping tree could not be assembled from the supplied entries.
    #[error("Invalid mapping tree: {0}")]
    InvalidTree(String),

    /// No explicit or configured output path.
    #[error("Did not set output path")]
    NoOutputPath,

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A batch line failed; carries the line for reporting.
    #[error("line {number} `{text}`: {source}")]
    Line {
        number: usize,
        text: String,
        #[source]
        source: Box<MappingGenError>,
    },
}

impl MappingGenError {
    /// Create a command syntax error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Create a mapping format error.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree(message.into())
    }

    /// Attach the failing command line.
    pub fn at_line(self, number: usize, text: impl Into<String>) -> Self {
        Self::Line {
            number,
            text: text.into(),
            source: Box::new(self),
        }
    }

    /// The resolution failure behind this error, if any.
    pub fn resolve_failure(&self) -> Option<&ResolveFailure> {
        match self {
            Self::Resolve(failure) => Some(failure),
            Self::Line { source, .. } => source.resolve_failure(),
            _ => None,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Resolve(failure) => match failure.kind() {
                FailureKind::Absent => 2,
                FailureKind::Ambiguous => 3,
            },
            Self::Syntax(_) => 4,
            Self::Io(_) => 5,
            Self::Format { .. } | Self::InvalidTree(_) => 6,
            Self::UnknownNamespace(_) | Self::NoOutputPath => 7,
            Self::Line { source, .. } => source.exit_code(),
        }
    }
}
