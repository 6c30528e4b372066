//! # mappinggen
//!
//! Generates a two-namespace name mapping from short, human-written queries
//! resolved against a multi-namespace mapping tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! command   → Command grammar, interpreter, batch/interactive sessions
//!   ↓
//! engine    → Short name resolution with bounded caches
//!   ↓
//! tree      → Input mapping tree, output tree, Tiny v1 reader/writer
//!   ↓
//! base      → Primitives (NamespaceId, ResolveFailure, BoundedCache)
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → engine → command)
// ============================================================================

/// Foundation types: NamespaceId, resolution failures, bounded cache
pub mod base;

/// Mapping trees and the Tiny v1 format
pub mod tree;

/// Short name resolution
pub mod engine;

/// Command parsing and execution
pub mod command;

/// Engine and session settings
pub mod config;

/// Crate error type
pub mod error;

// Re-export commonly needed items
pub use base::{FailureKind, NamespaceId, Resolution, ResolveFailure};
pub use command::{Command, Interpreter, Process, Session, SessionState};
pub use config::{EngineConfig, SessionConfig};
pub use engine::{EntryElement, ShortNameEngine};
pub use error::{MappingGenError, Result};
pub use tree::{MappingSink, MappingSource, MappingTree, MappingTreeBuilder, OutputTree};
