//! Foundation types for the mapping generator.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`NamespaceId`] - Stable index of a naming scheme inside a tree
//! - [`ResolveFailure`], [`FailureKind`], [`Resolution`] - Expected resolution failures
//! - [`BoundedCache`] - Fixed-capacity LRU map
//!
//! This module has NO dependencies on other crate modules.

mod cache;
mod namespace;
mod outcome;

pub use cache::BoundedCache;
pub use namespace::NamespaceId;
pub use outcome::{FailureKind, Resolution, ResolveFailure};
