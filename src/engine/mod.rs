//! Short name resolution over a [`MappingTree`](crate::tree::MappingTree).
//!
//! ## Key Types
//!
//! - [`ShortNameEngine`] - resolves class and member queries with bounded caches
//! - [`MemberQuery`] - a member query split into owner, name and descriptor
//! - [`ResolvedClass`] / [`ResolvedMember`] - successful resolutions

mod query;
mod shortname;

pub use query::{MemberQuery, member_key};
pub use shortname::{
    EngineStats, EntryElement, ResolvedClass, ResolvedMember, ShortNameEngine,
};
