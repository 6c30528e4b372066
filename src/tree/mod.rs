//! Mapping trees: the namespaced input index and the output accumulator.
//!
//! ## Key Types
//!
//! - [`MappingTree`] - immutable multi-namespace index, built by a [`MappingSource`]
//! - [`OutputTree`] - accepted translations, consumed by a [`MappingSink`]
//! - [`TinyV1Reader`] / [`TinyV1Writer`] - the bundled Tiny v1 source and sink

mod descriptor;
mod mapping;
mod output;
mod tiny;

pub use descriptor::remap_descriptor;
pub use mapping::{
    ClassId, ClassMapping, MappingTree, MappingTreeBuilder, MemberKind, MemberMapping,
};
pub use output::{MemberKey, OutputClass, OutputTree};
pub use tiny::{TinyV1Reader, TinyV1Writer};

use crate::error::Result;

/// Supplies a fully populated mapping tree.
pub trait MappingSource {
    fn load(self) -> Result<MappingTree>;
}

/// Serializes a finished output tree, returning the number of bytes written.
pub trait MappingSink {
    fn accept(&mut self, tree: &OutputTree) -> Result<usize>;
}

impl<S: MappingSink + ?Sized> MappingSink for &mut S {
    fn accept(&mut self, tree: &OutputTree) -> Result<usize> {
        (**self).accept(tree)
    }
}
