/// Index of a namespace within a mapping tree header.
///
/// Ids are assigned in header order when the tree is built and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(u16);

impl NamespaceId {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Position of the namespace in the tree header.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ns#{}", self.0)
    }
}
