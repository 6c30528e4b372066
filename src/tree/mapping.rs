//! Namespaced symbol tree: classes, fields and methods named in several
//! namespaces at once.
//!
//! The tree is assembled through [`MappingTreeBuilder`] and is immutable once
//! built. Every entity carries one name per namespace (possibly missing);
//! members additionally carry one descriptor per namespace.
//!
//! ## Key Data Structures
//!
//! - [`MappingTree`] - Classes in insertion order plus per-namespace name indexes
//! - [`ClassMapping`] - One class and the members it owns
//! - [`MemberMapping`] - One field or method

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::descriptor::remap_descriptor;
use crate::base::NamespaceId;
use crate::error::{MappingGenError, Result};

// ============================================================================
// IDS AND KINDS
// ============================================================================

/// Index of a class inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a member is a field or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

impl MemberKind {
    /// Lower-case name as used in line output and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// A class and its members.
#[derive(Clone, Debug)]
pub struct ClassMapping {
    id: ClassId,
    src_name: Arc<str>,
    /// One slot per namespace; namespace 0 is always present.
    names: Box<[Option<Arc<str>>]>,
    fields: Vec<MemberMapping>,
    methods: Vec<MemberMapping>,
}

impl ClassMapping {
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Full slash-separated name in `ns`, if the class has one there.
    pub fn name(&self, ns: NamespaceId) -> Option<&str> {
        self.names.get(ns.index()).and_then(|n| n.as_deref())
    }

    /// Shared handle to the name in `ns`.
    pub fn name_arc(&self, ns: NamespaceId) -> Option<&Arc<str>> {
        self.names.get(ns.index()).and_then(|n| n.as_ref())
    }

    /// Name in `ns`, falling back to the first namespace's name.
    pub fn name_or_src(&self, ns: NamespaceId) -> &Arc<str> {
        self.name_arc(ns).unwrap_or(&self.src_name)
    }

    pub fn fields(&self) -> &[MemberMapping] {
        &self.fields
    }

    pub fn methods(&self) -> &[MemberMapping] {
        &self.methods
    }

    pub fn members(&self, kind: MemberKind) -> &[MemberMapping] {
        match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Method => &self.methods,
        }
    }

    /// Exact member lookup by name and descriptor in `ns`.
    pub fn member(
        &self,
        kind: MemberKind,
        name: &str,
        desc: &str,
        ns: NamespaceId,
    ) -> Option<&MemberMapping> {
        self.members(kind)
            .iter()
            .find(|m| m.name(ns) == Some(name) && m.desc(ns) == Some(desc))
    }
}

/// A field or method owned by one class.
#[derive(Clone, Debug)]
pub struct MemberMapping {
    owner: ClassId,
    kind: MemberKind,
    src_name: Arc<str>,
    names: Box<[Option<Arc<str>>]>,
    descs: Box<[Arc<str>]>,
}

impl MemberMapping {
    pub fn owner(&self) -> ClassId {
        self.owner
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self, ns: NamespaceId) -> Option<&str> {
        self.names.get(ns.index()).and_then(|n| n.as_deref())
    }

    pub fn name_arc(&self, ns: NamespaceId) -> Option<&Arc<str>> {
        self.names.get(ns.index()).and_then(|n| n.as_ref())
    }

    /// Name in `ns`, falling back to the first namespace's name.
    pub fn name_or_src(&self, ns: NamespaceId) -> &Arc<str> {
        self.name_arc(ns).unwrap_or(&self.src_name)
    }

    /// Descriptor expressed in `ns`.
    pub fn desc(&self, ns: NamespaceId) -> Option<&str> {
        self.descs.get(ns.index()).map(|d| d.as_ref())
    }

    /// Descriptor in `ns`, falling back to the first namespace's descriptor.
    pub fn desc_or_src(&self, ns: NamespaceId) -> &Arc<str> {
        self.descs.get(ns.index()).unwrap_or(&self.descs[0])
    }
}

// ============================================================================
// MAPPING TREE
// ============================================================================

/// Immutable multi-namespace index of classes, fields and methods.
#[derive(Clone, Debug)]
pub struct MappingTree {
    namespaces: Vec<Arc<str>>,
    /// The single source of truth for all classes, indexed by `ClassId`.
    classes: Vec<ClassMapping>,
    /// Per namespace: full class name -> class.
    by_name: Vec<FxHashMap<Arc<str>, ClassId>>,
}

impl MappingTree {
    /// Namespace names in header order.
    pub fn namespaces(&self) -> &[Arc<str>] {
        &self.namespaces
    }

    pub fn namespace_id(&self, name: &str) -> Option<NamespaceId> {
        self.namespaces
            .iter()
            .position(|ns| ns.as_ref() == name)
            .map(|i| NamespaceId::new(i as u16))
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> &[ClassMapping] {
        &self.classes
    }

    pub fn get_class(&self, id: ClassId) -> Option<&ClassMapping> {
        self.classes.get(id.index())
    }

    /// The class owning `member`.
    pub fn owner_of(&self, member: &MemberMapping) -> &ClassMapping {
        &self.classes[member.owner.index()]
    }

    /// Exact class lookup by full name in `ns`.
    pub fn class(&self, name: &str, ns: NamespaceId) -> Option<&ClassMapping> {
        self.by_name
            .get(ns.index())
            .and_then(|index| index.get(name))
            .and_then(|&id| self.get_class(id))
    }

    /// Exact member lookup by (owner, name, descriptor) in `ns`.
    pub fn member(
        &self,
        kind: MemberKind,
        owner: &str,
        name: &str,
        desc: &str,
        ns: NamespaceId,
    ) -> Option<&MemberMapping> {
        self.class(owner, ns)
            .and_then(|class| class.member(kind, name, desc, ns))
    }

    pub fn field(&self, owner: &str, name: &str, desc: &str, ns: NamespaceId) -> Option<&MemberMapping> {
        self.member(MemberKind::Field, owner, name, desc, ns)
    }

    pub fn method(&self, owner: &str, name: &str, desc: &str, ns: NamespaceId) -> Option<&MemberMapping> {
        self.member(MemberKind::Method, owner, name, desc, ns)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total number of fields and methods.
    pub fn member_count(&self) -> usize {
        self.classes
            .iter()
            .map(|c| c.fields.len() + c.methods.len())
            .sum()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug)]
struct PendingClass {
    src_name: Arc<str>,
    names: Vec<Option<Arc<str>>>,
    members: Vec<PendingMember>,
}

#[derive(Debug)]
struct PendingMember {
    kind: MemberKind,
    src_name: Arc<str>,
    src_desc: Arc<str>,
    names: Vec<Option<Arc<str>>>,
}

/// Assembles a [`MappingTree`].
///
/// Classes are keyed by their namespace-0 name; adding a class twice merges
/// the names. Member descriptors are given in namespace 0 and rewritten into
/// every other namespace by [`build`](Self::build).
#[derive(Debug)]
pub struct MappingTreeBuilder {
    namespaces: Vec<Arc<str>>,
    classes: Vec<PendingClass>,
    by_src_name: FxHashMap<Arc<str>, ClassId>,
}

impl MappingTreeBuilder {
    /// Start a tree over the given namespaces, in header order.
    pub fn new<I, S>(namespaces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let namespaces: Vec<Arc<str>> = namespaces.into_iter().map(Into::into).collect();
        if namespaces.is_empty() {
            return Err(MappingGenError::invalid_tree("no namespaces"));
        }
        if namespaces.len() > u16::MAX as usize {
            return Err(MappingGenError::invalid_tree("too many namespaces"));
        }
        for (i, ns) in namespaces.iter().enumerate() {
            if namespaces[..i].contains(ns) {
                return Err(MappingGenError::invalid_tree(format!(
                    "duplicate namespace {ns}"
                )));
            }
        }
        Ok(Self {
            namespaces,
            classes: Vec::new(),
            by_src_name: FxHashMap::default(),
        })
    }

    pub fn namespaces(&self) -> &[Arc<str>] {
        &self.namespaces
    }

    /// Add (or merge into) a class. `names` holds one entry per namespace;
    /// empty strings mean "no name in this namespace".
    pub fn add_class(&mut self, names: &[&str]) -> Result<ClassId> {
        let names = self.collect_names(names)?;
        let src: Arc<str> = names.src.clone();
        let names = names.slots;

        match self.by_src_name.get(&src) {
            Some(&id) => {
                let pending = &mut self.classes[id.index()];
                for (slot, name) in pending.names.iter_mut().zip(names) {
                    if name.is_some() {
                        *slot = name;
                    }
                }
                Ok(id)
            }
            None => Ok(self.push_class(src, names)),
        }
    }

    /// The class with this namespace-0 name, created with no other names if new.
    pub fn ensure_class(&mut self, src_name: &str) -> ClassId {
        if let Some(&id) = self.by_src_name.get(src_name) {
            return id;
        }
        let src: Arc<str> = Arc::from(src_name);
        let mut names = vec![None; self.namespaces.len()];
        names[0] = Some(src.clone());
        self.push_class(src, names)
    }

    pub fn add_field(&mut self, owner: ClassId, src_desc: &str, names: &[&str]) -> Result<()> {
        self.add_member(owner, MemberKind::Field, src_desc, names)
    }

    pub fn add_method(&mut self, owner: ClassId, src_desc: &str, names: &[&str]) -> Result<()> {
        self.add_member(owner, MemberKind::Method, src_desc, names)
    }

    /// Add (or merge into) a member of `owner`. A member with the same kind,
    /// namespace-0 name and descriptor is merged.
    pub fn add_member(
        &mut self,
        owner: ClassId,
        kind: MemberKind,
        src_desc: &str,
        names: &[&str],
    ) -> Result<()> {
        let CollectedNames { src, slots: names } = self.collect_names(names)?;
        let Some(class) = self.classes.get_mut(owner.index()) else {
            return Err(MappingGenError::invalid_tree(format!(
                "unknown owner class #{}",
                owner.index()
            )));
        };

        let existing = class.members.iter_mut().find(|m| {
            m.kind == kind && m.src_name == src && m.src_desc.as_ref() == src_desc
        });
        match existing {
            Some(member) => {
                for (slot, name) in member.names.iter_mut().zip(names) {
                    if name.is_some() {
                        *slot = name;
                    }
                }
            }
            None => class.members.push(PendingMember {
                kind,
                src_name: src,
                src_desc: Arc::from(src_desc),
                names,
            }),
        }
        Ok(())
    }

    /// Freeze the tree, computing per-namespace descriptors and name indexes.
    pub fn build(self) -> MappingTree {
        let ns_count = self.namespaces.len();
        let class_names: Vec<Vec<Option<Arc<str>>>> =
            self.classes.iter().map(|c| c.names.clone()).collect();
        let by_src_name = self.by_src_name;

        let remap = |desc: &str, ns: usize| -> Arc<str> {
            if ns == 0 {
                return Arc::from(desc);
            }
            Arc::from(remap_descriptor(desc, |class| {
                by_src_name
                    .get(class)
                    .and_then(|id| class_names[id.index()][ns].as_deref())
                    .map(str::to_string)
            }))
        };

        let mut by_name: Vec<FxHashMap<Arc<str>, ClassId>> =
            (0..ns_count).map(|_| FxHashMap::default()).collect();
        let mut classes = Vec::with_capacity(self.classes.len());

        for (index, pending) in self.classes.into_iter().enumerate() {
            let id = ClassId::new(index as u32);
            for (ns, name) in pending.names.iter().enumerate() {
                if let Some(name) = name {
                    by_name[ns].insert(name.clone(), id);
                }
            }

            let mut fields = Vec::new();
            let mut methods = Vec::new();
            for member in pending.members {
                let descs: Box<[Arc<str>]> =
                    (0..ns_count).map(|ns| remap(&member.src_desc, ns)).collect();
                let mapped = MemberMapping {
                    owner: id,
                    kind: member.kind,
                    src_name: member.src_name,
                    names: member.names.into_boxed_slice(),
                    descs,
                };
                match member.kind {
                    MemberKind::Field => fields.push(mapped),
                    MemberKind::Method => methods.push(mapped),
                }
            }

            classes.push(ClassMapping {
                id,
                src_name: pending.src_name,
                names: pending.names.into_boxed_slice(),
                fields,
                methods,
            });
        }

        MappingTree {
            namespaces: self.namespaces,
            classes,
            by_name,
        }
    }

    fn push_class(&mut self, src: Arc<str>, names: Vec<Option<Arc<str>>>) -> ClassId {
        let id = ClassId::new(self.classes.len() as u32);
        self.classes.push(PendingClass {
            src_name: src.clone(),
            names,
            members: Vec::new(),
        });
        self.by_src_name.insert(src, id);
        id
    }

    fn collect_names(&self, names: &[&str]) -> Result<CollectedNames> {
        if names.len() != self.namespaces.len() {
            return Err(MappingGenError::invalid_tree(format!(
                "expected {} names, got {}",
                self.namespaces.len(),
                names.len()
            )));
        }
        if names[0].is_empty() {
            return Err(MappingGenError::invalid_tree(format!(
                "missing name in namespace {}",
                self.namespaces[0]
            )));
        }
        Ok(CollectedNames {
            src: Arc::from(names[0]),
            slots: names
                .iter()
                .map(|n| (!n.is_empty()).then(|| Arc::from(*n)))
                .collect(),
        })
    }
}

struct CollectedNames {
    src: Arc<str>,
    slots: Vec<Option<Arc<str>>>,
}
