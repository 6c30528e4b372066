//! Output mapping tree: accepted translations waiting to be serialized.
//!
//! Members can only be reached through [`OutputTree::visit_class`], so a class
//! is always present before any of its members. Re-visiting an entry
//! overwrites its destination name (last write wins).

use std::sync::Arc;

use indexmap::IndexMap;

use super::mapping::MemberKind;

/// Key of a member inside its class: (name, descriptor) in the source namespace.
pub type MemberKey = (Arc<str>, Arc<str>);

/// Accumulator of (from → to) translations for one namespace pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTree {
    src_namespace: Arc<str>,
    dst_namespace: Arc<str>,
    /// IndexMap keeps visit order so serialization is deterministic.
    classes: IndexMap<Arc<str>, OutputClass>,
}

impl OutputTree {
    pub fn new(src_namespace: impl Into<Arc<str>>, dst_namespace: impl Into<Arc<str>>) -> Self {
        Self {
            src_namespace: src_namespace.into(),
            dst_namespace: dst_namespace.into(),
            classes: IndexMap::new(),
        }
    }

    pub fn src_namespace(&self) -> &str {
        &self.src_namespace
    }

    pub fn dst_namespace(&self) -> &str {
        &self.dst_namespace
    }

    /// Declare a class present, returning it for member visits.
    pub fn visit_class(&mut self, name: &str) -> &mut OutputClass {
        self.classes
            .entry(Arc::from(name))
            .or_insert_with_key(|name| OutputClass::new(name.clone()))
    }

    pub fn class(&self, name: &str) -> Option<&OutputClass> {
        self.classes.get(name)
    }

    /// Classes in visit order.
    pub fn classes(&self) -> impl Iterator<Item = &OutputClass> {
        self.classes.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of entries that carry a destination name.
    pub fn len(&self) -> usize {
        self.classes
            .values()
            .map(|c| usize::from(c.dst_name.is_some()) + c.fields.len() + c.methods.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// One visited class with its visited members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputClass {
    name: Arc<str>,
    dst_name: Option<Arc<str>>,
    fields: IndexMap<MemberKey, Arc<str>>,
    methods: IndexMap<MemberKey, Arc<str>>,
}

impl OutputClass {
    fn new(name: Arc<str>) -> Self {
        Self {
            name,
            dst_name: None,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dst_name(&self) -> Option<&str> {
        self.dst_name.as_deref()
    }

    /// Set the destination name, returning the previous one.
    pub fn set_dst_name(&mut self, dst: impl Into<Arc<str>>) -> Option<Arc<str>> {
        let dst = dst.into();
        let previous = self.dst_name.replace(dst.clone());
        if let Some(old) = previous.as_ref().filter(|old| **old != dst) {
            tracing::warn!("class {} remapped from {} to {}", self.name, old, dst);
        }
        previous
    }

    /// Record a member translation, returning the previous destination name.
    pub fn visit_member(
        &mut self,
        kind: MemberKind,
        name: impl Into<Arc<str>>,
        desc: impl Into<Arc<str>>,
        dst: impl Into<Arc<str>>,
    ) -> Option<Arc<str>> {
        let key = (name.into(), desc.into());
        let dst = dst.into();
        let members = match kind {
            MemberKind::Field => &mut self.fields,
            MemberKind::Method => &mut self.methods,
        };
        let previous = members.insert(key.clone(), dst.clone());
        if let Some(old) = previous.as_ref().filter(|old| **old != dst) {
            tracing::warn!(
                "{} {}.{}:{} remapped from {} to {}",
                kind,
                self.name,
                key.0,
                key.1,
                old,
                dst
            );
        }
        previous
    }

    pub fn visit_field(
        &mut self,
        name: impl Into<Arc<str>>,
        desc: impl Into<Arc<str>>,
        dst: impl Into<Arc<str>>,
    ) -> Option<Arc<str>> {
        self.visit_member(MemberKind::Field, name, desc, dst)
    }

    pub fn visit_method(
        &mut self,
        name: impl Into<Arc<str>>,
        desc: impl Into<Arc<str>>,
        dst: impl Into<Arc<str>>,
    ) -> Option<Arc<str>> {
        self.visit_member(MemberKind::Method, name, desc, dst)
    }

    /// Destination name of a member, if visited.
    pub fn member(&self, kind: MemberKind, name: &str, desc: &str) -> Option<&str> {
        self.members(kind)
            .find(|(n, d, _)| *n == name && *d == desc)
            .map(|(_, _, dst)| dst)
    }

    /// (name, descriptor, destination) of every visited member of `kind`, in visit order.
    pub fn members(&self, kind: MemberKind) -> impl Iterator<Item = (&str, &str, &str)> {
        let members = match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Method => &self.methods,
        };
        members
            .iter()
            .map(|((name, desc), dst)| (name.as_ref(), desc.as_ref(), dst.as_ref()))
    }
}
