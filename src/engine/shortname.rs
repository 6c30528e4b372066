//! Short name resolution: turning partial names into unique entities.
//!
//! # Resolution order
//!
//! Classes:
//! 1. **Exact** - the query is a full name in the query namespace
//! 2. **Suffix scan** - every class whose query-namespace name ends with the query
//!
//! Members (`owner.name:desc`, owner and descriptor optional):
//! 1. **Exact** - owner and descriptor given and the triple exists
//! 2. **Scoped scan** - owner resolved as a class, then its members filtered
//! 3. **Tree scan** - no owner; every member of the kind in the tree is filtered
//!
//! A scan with one match succeeds, none is `Absent`, several is `Ambiguous`.
//! Ambiguous scans cache every candidate under its fully qualified name so the
//! follow-up query the user types is a cache hit.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use super::query::{MemberQuery, member_key};
use crate::base::{BoundedCache, NamespaceId, Resolution, ResolveFailure};
use crate::config::EngineConfig;
use crate::error::{MappingGenError, Result};
use crate::tree::{ClassId, ClassMapping, MappingTree, MemberKind, MemberMapping};

// ============================================================================
// RESOLVED VALUES
// ============================================================================

/// A class resolved to its from/to names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedClass {
    pub id: ClassId,
    pub from: Arc<str>,
    pub to: Arc<str>,
}

/// Namespace-agnostic snapshot of a field or method, expressed in the from namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryElement {
    pub owner: Arc<str>,
    pub name: Arc<str>,
    pub desc: Arc<str>,
}

impl EntryElement {
    /// The same member declared on a different owner.
    pub fn with_owner(&self, owner: impl Into<Arc<str>>) -> Self {
        Self {
            owner: owner.into(),
            name: self.name.clone(),
            desc: self.desc.clone(),
        }
    }
}

impl fmt::Display for EntryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:{}", self.owner, self.name, self.desc)
    }
}

/// A member resolved to its entry element and destination name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMember {
    pub entry: EntryElement,
    pub to: Arc<str>,
}

/// Counters for observing cache effectiveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Suffix scans over all classes.
    pub class_scans: usize,
    /// Member scans, scoped or tree-wide.
    pub member_scans: usize,
    pub cache_hits: usize,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Resolves queries written in one namespace to names in two others.
///
/// Namespace roles are bound once at construction. Caches are keyed by the
/// exact query text and live as long as the engine.
pub struct ShortNameEngine<'a> {
    tree: &'a MappingTree,
    query_ns: NamespaceId,
    from_ns: NamespaceId,
    to_ns: NamespaceId,
    class_cache: BoundedCache<Arc<str>, ResolvedClass>,
    field_cache: BoundedCache<Arc<str>, ResolvedMember>,
    method_cache: BoundedCache<Arc<str>, ResolvedMember>,
    stats: EngineStats,
}

impl<'a> ShortNameEngine<'a> {
    /// Bind the configured namespaces against `tree`.
    pub fn new(tree: &'a MappingTree, config: &EngineConfig) -> Result<Self> {
        let bind = |name: &str| {
            tree.namespace_id(name)
                .ok_or_else(|| MappingGenError::UnknownNamespace(name.to_string()))
        };
        Ok(Self {
            tree,
            query_ns: bind(&config.query_namespace)?,
            from_ns: bind(&config.from_namespace)?,
            to_ns: bind(&config.to_namespace)?,
            class_cache: BoundedCache::new(config.class_cache_capacity),
            field_cache: BoundedCache::new(config.member_cache_capacity),
            method_cache: BoundedCache::new(config.member_cache_capacity),
            stats: EngineStats::default(),
        })
    }

    pub fn tree(&self) -> &'a MappingTree {
        self.tree
    }

    pub fn query_namespace(&self) -> NamespaceId {
        self.query_ns
    }

    pub fn from_namespace(&self) -> NamespaceId {
        self.from_ns
    }

    pub fn to_namespace(&self) -> NamespaceId {
        self.to_ns
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Whether a class query is cached, without touching recency.
    pub fn is_class_cached(&self, query: &str) -> bool {
        self.class_cache.contains(query)
    }

    /// Whether a member query is cached, without touching recency.
    pub fn is_member_cached(&self, kind: MemberKind, query: &str) -> bool {
        match kind {
            MemberKind::Field => self.field_cache.contains(query),
            MemberKind::Method => self.method_cache.contains(query),
        }
    }

    // ------------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------------

    /// Resolve a full or suffix class name.
    pub fn resolve_class(&mut self, query: &str) -> Resolution<ResolvedClass> {
        if let Some(hit) = self.class_cache.get(query).cloned() {
            self.stats.cache_hits += 1;
            tracing::debug!("class cache hit: {}", query);
            return Ok(hit);
        }

        let class = self.find_class(query)?;
        let resolved = self.class_pair(class);
        if let Some(real) = class.name_arc(self.query_ns) {
            if real.as_ref() != query {
                self.class_cache.insert(real.clone(), resolved.clone());
            }
        }
        self.class_cache.insert(Arc::from(query), resolved.clone());
        Ok(resolved)
    }

    fn find_class(&mut self, query: &str) -> Resolution<&'a ClassMapping> {
        let tree = self.tree;
        let ns = self.query_ns;

        if let Some(class) = tree.class(query, ns) {
            return Ok(class);
        }

        self.stats.class_scans += 1;
        let candidates: Vec<&'a ClassMapping> = tree
            .classes()
            .par_iter()
            .filter(|c| c.name(ns).is_some_and(|name| name.ends_with(query)))
            .collect();
        tracing::trace!("suffix scan `{}`: {} candidates", query, candidates.len());

        match candidates.as_slice() {
            [] => Err(ResolveFailure::absent(format!(
                "no class ends with {query}"
            ))),
            [class] => Ok(*class),
            _ => {
                let mut names = Vec::with_capacity(candidates.len());
                for class in &candidates {
                    if let Some(name) = class.name_arc(ns) {
                        let pair = self.class_pair(class);
                        self.class_cache.insert(name.clone(), pair);
                        names.push(name.clone());
                    }
                }
                Err(ResolveFailure::ambiguous(
                    format!(
                        "suffix {query} is too ambiguous (size={}): {}",
                        names.len(),
                        list(&names)
                    ),
                    names,
                ))
            }
        }
    }

    fn class_pair(&self, class: &ClassMapping) -> ResolvedClass {
        ResolvedClass {
            id: class.id(),
            from: class.name_or_src(self.from_ns).clone(),
            to: class.name_or_src(self.to_ns).clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    pub fn resolve_field(&mut self, query: &str) -> Resolution<ResolvedMember> {
        self.resolve_member(MemberKind::Field, query)
    }

    pub fn resolve_method(&mut self, query: &str) -> Resolution<ResolvedMember> {
        self.resolve_member(MemberKind::Method, query)
    }

    /// Resolve `owner.name:desc` (owner and descriptor optional).
    pub fn resolve_member(&mut self, kind: MemberKind, query: &str) -> Resolution<ResolvedMember> {
        if let Some(hit) = self.member_cache(kind).get(query).cloned() {
            self.stats.cache_hits += 1;
            tracing::debug!("{} cache hit: {}", kind, query);
            return Ok(hit);
        }

        let parsed = MemberQuery::parse(query);
        let member = self.find_member(kind, &parsed)?;
        let resolved = self.member_pair(member);
        self.member_cache(kind)
            .insert(Arc::from(query), resolved.clone());
        Ok(resolved)
    }

    fn find_member(
        &mut self,
        kind: MemberKind,
        query: &MemberQuery<'_>,
    ) -> Resolution<&'a MemberMapping> {
        let tree = self.tree;
        let ns = self.query_ns;

        if let (Some(owner), Some(desc)) = (query.owner, query.desc) {
            if let Some(member) = tree.member(kind, owner, query.name, desc, ns) {
                return Ok(member);
            }
        }

        let accepts = |m: &MemberMapping| {
            m.name(ns) == Some(query.name) && query.desc.is_none_or(|d| m.desc(ns) == Some(d))
        };

        let candidates: Vec<&'a MemberMapping> = match query.owner {
            Some(owner) => {
                // Owner failures propagate unchanged.
                let resolved = self.resolve_class(owner)?;
                let class = tree.get_class(resolved.id).ok_or_else(|| {
                    ResolveFailure::absent(format!("Can't find class {owner}"))
                })?;
                self.stats.member_scans += 1;
                class
                    .members(kind)
                    .par_iter()
                    .filter(|m| accepts(*m))
                    .collect()
            }
            None => {
                self.stats.member_scans += 1;
                tree.classes()
                    .par_iter()
                    .flat_map_iter(|c| c.members(kind).iter())
                    .filter(|m| accepts(*m))
                    .collect()
            }
        };
        tracing::trace!("{} scan `{}`: {} candidates", kind, query, candidates.len());

        match candidates.as_slice() {
            [] => Err(ResolveFailure::absent(format!(
                "No such {kind} named {query}"
            ))),
            [member] => Ok(*member),
            _ => {
                let mut keys = Vec::with_capacity(candidates.len());
                for member in &candidates {
                    // Owners without a query-namespace name are keyed by their source name.
                    let key: Arc<str> = Arc::from(member_key(
                        tree.owner_of(member).name_or_src(ns),
                        member.name_or_src(ns),
                        member.desc_or_src(ns),
                    ));
                    let pair = self.member_pair(member);
                    self.member_cache(kind).insert(key.clone(), pair);
                    keys.push(key);
                }
                Err(ResolveFailure::ambiguous(
                    format!(
                        "{kind} {query} is ambiguous (size={}): {}",
                        keys.len(),
                        list(&keys)
                    ),
                    keys,
                ))
            }
        }
    }

    fn member_pair(&self, member: &MemberMapping) -> ResolvedMember {
        let owner = self.tree.owner_of(member);
        ResolvedMember {
            entry: EntryElement {
                owner: owner.name_or_src(self.from_ns).clone(),
                name: member.name_or_src(self.from_ns).clone(),
                desc: member.desc_or_src(self.from_ns).clone(),
            },
            to: member.name_or_src(self.to_ns).clone(),
        }
    }

    fn member_cache(&mut self, kind: MemberKind) -> &mut BoundedCache<Arc<str>, ResolvedMember> {
        match kind {
            MemberKind::Field => &mut self.field_cache,
            MemberKind::Method => &mut self.method_cache,
        }
    }
}

impl fmt::Debug for ShortNameEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortNameEngine")
            .field("query_ns", &self.query_ns)
            .field("from_ns", &self.from_ns)
            .field("to_ns", &self.to_ns)
            .field("class_cache", &self.class_cache)
            .field("field_cache", &self.field_cache)
            .field("method_cache", &self.method_cache)
            .field("stats", &self.stats)
            .finish()
    }
}

/// `[a, b, c]`
fn list(items: &[Arc<str>]) -> String {
    let joined: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    format!("[{}]", joined.join(", "))
}
