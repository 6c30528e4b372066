//! Splitting member queries into owner, name and descriptor.

use std::fmt;

/// A member query `owner.name:desc` where owner and descriptor are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberQuery<'q> {
    pub owner: Option<&'q str>,
    pub name: &'q str,
    pub desc: Option<&'q str>,
}

impl<'q> MemberQuery<'q> {
    /// Parse a raw query.
    ///
    /// The descriptor starts after the first `:`; the owner ends at the last
    /// `.` before it. Empty owner or descriptor parts count as missing.
    pub fn parse(query: &'q str) -> Self {
        let (head, desc) = match query.split_once(':') {
            Some((head, desc)) => (head, Some(desc)),
            None => (query, None),
        };
        let (owner, name) = match head.rfind('.') {
            Some(dot) => (Some(&head[..dot]), &head[dot + 1..]),
            None => (None, head),
        };
        Self {
            owner: owner.filter(|o| !o.is_empty()),
            name,
            desc: desc.filter(|d| !d.is_empty()),
        }
    }
}

impl fmt::Display for MemberQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(owner) = self.owner {
            write!(f, "{owner}.")?;
        }
        f.write_str(self.name)?;
        if let Some(desc) = self.desc {
            write!(f, ":{desc}")?;
        }
        Ok(())
    }
}

/// Fully qualified cache key `owner.name:desc`.
pub fn member_key(owner: &str, name: &str, desc: &str) -> String {
    format!("{owner}.{name}:{desc}")
}
