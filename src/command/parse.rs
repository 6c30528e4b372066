//! Command line grammar: `<process> <arg> [!! | >> <alias>]`.

use std::fmt;
use std::str::FromStr;

use crate::error::{MappingGenError, Result};
use crate::tree::MemberKind;

/// What a command line asks the interpreter to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Process {
    /// `c`
    Class,
    /// `f`
    Field,
    /// `m`
    Method,
    /// `fc`: register the owner class, then resolve the field.
    ClassField,
    /// `mc`: register the owner class, then resolve the method.
    ClassMethod,
}

impl Process {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "c",
            Self::Field => "f",
            Self::Method => "m",
            Self::ClassField => "fc",
            Self::ClassMethod => "mc",
        }
    }

    /// The member kind resolved by this process, `None` for `c`.
    pub fn member_kind(self) -> Option<MemberKind> {
        match self {
            Self::Class => None,
            Self::Field | Self::ClassField => Some(MemberKind::Field),
            Self::Method | Self::ClassMethod => Some(MemberKind::Method),
        }
    }

    /// Whether the owner class is registered before the member step.
    pub fn registers_owner(self) -> bool {
        matches!(self, Self::ClassField | Self::ClassMethod)
    }
}

impl FromStr for Process {
    type Err = MappingGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "c" => Ok(Self::Class),
            "f" => Ok(Self::Field),
            "m" => Ok(Self::Method),
            "fc" => Ok(Self::ClassField),
            "mc" => Ok(Self::ClassMethod),
            other => Err(MappingGenError::syntax(format!("Invalid process: {other}"))),
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One parsed command line, borrowing from the line text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command<'l> {
    pub process: Process,
    /// Dotted path; for member processes the last segment is the member name.
    pub arg: &'l str,
    /// Owner query given after `>>`.
    pub alias: Option<&'l str>,
    /// Set by `!!`: Absent failures are accepted silently.
    pub ignore_absent: bool,
}

impl<'l> Command<'l> {
    pub fn parse(line: &'l str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(MappingGenError::syntax(format!(
                "Expression too short: {line}"
            )));
        }
        let process: Process = tokens[0].parse()?;

        let (alias, ignore_absent, used) = match tokens.get(2).copied() {
            None => (None, false, 2),
            Some("!!") => (None, true, 3),
            Some(">>") => match tokens.get(3).copied() {
                Some(alias) => (Some(alias), false, 4),
                None => {
                    return Err(MappingGenError::syntax(format!(
                        "Missing alias after >>: {line}"
                    )));
                }
            },
            Some(other) => {
                return Err(MappingGenError::syntax(format!("Unexpected token: {other}")));
            }
        };
        if let Some(extra) = tokens.get(used) {
            return Err(MappingGenError::syntax(format!("Unexpected token: {extra}")));
        }

        Ok(Self {
            process,
            arg: tokens[1],
            alias,
            ignore_absent,
        })
    }

    /// Everything before the last `.` of `arg`, if non-empty.
    pub fn prefix(&self) -> Option<&'l str> {
        self.arg
            .rfind('.')
            .map(|dot| &self.arg[..dot])
            .filter(|prefix| !prefix.is_empty())
    }

    /// The last `.` segment of `arg`.
    pub fn member_name(&self) -> &'l str {
        match self.arg.rfind('.') {
            Some(dot) => &self.arg[dot + 1..],
            None => self.arg,
        }
    }

    /// Owner query for member steps: the alias, else the prefix.
    pub fn owner_query(&self) -> Option<&'l str> {
        self.alias.or_else(|| self.prefix())
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.process, self.arg)?;
        if let Some(alias) = self.alias {
            write!(f, " >> {alias}")?;
        } else if self.ignore_absent {
            f.write_str(" !!")?;
        }
        Ok(())
    }
}
