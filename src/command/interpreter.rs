//! Executes parsed commands against the engine and records accepted
//! translations in the output tree.
//!
//! Every accepted translation is echoed as `kind\tfrom=to`.

use std::io::Write;
use std::sync::Arc;

use super::parse::Command;
use crate::base::ResolveFailure;
use crate::config::EngineConfig;
use crate::engine::{EntryElement, ShortNameEngine};
use crate::error::{MappingGenError, Result};
use crate::tree::{MappingTree, MemberKind, OutputTree};

/// Owns the engine and the output tree for one run.
#[derive(Debug)]
pub struct Interpreter<'a> {
    engine: ShortNameEngine<'a>,
    output: OutputTree,
    emitted: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(tree: &'a MappingTree, config: &EngineConfig) -> Result<Self> {
        let engine = ShortNameEngine::new(tree, config)?;
        let output = OutputTree::new(
            config.from_namespace.as_str(),
            config.to_namespace.as_str(),
        );
        Ok(Self {
            engine,
            output,
            emitted: 0,
        })
    }

    pub fn engine(&self) -> &ShortNameEngine<'a> {
        &self.engine
    }

    pub fn output(&self) -> &OutputTree {
        &self.output
    }

    /// Total entries written to the output tree so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Run one command, returning how many output entries it wrote.
    pub fn execute<W: Write + ?Sized>(&mut self, command: &Command<'_>, out: &mut W) -> Result<usize> {
        tracing::trace!("execute `{}`", command);
        let Some(kind) = command.process.member_kind() else {
            let query = command.alias.unwrap_or(command.arg);
            return self.class_step(query, command.ignore_absent, out);
        };

        let mut emitted = 0;
        if command.process.registers_owner() {
            if let Some(owner) = command.owner_query() {
                match self.class_step(owner, command.ignore_absent, out) {
                    Ok(n) => emitted += n,
                    Err(MappingGenError::Resolve(failure)) => {
                        tracing::debug!("class step of `{}` discarded: {}", command, failure);
                    }
                    Err(other) => return Err(other),
                }
            }
        }
        Ok(emitted + self.member_step(kind, command, out)?)
    }

    fn class_step<W: Write + ?Sized>(
        &mut self,
        query: &str,
        ignore_absent: bool,
        out: &mut W,
    ) -> Result<usize> {
        let query = query.replace('.', "/");
        let class = match self.engine.resolve_class(&query) {
            Ok(class) => class,
            Err(failure) => return reject(failure, ignore_absent),
        };

        self.output
            .visit_class(&class.from)
            .set_dst_name(class.to.clone());
        self.emitted += 1;
        writeln!(out, "class\t{}={}", class.from, class.to)?;
        Ok(1)
    }

    fn member_step<W: Write + ?Sized>(
        &mut self,
        kind: MemberKind,
        command: &Command<'_>,
        out: &mut W,
    ) -> Result<usize> {
        let name = command.member_name();
        let query = match command.owner_query() {
            Some(owner) => format!("{}.{}", owner.replace('.', "/"), name),
            None => name.to_string(),
        };
        let member = match self.engine.resolve_member(kind, &query) {
            Ok(member) => member,
            Err(failure) => return reject(failure, command.ignore_absent),
        };

        let mut emitted = self.emit_member(kind, &member.entry, &member.to, out)?;
        // Member declared on the alias, also emitted for the subclass written in `arg`.
        if let (Some(_), Some(prefix)) = (command.alias, command.prefix()) {
            let real = member.entry.with_owner(prefix.replace('.', "/"));
            emitted += self.emit_member(kind, &real, &member.to, out)?;
        }
        Ok(emitted)
    }

    fn emit_member<W: Write + ?Sized>(
        &mut self,
        kind: MemberKind,
        entry: &EntryElement,
        to: &Arc<str>,
        out: &mut W,
    ) -> Result<usize> {
        self.output.visit_class(&entry.owner).visit_member(
            kind,
            entry.name.clone(),
            entry.desc.clone(),
            to.clone(),
        );
        self.emitted += 1;
        writeln!(out, "{kind}\t{entry}={to}")?;
        Ok(1)
    }
}

fn reject(failure: ResolveFailure, ignore_absent: bool) -> Result<usize> {
    if ignore_absent && failure.is_absent() {
        tracing::debug!("absent ignored: {}", failure);
        return Ok(0);
    }
    Err(failure.into())
}
