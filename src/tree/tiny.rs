//! Tiny v1 mapping format.
//!
//! ```text
//! v1	official	intermediary	named
//! CLASS	a	net/minecraft/class_1	net/minecraft/Block
//! FIELD	a	I	b	field_2	hardness
//! METHOD	a	(La;)V	c	method_3	copy
//! ```
//!
//! Owners and descriptors are written in the first namespace only.

use std::io::{BufRead, Write};

use super::mapping::{MappingTree, MappingTreeBuilder, MemberKind};
use super::output::OutputTree;
use super::{MappingSink, MappingSource};
use crate::error::{MappingGenError, Result};

const HEADER: &str = "v1";

/// Reads a Tiny v1 file into a [`MappingTree`].
pub struct TinyV1Reader<R> {
    reader: R,
}

impl<R: BufRead> TinyV1Reader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> MappingSource for TinyV1Reader<R> {
    fn load(self) -> Result<MappingTree> {
        let mut lines = self.reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(MappingGenError::format(1, "empty input")),
        };
        let mut columns = header.split('\t');
        if columns.next() != Some(HEADER) {
            return Err(MappingGenError::format(1, "expected `v1` header"));
        }
        let mut builder = MappingTreeBuilder::new(columns.map(str::to_string))
            .map_err(|e| MappingGenError::format(1, e.to_string()))?;
        let ns_count = builder.namespaces().len();

        for (index, line) in lines.enumerate() {
            let number = index + 2;
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let columns: Vec<&str> = line.split('\t').collect();
            let located = |e: MappingGenError| MappingGenError::format(number, e.to_string());

            match columns[0] {
                "CLASS" => {
                    if columns.len() != 1 + ns_count {
                        return Err(MappingGenError::format(number, "wrong CLASS column count"));
                    }
                    builder.add_class(&columns[1..]).map_err(located)?;
                }
                "FIELD" | "METHOD" => {
                    if columns.len() != 3 + ns_count {
                        return Err(MappingGenError::format(
                            number,
                            format!("wrong {} column count", columns[0]),
                        ));
                    }
                    let kind = if columns[0] == "FIELD" {
                        MemberKind::Field
                    } else {
                        MemberKind::Method
                    };
                    let owner = builder.ensure_class(columns[1]);
                    builder
                        .add_member(owner, kind, columns[2], &columns[3..])
                        .map_err(located)?;
                }
                other => {
                    return Err(MappingGenError::format(
                        number,
                        format!("unknown entry kind `{other}`"),
                    ));
                }
            }
        }

        let tree = builder.build();
        tracing::debug!(
            "loaded tiny v1 mapping: {} classes, {} members",
            tree.len(),
            tree.member_count()
        );
        Ok(tree)
    }
}

/// Writes an [`OutputTree`] as Tiny v1.
pub struct TinyV1Writer<W> {
    writer: W,
}

impl<W: Write> TinyV1Writer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MappingSink for TinyV1Writer<W> {
    fn accept(&mut self, tree: &OutputTree) -> Result<usize> {
        let mut out = String::new();
        out.push_str(&format!(
            "{HEADER}\t{}\t{}\n",
            tree.src_namespace(),
            tree.dst_namespace()
        ));

        for class in tree.classes() {
            if let Some(dst) = class.dst_name() {
                out.push_str(&format!("CLASS\t{}\t{}\n", class.name(), dst));
            }
            for (kind, tag) in [(MemberKind::Field, "FIELD"), (MemberKind::Method, "METHOD")] {
                for (name, desc, dst) in class.members(kind) {
                    out.push_str(&format!(
                        "{tag}\t{}\t{desc}\t{name}\t{dst}\n",
                        class.name()
                    ));
                }
            }
        }

        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;
        Ok(out.len())
    }
}
