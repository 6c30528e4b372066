//! Batch and interactive drivers around an [`Interpreter`].
//!
//! ## State machine
//!
//! ```text
//! Ready --(line changed output)--> Dirty --(dmp)--> Ready
//! Dirty --(bye)--> Dirty (warning)
//! Ready --(bye / end of input)--> Terminated
//! ```

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use super::interpreter::Interpreter;
use super::parse::Command;
use crate::config::{EngineConfig, SessionConfig};
use crate::error::{MappingGenError, Result};
use crate::tree::{MappingSink, MappingTree, OutputTree, TinyV1Writer};

const BANNER: &str = "You're entering interaction mode.";
const UNSAVED_WARNING: &str = "WARNING: there are things not saved";
const FAREWELL: &str = "Bye~";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing unsaved.
    Ready,
    /// The output tree changed since the last dump.
    Dirty,
    Terminated,
}

/// Drives command lines through an interpreter.
#[derive(Debug)]
pub struct Session<'a> {
    interpreter: Interpreter<'a>,
    config: SessionConfig,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(tree: &'a MappingTree, engine: &EngineConfig, config: SessionConfig) -> Result<Self> {
        Ok(Self {
            interpreter: Interpreter::new(tree, engine)?,
            config,
            state: SessionState::Ready,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn interpreter(&self) -> &Interpreter<'a> {
        &self.interpreter
    }

    pub fn output(&self) -> &OutputTree {
        self.interpreter.output()
    }

    /// Parse and execute one command line.
    ///
    /// The session turns dirty whenever the line wrote to the output tree,
    /// even if it failed afterwards.
    pub fn execute_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> Result<usize> {
        let before = self.interpreter.emitted();
        let result = Command::parse(line).and_then(|command| self.interpreter.execute(&command, out));
        if self.interpreter.emitted() != before && self.state == SessionState::Ready {
            self.state = SessionState::Dirty;
        }
        result
    }

    // ========================================================================
    // BATCH
    // ========================================================================

    /// Execute every line of `input` and serialize the output tree into `sink`.
    ///
    /// Stops at the first failing line, echoing it as `ERROR: ...`; nothing is
    /// serialized in that case. Returns the number of bytes the sink wrote.
    pub fn run_batch<R, W, S>(&mut self, input: R, out: &mut W, sink: S) -> Result<usize>
    where
        R: BufRead,
        W: Write + ?Sized,
        S: MappingSink,
    {
        let mut executed = 0usize;
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Err(err) = self.execute_line(line, out) {
                writeln!(out, "ERROR: {err}")?;
                return Err(err.at_line(index + 1, line));
            }
            executed += 1;
        }

        let written = self.dump(sink)?;
        tracing::info!("batch finished: {} commands, {} bytes written", executed, written);
        Ok(written)
    }

    // ========================================================================
    // INTERACTIVE
    // ========================================================================

    /// Read-eval loop until `bye` or end of input.
    ///
    /// Per-line failures, undecodable lines included, are echoed and never end
    /// the session. Only I/O faults on `input`, on `out` or while writing a
    /// dump are returned.
    pub fn run_interactive<R, W>(&mut self, mut input: R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        write!(out, "{BANNER}\n{}", self.config.prompt)?;
        out.flush()?;

        let mut buf = Vec::new();
        while self.state != SessionState::Terminated {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                if self.state == SessionState::Dirty {
                    tracing::warn!("input ended with unsaved mappings");
                }
                self.state = SessionState::Terminated;
                break;
            }
            let Ok(line) = std::str::from_utf8(&buf) else {
                let err = MappingGenError::syntax(format!(
                    "Line is not valid UTF-8: {}",
                    String::from_utf8_lossy(&buf).trim()
                ));
                self.report(&err, out)?;
                write!(out, "{}", self.config.prompt)?;
                out.flush()?;
                continue;
            };
            let line = line.trim();

            match line.split_whitespace().next() {
                None => {}
                Some("bye") => self.bye(out)?,
                Some("dmp") => {
                    let path = line["dmp".len()..].trim();
                    self.dump_command((!path.is_empty()).then_some(path), out)?;
                }
                Some(_) => {
                    if let Err(err) = self.execute_line(line, out) {
                        self.report(&err, out)?;
                    }
                }
            }

            if self.state != SessionState::Terminated {
                write!(out, "{}", self.config.prompt)?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn bye<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        if self.state == SessionState::Dirty {
            writeln!(out, "{UNSAVED_WARNING}")?;
        } else {
            writeln!(out, "{FAREWELL}")?;
            self.state = SessionState::Terminated;
        }
        Ok(())
    }

    fn dump_command<W: Write + ?Sized>(&mut self, path: Option<&str>, out: &mut W) -> Result<()> {
        let Some(path) = path.map(PathBuf::from).or_else(|| self.config.output_path.clone()) else {
            return self.report(&MappingGenError::NoOutputPath, out);
        };
        let file = match File::create(&path) {
            Ok(file) => file,
            Err(err) => return self.report(&MappingGenError::Io(err), out),
        };
        let written = self.dump(TinyV1Writer::new(BufWriter::new(file)))?;
        tracing::info!("dumped {} bytes to {}", written, path.display());
        Ok(())
    }

    /// Serialize the output tree into `sink`, clearing the dirty flag.
    pub fn dump<S: MappingSink>(&mut self, mut sink: S) -> Result<usize> {
        let written = sink.accept(self.interpreter.output())?;
        if self.state == SessionState::Dirty {
            self.state = SessionState::Ready;
        }
        Ok(written)
    }

    fn report<W: Write + ?Sized>(&self, err: &MappingGenError, out: &mut W) -> Result<()> {
        writeln!(out, "ERROR: {}", truncate(&err.to_string(), self.config.max_error_len))?;
        Ok(())
    }
}

/// Cut `message` to `max` characters, marking the cut with `...`.
fn truncate(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}
