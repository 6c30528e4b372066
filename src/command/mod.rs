//! Mapping commands and the sessions that run them.
//!
//! ```text
//! c  net.minecraft.Block              class
//! f  Block.hardness !!                field, Absent ignored
//! m  Stone.tick >> Block              method declared on Block, emitted for Stone too
//! fc Block.hardness                   class, then field
//! ```

mod interpreter;
mod parse;
mod session;

pub use interpreter::Interpreter;
pub use parse::{Command, Process};
pub use session::{Session, SessionState};
