//! Domain types shared by the handlers and the protocol layer.

mod operation;
mod outcome;

pub use operation::{Operation, OutputFormat, UnknownOperation};
pub use outcome::ToolOutcome;
