#[macro_use]
pub mod output;

// Running
mod machine;
pub use machine::{Instruction, Machine, MachineError, MachineErrorKind, Mode, Opcode, Step, Word};
mod network;
pub use network::{FeedbackNetwork, Topology};
pub mod search;

// Loading
pub mod image;
mod phases;
pub use phases::Phases;

mod error;
mod span;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 8;
