//! Transport implementations

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::{ConsoleStream, ConsoleTransport};
pub use memory::MemoryTransport;

pub use crate::core::Transport;
