mod error;
mod renderer;
mod terminal;

pub use error::RuntimeError;
pub use renderer::{render, run};
pub use terminal::{TerminalSession, restore_terminal};
