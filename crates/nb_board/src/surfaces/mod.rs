pub mod html;
pub mod memory;
pub mod terminal;

pub use html::HtmlSurface;
pub use memory::{MemoryControl, MemorySurface};
pub use terminal::{TerminalControl, TerminalSurface};
