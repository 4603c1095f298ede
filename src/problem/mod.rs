// Program wide top-level error presentation

mod format;
mod present;

// Re-export all public symbols
pub use format::*;
pub use present::*;
