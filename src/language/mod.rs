// Types describing discovered test suites and their results

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
