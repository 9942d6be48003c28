//! Completion configuration, results and progress reporting.

pub mod callback;
pub mod config;
pub mod result;

// Re-export completion components
pub use callback::*;
pub use config::*;
pub use result::*;
