//! # treemirror - One-way periodic directory mirroring
//!
//! Copies files that are new or newer at the source onto the destination,
//! then waits and does it again. Nothing is ever deleted.

pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod logging;
pub mod scanner;
pub mod schedule;
pub mod types;

// Re-export commonly used types
pub use commands::sync::{run_pass, PassReport};
pub use config::Config;
pub use types::{FileRecord, MirrorError, ScanResult, SyncDecision};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
