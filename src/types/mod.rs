//! Core type definitions for treemirror

mod decision;
mod error;
mod record;
mod scan;

pub use decision::SyncDecision;
pub use error::MirrorError;
pub use record::FileRecord;
pub use scan::ScanResult;
