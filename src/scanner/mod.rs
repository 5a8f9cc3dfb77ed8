//! Tree scanning and destination lookups

mod lookup;
mod walker;

pub use lookup::{dir_exists, lookup_file};
pub use walker::{scan_tree, ScanItem, TreeScanner};
