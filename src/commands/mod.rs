//! Command implementations

pub mod daemon;
pub mod sync;
