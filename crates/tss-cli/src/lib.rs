//! CLI library components for the system file inspector.

pub mod logging;
pub mod summary;
