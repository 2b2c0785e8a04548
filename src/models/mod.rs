//! Raw stats responses and the dashboard entities derived from them.

pub mod dashboard;
pub mod stats;
