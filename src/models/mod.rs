//! Core data models for match aggregation.

mod match_record;
mod outcome;
mod player;
mod registry;
mod stats;

pub use match_record::*;
pub use outcome::*;
pub use player::*;
pub use registry::*;
pub use stats::*;
