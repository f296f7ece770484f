//! Shared data models for ingestion and aggregation

mod cell;
mod filter;
mod record;
mod stats;

pub use cell::*;
pub use filter::*;
pub use record::*;
pub use stats::*;
