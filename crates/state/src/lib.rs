//! Owner table and per-tick activity mirrors shared by every simulation rank.
//!
//! The [`OwnerTable`] is built once by the partitioner and disseminated
//! read-only to every worker. The [`Mirror`] is the transient per-tick cache
//! each worker keeps of the latest known activity level of *every* neuron in
//! the population, including ones it does not own.

pub mod mirror;
pub mod owner_table;

pub use mirror::Mirror;
pub use owner_table::{OwnerTable, OwnerTableError};

/// Sentinel used throughout the mesh for "not yet known this tick".
pub const UNKNOWN: i32 = -1;
