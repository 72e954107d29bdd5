//! Readout reconstruction module
//!
//! This module reorders physically multiplexed sensor readout into spatially
//! coherent images.

mod column_groups;
mod partition;
mod reconstruct;
pub mod types;


pub use column_groups::{concat_column_groups, hconcat, interleave_pair, split_column_groups};
pub use partition::partition;
pub use reconstruct::reconstruct;
pub use types::{ColumnGroup, Columns, Interlacing, ReconstructedFrame};
