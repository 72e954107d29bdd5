//! Common utilities module
//!
//! This module contains shared utilities used across the readout pipeline.

pub mod error;
pub mod shape;

pub use error::{ReadoutError, Result};
pub use shape::{check_sample_count, sample_count};
