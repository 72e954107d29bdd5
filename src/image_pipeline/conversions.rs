//! Pipeline conversions module
//!
//! This module contains orchestration logic from board readout to image files.

mod readout_to_tiff;


pub use readout_to_tiff::ReadoutPipeline;
