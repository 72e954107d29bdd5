//! TIFF writing module
//!
//! This module provides TIFF file writing for reconstructed frames, with the
//! conversion configuration shared by the readout pipeline.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ConversionConfig, ConversionConfigBuilder};
