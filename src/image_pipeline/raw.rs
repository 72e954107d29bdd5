//! Raw capture module
//!
//! This module turns the board's readout stream into frame-major sample buffers.

mod assemble;
mod binary_reader;
mod hex_reader;
mod reader;
pub mod types;

pub use assemble::assemble_capture;
pub use binary_reader::BinaryCaptureReader;
pub use hex_reader::{DEFAULT_HEADER_CHARS, HexCaptureReader};
pub use reader::CaptureReader;
pub use types::{RawCapture, RowWindow};
