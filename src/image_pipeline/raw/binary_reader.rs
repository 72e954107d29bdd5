use tracing::debug;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::raw::reader::CaptureReader;

/// Reader for payloads already converted to bytes, two big-endian bytes per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCaptureReader;

impl CaptureReader for BinaryCaptureReader {
    fn read_capture(&self, data: &[u8]) -> Result<Vec<u16>> {
        debug!("Decoding binary payload, {} bytes", data.len());

        if data.len() % 2 != 0 {
            return Err(ReadoutError::DecodeError(format!(
                "payload of {} bytes has a dangling half sample",
                data.len()
            )));
        }

        Ok(data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect())
    }
}
