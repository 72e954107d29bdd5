//! Capture reader for the ASCII hex stream returned by the board.
//!
//! The board answers an SRAM read with a text packet: a fixed-size header
//! followed by the pixel payload, each 16-bit sample spelled as four hex digits,
//! most significant digit first.

use tracing::debug;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::raw::reader::CaptureReader;

/// Length of the packet header preceding the payload, in characters.
pub const DEFAULT_HEADER_CHARS: usize = 32;

/// Hex digits used to spell one sample.
const DIGITS_PER_SAMPLE: usize = 4;

/// Reader for hex-encoded readout packets.
#[derive(Debug, Clone, Copy)]
pub struct HexCaptureReader {
    /// Number of leading characters to discard before the payload
    pub header_chars: usize,
}

impl Default for HexCaptureReader {
    fn default() -> Self {
        Self {
            header_chars: DEFAULT_HEADER_CHARS,
        }
    }
}

impl HexCaptureReader {
    /// Reader for payloads that carry no header, e.g. previously dumped streams.
    pub fn headerless() -> Self {
        Self { header_chars: 0 }
    }
}

fn hex_value(digit: u8) -> Option<u16> {
    match digit {
        b'0'..=b'9' => Some((digit - b'0') as u16),
        b'a'..=b'f' => Some((digit - b'a' + 10) as u16),
        b'A'..=b'F' => Some((digit - b'A' + 10) as u16),
        _ => None,
    }
}

impl CaptureReader for HexCaptureReader {
    /// Decodes the payload of a hex readout packet into samples.
    ///
    /// # Arguments
    ///
    /// * `data` - The full packet text, header included
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u16>)` - One entry per four hex digits of payload
    /// * `Err(ReadoutError::DecodeError)` - Short packet, non-hex digit or a
    ///   trailing partial sample
    fn read_capture(&self, data: &[u8]) -> Result<Vec<u16>> {
        if data.len() < self.header_chars {
            return Err(ReadoutError::DecodeError(format!(
                "packet of {} chars is shorter than its {} char header",
                data.len(),
                self.header_chars
            )));
        }

        let payload = data[self.header_chars..].trim_ascii_end();
        debug!("Decoding hex payload, {} chars", payload.len());

        if payload.len() % DIGITS_PER_SAMPLE != 0 {
            return Err(ReadoutError::DecodeError(format!(
                "payload length {} is not a whole number of samples",
                payload.len()
            )));
        }

        payload
            .chunks_exact(DIGITS_PER_SAMPLE)
            .enumerate()
            .map(|(index, chunk)| {
                chunk.iter().try_fold(0u16, |acc, &digit| {
                    hex_value(digit).map(|v| (acc << 4) | v).ok_or_else(|| {
                        ReadoutError::DecodeError(format!(
                            "invalid hex digit {:?} in sample {}",
                            digit as char, index
                        ))
                    })
                })
            })
            .collect()
    }
}
