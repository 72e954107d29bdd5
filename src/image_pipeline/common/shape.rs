//! Sample-count arithmetic shared by every buffer constructor.

use crate::image_pipeline::common::error::{ReadoutError, Result};

/// `nframes * height * width`, or `None` when the product overflows `usize`.
pub fn sample_count(nframes: usize, height: usize, width: usize) -> Option<usize> {
    nframes.checked_mul(height)?.checked_mul(width)
}

/// Fails with `ShapeMismatch` unless `actual` equals `nframes * height * width`.
///
/// A geometry whose product overflows can never match a real buffer; it is
/// reported with `expected` saturated at `usize::MAX`.
pub fn check_sample_count(
    actual: usize,
    nframes: usize,
    height: usize,
    width: usize,
) -> Result<usize> {
    match sample_count(nframes, height, width) {
        Some(expected) if expected == actual => Ok(expected),
        expected => Err(ReadoutError::ShapeMismatch {
            expected: expected.unwrap_or(usize::MAX),
            actual,
            nframes,
            height,
            width,
        }),
    }
}
