//! Splits a decoded sample stream into per-frame buffers.
//!
//! The board only ships the rows inside the programmed row window. With
//! `pad_to_full` the missing rows are restored as zeros so every frame keeps
//! the full sensor height.

use tracing::debug;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::common::shape::{check_sample_count, sample_count};
use crate::image_pipeline::raw::types::{RawCapture, RowWindow};
use crate::image_pipeline::sensor::SensorGeometry;

pub fn assemble_capture(
    samples: Vec<u16>,
    geometry: &SensorGeometry,
    window: RowWindow,
    pad_to_full: bool,
) -> Result<RawCapture> {
    let width = geometry.width;
    let max_height = geometry.height;
    // Windows built as struct literals skip `RowWindow::new`
    let window = RowWindow::new(window.first, window.last, max_height)?;

    let rows = window.rows();
    check_sample_count(samples.len(), geometry.nframes, rows, width)?;
    let frame_len = rows * width;

    if !pad_to_full || window.is_full(max_height) {
        return RawCapture::new(samples, geometry.nframes, rows, width);
    }

    let top = window.first * width;
    let bottom = (max_height - 1 - window.last) * width;
    debug!(
        "Padding {} frames with {} top and {} bottom rows",
        geometry.nframes,
        window.first,
        max_height - 1 - window.last
    );

    let full_len = sample_count(geometry.nframes, max_height, width).ok_or(
        ReadoutError::InvalidDimensions(width, max_height),
    )?;
    let mut padded = Vec::with_capacity(full_len);
    for frame in samples.chunks_exact(frame_len) {
        padded.resize(padded.len() + top, 0);
        padded.extend_from_slice(frame);
        padded.resize(padded.len() + bottom, 0);
    }

    RawCapture::new(padded, geometry.nframes, max_height, width)
}
