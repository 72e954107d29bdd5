//! Paired column-group deinterlacing.
//!
//! The sensor multiplexes its readout so that every pair of captured subframes
//! carries alternating column groups of one physical image. Undoing it means
//! taking group 0 of the first subframe, group 0 of the second, group 1 of the
//! first and so on. Successive pairs are laid side by side, rows untouched.

use tracing::debug;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::common::shape::check_sample_count;
use crate::image_pipeline::deinterlace::column_groups::check_group_width;
use crate::image_pipeline::deinterlace::types::ReconstructedFrame;

/// Rebuilds one wide image from a paired, column-interleaved capture.
///
/// # Arguments
///
/// * `raw` - `nframes * height * width` samples, frame-major then row-major
/// * `height` - Rows per subframe
/// * `width` - Columns per subframe
/// * `nframes` - Number of subframes; must be even
/// * `group_width` - Columns per multiplexed group; must divide `width`
///
/// # Returns
///
/// * `Ok(ReconstructedFrame)` - `height` rows by `nframes * width` columns
/// * `Err(ReadoutError::InvalidGeometry)` - `width` does not split into groups
/// * `Err(ReadoutError::InvalidFrameCount)` - `nframes` is odd or zero
/// * `Err(ReadoutError::ShapeMismatch)` - `raw` has the wrong length
pub fn reconstruct(
    raw: &[u16],
    height: usize,
    width: usize,
    nframes: usize,
    group_width: usize,
) -> Result<ReconstructedFrame> {
    check_group_width(width, group_width)?;

    if nframes == 0 || nframes % 2 != 0 {
        return Err(ReadoutError::InvalidFrameCount(nframes));
    }

    check_sample_count(raw.len(), nframes, height, width)?;

    let frame_len = height * width;
    let groups = width / group_width;
    let out_width = nframes * width;
    debug!(
        "Deinterlacing {} subframe pairs of {}x{} in {} groups of {} columns",
        nframes / 2,
        width,
        height,
        groups,
        group_width
    );

    let mut data = Vec::with_capacity(height * out_width);
    for row in 0..height {
        for pair in 0..nframes / 2 {
            let a = &raw[2 * pair * frame_len + row * width..][..width];
            let b = &raw[(2 * pair + 1) * frame_len + row * width..][..width];
            let groups_a = a.chunks_exact(group_width);
            for (group_a, group_b) in groups_a.zip(b.chunks_exact(group_width)) {
                data.extend(group_a.iter().map(|&v| i32::from(v)));
                data.extend(group_b.iter().map(|&v| i32::from(v)));
            }
        }
    }

    ReconstructedFrame::new(height, out_width, data)
}
