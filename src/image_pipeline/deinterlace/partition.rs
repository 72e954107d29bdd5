//! Column partitioning for readouts that need no cross-frame interleave.
//!
//! Frames are optionally cut into left/right hemispheres, and hemispheres
//! recorded with row interlacing are unshuffled into one image per interlaced
//! sub-exposure.

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::deinterlace::types::{Columns, Interlacing, ReconstructedFrame};

/// Splits a frame into its left and right halves.
fn split_hemispheres(
    frame: &ReconstructedFrame,
) -> Result<(ReconstructedFrame, ReconstructedFrame)> {
    if frame.width % 2 != 0 {
        return Err(ReadoutError::InvalidDimensions(frame.width, frame.height));
    }
    let half = frame.width / 2;
    let mut left = Vec::with_capacity(frame.height * half);
    let mut right = Vec::with_capacity(frame.height * half);
    for row in frame.rows() {
        left.extend_from_slice(&row[..half]);
        right.extend_from_slice(&row[half..]);
    }
    Ok((
        ReconstructedFrame::new(frame.height, half, left)?,
        ReconstructedFrame::new(frame.height, half, right)?,
    ))
}

/// Separates row-interlaced sub-images.
///
/// With factor `k`, line `n` of sub-image `s` is row `(k + 1) * n + s` of the
/// source. Output is grouped by sub-image: every frame's sub-image 0, then
/// every frame's sub-image 1, and so on.
fn unshuffle(frames: Vec<ReconstructedFrame>, factor: usize) -> Result<Vec<ReconstructedFrame>> {
    if factor == 0 {
        return Ok(frames);
    }
    let step = factor + 1;
    let Some(first) = frames.first() else {
        return Ok(frames);
    };

    let new_height = first.height / step;
    if new_height == 0 {
        return Err(ReadoutError::InvalidDimensions(first.width, first.height));
    }
    if new_height * step != first.height {
        warn!(
            "Interlacing factor {} drops {} lines to keep frame sizes consistent",
            factor,
            first.height - new_height * step
        );
    }

    let mut resorted = Vec::with_capacity(frames.len() * step);
    for sub in 0..step {
        for frame in &frames {
            let mut data = Vec::with_capacity(new_height * frame.width);
            for line in 0..new_height {
                data.extend_from_slice(frame.row(step * line + sub));
            }
            resorted.push(ReconstructedFrame::new(new_height, frame.width, data)?);
        }
    }
    Ok(resorted)
}

/// Partitions frames into images per `columns` and `interlacing`.
///
/// Asymmetric interlacing always yields hemisphere images, whatever `columns`
/// asks for.
pub fn partition(
    frames: Vec<ReconstructedFrame>,
    columns: Columns,
    interlacing: Interlacing,
) -> Result<Vec<ReconstructedFrame>> {
    let columns = if interlacing.is_symmetric() {
        columns
    } else {
        Columns::Hemispheres
    };
    debug!(
        "partition: columns = {:?}, interlacing = {:?}",
        columns, interlacing
    );

    if let Some(frame) = frames.iter().skip(1).find(|f| {
        f.height != frames[0].height || f.width != frames[0].width
    }) {
        return Err(ReadoutError::InvalidDimensions(frame.width, frame.height));
    }

    match columns {
        Columns::Single => unshuffle(frames, interlacing.hemisphere_a),
        Columns::Hemispheres => {
            let mut hemis_a = Vec::with_capacity(frames.len());
            let mut hemis_b = Vec::with_capacity(frames.len());
            for frame in &frames {
                let (a, b) = split_hemispheres(frame)?;
                hemis_a.push(a);
                hemis_b.push(b);
            }
            let mut images = unshuffle(hemis_a, interlacing.hemisphere_a)?;
            images.extend(unshuffle(hemis_b, interlacing.hemisphere_b)?);
            Ok(images)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(height: usize, width: usize, base: i32) -> ReconstructedFrame {
        let data = (0..(height * width) as i32).map(|v| base + v).collect();
        ReconstructedFrame::new(height, width, data).unwrap()
    }

    #[test]
    fn test_single_column_passthrough() {
        let frames = vec![frame(2, 4, 0), frame(2, 4, 100)];
        let images = partition(frames.clone(), Columns::Single, Interlacing::NONE).unwrap();
        assert_eq!(images, frames);
    }

    #[test]
    fn test_hemispheres_left_then_right() {
        let frames = vec![frame(2, 4, 0), frame(2, 4, 100)];
        let images = partition(frames, Columns::Hemispheres, Interlacing::NONE).unwrap();

        assert_eq!(images.len(), 4);
        assert_eq!(images[0].data, vec![0, 1, 4, 5]);
        assert_eq!(images[1].data, vec![100, 101, 104, 105]);
        assert_eq!(images[2].data, vec![2, 3, 6, 7]);
        assert_eq!(images[3].data, vec![102, 103, 106, 107]);
    }

    #[test]
    fn test_odd_width_hemispheres_rejected() {
        let result = partition(vec![frame(2, 3, 0)], Columns::Hemispheres, Interlacing::NONE);
        assert!(matches!(result, Err(ReadoutError::InvalidDimensions(3, 2))));
    }

    #[test]
    fn test_unshuffle_groups_by_sub_image() {
        // 4 rows of width 1: rows 0,2 belong to sub-image 0, rows 1,3 to sub-image 1
        let frames = vec![frame(4, 1, 0), frame(4, 1, 10)];
        let interlacing = Interlacing {
            hemisphere_a: 1,
            hemisphere_b: 1,
        };
        let images = partition(frames, Columns::Single, interlacing).unwrap();

        assert_eq!(images.len(), 4);
        assert_eq!(images[0].data, vec![0, 2]);
        assert_eq!(images[1].data, vec![10, 12]);
        assert_eq!(images[2].data, vec![1, 3]);
        assert_eq!(images[3].data, vec![11, 13]);
    }

    #[test]
    fn test_unshuffle_drops_remainder_lines() {
        let interlacing = Interlacing {
            hemisphere_a: 1,
            hemisphere_b: 1,
        };
        let images = partition(vec![frame(5, 1, 0)], Columns::Single, interlacing).unwrap();

        assert_eq!(images[0].height, 2);
        assert_eq!(images[0].data, vec![0, 2]);
        assert_eq!(images[1].data, vec![1, 3]);
    }

    #[test]
    fn test_asymmetric_interlacing_forces_hemispheres() {
        let interlacing = Interlacing {
            hemisphere_a: 1,
            hemisphere_b: 0,
        };
        let images = partition(vec![frame(2, 2, 0)], Columns::Single, interlacing).unwrap();

        // hemisphere A unshuffled into two 1-row images, hemisphere B kept whole
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].data, vec![0]);
        assert_eq!(images[1].data, vec![2]);
        assert_eq!(images[2].data, vec![1, 3]);
    }

    #[test]
    fn test_mixed_frame_sizes_rejected() {
        let result = partition(
            vec![frame(2, 2, 0), frame(3, 2, 0)],
            Columns::Single,
            Interlacing::NONE,
        );
        assert!(result.is_err());
    }
}
