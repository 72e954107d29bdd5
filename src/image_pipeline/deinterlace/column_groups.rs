use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::deinterlace::types::{ColumnGroup, ReconstructedFrame};

pub(crate) fn check_group_width(width: usize, group_width: usize) -> Result<()> {
    if group_width == 0 || width % group_width != 0 {
        return Err(ReadoutError::InvalidGeometry { width, group_width });
    }
    Ok(())
}

/// Cuts `frame` into `width / group_width` column groups, left to right.
pub fn split_column_groups(
    frame: &ReconstructedFrame,
    group_width: usize,
) -> Result<Vec<ColumnGroup>> {
    check_group_width(frame.width, group_width)?;

    let groups = (0..frame.width / group_width)
        .map(|index| {
            let start = index * group_width;
            let data = frame
                .rows()
                .flat_map(|row| row[start..start + group_width].iter().copied())
                .collect();
            ColumnGroup {
                index,
                height: frame.height,
                width: group_width,
                data,
            }
        })
        .collect();

    Ok(groups)
}

/// Places `groups` side by side in the order given.
pub fn concat_column_groups(groups: &[ColumnGroup]) -> Result<ReconstructedFrame> {
    let Some(first) = groups.first() else {
        return Err(ReadoutError::InvalidDimensions(0, 0));
    };
    let height = first.height;
    if let Some(bad) = groups.iter().find(|g| g.height != height) {
        return Err(ReadoutError::InvalidDimensions(bad.width, bad.height));
    }

    let width: usize = groups.iter().map(|g| g.width).sum();
    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        for group in groups {
            data.extend_from_slice(group.row(row));
        }
    }

    ReconstructedFrame::new(height, width, data)
}

/// Interleaves the column groups of one subframe pair: `A0 B0 A1 B1 ...`.
pub fn interleave_pair(
    a: &ReconstructedFrame,
    b: &ReconstructedFrame,
    group_width: usize,
) -> Result<ReconstructedFrame> {
    if a.height != b.height || a.width != b.width {
        return Err(ReadoutError::ShapeMismatch {
            expected: a.data.len(),
            actual: b.data.len(),
            nframes: 2,
            height: a.height,
            width: a.width,
        });
    }

    let groups_a = split_column_groups(a, group_width)?;
    let groups_b = split_column_groups(b, group_width)?;
    let interleaved: Vec<ColumnGroup> = groups_a
        .into_iter()
        .zip(groups_b)
        .flat_map(|(ga, gb)| [ga, gb])
        .collect();

    concat_column_groups(&interleaved)
}

/// Joins frames of equal height along the column axis.
pub fn hconcat(frames: &[ReconstructedFrame]) -> Result<ReconstructedFrame> {
    let groups: Vec<ColumnGroup> = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| ColumnGroup {
            index,
            height: frame.height,
            width: frame.width,
            data: frame.data.clone(),
        })
        .collect();
    concat_column_groups(&groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(height: usize, width: usize) -> ReconstructedFrame {
        let data = (0..(height * width) as i32).collect();
        ReconstructedFrame::new(height, width, data).unwrap()
    }

    #[test]
    fn test_split_then_concat_is_identity() {
        let frame = ramp(3, 12);
        for group_width in [1, 2, 3, 4, 6, 12] {
            let groups = split_column_groups(&frame, group_width).unwrap();
            assert_eq!(groups.len(), 12 / group_width);
            assert_eq!(concat_column_groups(&groups).unwrap(), frame);
        }
    }

    #[test]
    fn test_split_group_contents() {
        let frame = ramp(2, 4);
        let groups = split_column_groups(&frame, 2).unwrap();

        assert_eq!(groups[0].data, vec![0, 1, 4, 5]);
        assert_eq!(groups[1].data, vec![2, 3, 6, 7]);
        assert_eq!(groups[1].index, 1);
    }

    #[test]
    fn test_split_rejects_uneven_groups() {
        let frame = ramp(2, 10);
        assert!(matches!(
            split_column_groups(&frame, 4),
            Err(ReadoutError::InvalidGeometry {
                width: 10,
                group_width: 4
            })
        ));
        assert!(split_column_groups(&frame, 0).is_err());
    }

    #[test]
    fn test_concat_rejects_ragged_heights() {
        let groups = vec![
            ColumnGroup {
                index: 0,
                height: 2,
                width: 1,
                data: vec![0, 0],
            },
            ColumnGroup {
                index: 1,
                height: 3,
                width: 1,
                data: vec![0, 0, 0],
            },
        ];
        assert!(concat_column_groups(&groups).is_err());
        assert!(concat_column_groups(&[]).is_err());
    }

    #[test]
    fn test_interleave_pair() {
        let a = ReconstructedFrame::new(1, 4, vec![1, 2, 3, 4]).unwrap();
        let b = ReconstructedFrame::new(1, 4, vec![5, 6, 7, 8]).unwrap();

        let pair = interleave_pair(&a, &b, 2).unwrap();
        assert_eq!(pair.width, 8);
        assert_eq!(pair.data, vec![1, 2, 5, 6, 3, 4, 7, 8]);
    }

    #[test]
    fn test_interleave_pair_shape_mismatch() {
        let a = ramp(2, 4);
        let b = ramp(2, 6);
        assert!(matches!(
            interleave_pair(&a, &b, 2),
            Err(ReadoutError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_hconcat() {
        let a = ReconstructedFrame::new(2, 1, vec![1, 2]).unwrap();
        let b = ReconstructedFrame::new(2, 2, vec![3, 4, 5, 6]).unwrap();

        let joined = hconcat(&[a, b]).unwrap();
        assert_eq!(joined.width, 3);
        assert_eq!(joined.data, vec![1, 3, 4, 2, 5, 6]);
    }
}
