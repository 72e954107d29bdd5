//! Raw capture data types

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::common::shape::check_sample_count;

/// One readout cycle of samples as delivered by the board, frame-major.
#[derive(Debug, Clone)]
pub struct RawCapture {
    /// Number of physically captured subframes
    pub nframes: usize,
    /// Rows per subframe
    pub height: usize,
    /// Columns per subframe
    pub width: usize,
    /// Native 16-bit samples, `nframes * height * width` long
    pub samples: Vec<u16>,
}

impl RawCapture {
    pub fn new(samples: Vec<u16>, nframes: usize, height: usize, width: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReadoutError::InvalidDimensions(width, height));
        }

        check_sample_count(samples.len(), nframes, height, width)?;

        Ok(Self {
            nframes,
            height,
            width,
            samples,
        })
    }

    pub fn frame_len(&self) -> usize {
        self.height * self.width
    }

    /// Row-major samples of subframe `index`.
    pub fn frame(&self, index: usize) -> Option<&[u16]> {
        let len = self.frame_len();
        self.samples.get(index * len..(index + 1) * len)
    }

    pub fn frames(&self) -> impl Iterator<Item = &[u16]> {
        self.samples.chunks_exact(self.frame_len())
    }
}

/// Inclusive range of sensor rows read off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub first: usize,
    pub last: usize,
}

impl RowWindow {
    pub fn new(first: usize, last: usize, max_height: usize) -> Result<Self> {
        if first > last || last >= max_height {
            return Err(ReadoutError::InvalidRowWindow {
                first,
                last,
                max_height,
            });
        }
        Ok(Self { first, last })
    }

    pub fn full(max_height: usize) -> Self {
        Self {
            first: 0,
            last: max_height.saturating_sub(1),
        }
    }

    /// Number of rows in the window; zero for an inverted window.
    pub fn rows(&self) -> usize {
        self.last.checked_sub(self.first).map_or(0, |span| span.saturating_add(1))
    }

    pub fn is_full(&self, max_height: usize) -> bool {
        self.first == 0 && self.last.checked_add(1) == Some(max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_length_mismatch() {
        let result = RawCapture::new(vec![0u16; 2 * 4 * 4 - 1], 2, 4, 4);
        match result {
            Err(ReadoutError::ShapeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 32);
                assert_eq!(actual, 31);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_capture_frames() {
        let samples: Vec<u16> = (0..24).collect();
        let capture = RawCapture::new(samples, 3, 2, 4).unwrap();

        assert_eq!(capture.frames().count(), 3);
        assert_eq!(capture.frame(1).unwrap(), &[8, 9, 10, 11, 12, 13, 14, 15]);
        assert!(capture.frame(3).is_none());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = RawCapture::new(Vec::new(), 2, 0, 4);
        assert!(matches!(result, Err(ReadoutError::InvalidDimensions(4, 0))));
    }

    #[test]
    fn test_row_window() {
        let window = RowWindow::new(10, 19, 1024).unwrap();
        assert_eq!(window.rows(), 10);
        assert!(!window.is_full(1024));
        assert!(RowWindow::full(1024).is_full(1024));

        assert!(RowWindow::new(20, 19, 1024).is_err());
        assert_eq!(RowWindow { first: 5, last: 2 }.rows(), 0);
        assert!(RowWindow::new(0, 1024, 1024).is_err());
    }
}
