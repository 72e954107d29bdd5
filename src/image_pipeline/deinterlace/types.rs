//! Types produced by readout reconstruction

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::shape::check_sample_count;

/// A spatially ordered image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedFrame {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Samples widened from the sensor's native 16 bits
    pub data: Vec<i32>,
}

impl ReconstructedFrame {
    pub fn new(height: usize, width: usize, data: Vec<i32>) -> Result<Self> {
        check_sample_count(data.len(), 1, height, width)?;
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Widens one subframe of native samples without reordering.
    pub fn from_samples(samples: &[u16], height: usize, width: usize) -> Result<Self> {
        Self::new(height, width, samples.iter().map(|&v| i32::from(v)).collect())
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.height && col < self.width {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }
}

/// A contiguous slice of columns cut from one subframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    /// Position of the group within its frame, counted from the left
    pub index: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<i32>,
}

impl ColumnGroup {
    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }
}

/// How a non-paired readout is split into images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Columns {
    /// One full-width image per frame
    #[default]
    Single,
    /// Left and right hemispheres become separate images
    Hemispheres,
}

/// Row interlacing factor per hemisphere; `0` means no interlacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interlacing {
    pub hemisphere_a: usize,
    pub hemisphere_b: usize,
}

impl Interlacing {
    pub const NONE: Interlacing = Interlacing {
        hemisphere_a: 0,
        hemisphere_b: 0,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn is_symmetric(&self) -> bool {
        self.hemisphere_a == self.hemisphere_b
    }
}
