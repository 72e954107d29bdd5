use thiserror::Error;

use crate::image_pipeline::sensor::{Feature, SensorModel};

#[derive(Error, Debug)]
pub enum ReadoutError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode capture stream: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error(
        "Raw capture holds {actual} samples, expected {expected} \
         (nframes={nframes}, height={height}, width={width})"
    )]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        nframes: usize,
        height: usize,
        width: usize,
    },

    #[error("Width {width} is not divisible into column groups of {group_width}")]
    InvalidGeometry { width: usize, group_width: usize },

    #[error("Paired readout needs a non-zero even frame count, got {0}")]
    InvalidFrameCount(usize),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid row window {first}..={last} for a sensor with {max_height} rows")]
    InvalidRowWindow {
        first: usize,
        last: usize,
        max_height: usize,
    },

    #[error("{feature} is not supported by the {sensor} sensor")]
    Unsupported {
        sensor: SensorModel,
        feature: Feature,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Register access failed: {0}")]
    RegisterError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReadoutError>;
