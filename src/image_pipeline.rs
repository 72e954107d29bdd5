//! Readout pipeline module
//!
//! This module turns raw sensor readout into images, with separate modules for
//! capture ingestion, deinterlacing, sensor models, TIFF writing and
//! conversion orchestration.

pub mod common;
pub mod conversions;
pub mod deinterlace;
pub mod raw;
pub mod sensor;
pub mod tiff;

pub use common::{
    ReadoutError,
    Result,
};

pub use raw::{
    BinaryCaptureReader,
    CaptureReader,
    HexCaptureReader,
    RawCapture,
    RowWindow,
};

pub use deinterlace::{
    Columns,
    Interlacing,
    ReconstructedFrame,
    partition,
    reconstruct,
};

pub use sensor::{
    Board,
    Feature,
    RegisterBus,
    Sensor,
    SensorGeometry,
    SensorModel,
    TriggerLatch,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::{
    ReadoutPipeline,
};
