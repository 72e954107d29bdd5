use tracing::{debug, info, warn};

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::common::shape::sample_count;
use crate::image_pipeline::deinterlace::{
    Columns, Interlacing, ReconstructedFrame, partition, reconstruct,
};
use crate::image_pipeline::raw::{RawCapture, RowWindow, assemble_capture};
use crate::image_pipeline::sensor::model::{
    Board, Capabilities, ReadoutTopology, SensorGeometry, SensorModel,
};

/// A sensor model bound to its geometry and carrier board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    model: SensorModel,
    geometry: SensorGeometry,
    board: Board,
}

impl Sensor {
    pub fn new(model: SensorModel) -> Result<Self> {
        Self::with_geometry(model, model.geometry())
    }

    /// Builds a sensor with non-default geometry, rejecting inconsistent layouts.
    pub fn with_geometry(model: SensorModel, geometry: SensorGeometry) -> Result<Self> {
        geometry.validate()?;
        info!(sensor = %model, "Initializing sensor object");
        Ok(Self {
            model,
            geometry,
            board: Board::default(),
        })
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn geometry(&self) -> &SensorGeometry {
        &self.geometry
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn capabilities(&self) -> Capabilities {
        self.model.capabilities()
    }

    /// Cuts a decoded stream into this sensor's frames.
    pub fn assemble(
        &self,
        samples: Vec<u16>,
        window: RowWindow,
        pad_to_full: bool,
    ) -> Result<RawCapture> {
        assemble_capture(samples, &self.geometry, window, pad_to_full)
    }

    /// Reorders a capture into images according to the sensor's readout topology.
    ///
    /// Column-interleaved sensors yield a single image spanning every subframe
    /// pair. Partitioned sensors yield one image per frame, or per hemisphere
    /// when `columns` asks for it.
    pub fn parse_readoff(
        &self,
        capture: &RawCapture,
        columns: Columns,
    ) -> Result<Vec<ReconstructedFrame>> {
        if capture.nframes != self.geometry.nframes || capture.width != self.geometry.width {
            return Err(ReadoutError::ShapeMismatch {
                expected: sample_count(self.geometry.nframes, capture.height, self.geometry.width)
                    .unwrap_or(usize::MAX),
                actual: capture.samples.len(),
                nframes: self.geometry.nframes,
                height: capture.height,
                width: self.geometry.width,
            });
        }
        debug!(sensor = %self.model, ?columns, "parseReadoff");

        match self.geometry.topology {
            ReadoutTopology::ColumnInterleave { group_width } => {
                if columns == Columns::Hemispheres {
                    warn!(
                        sensor = %self.model,
                        "Interleaved readout has no hemisphere images, returning the full image"
                    );
                }
                let frame = reconstruct(
                    &capture.samples,
                    capture.height,
                    capture.width,
                    capture.nframes,
                    group_width,
                )?;
                Ok(vec![frame])
            }
            ReadoutTopology::Partition => {
                let frames = capture
                    .frames()
                    .map(|f| ReconstructedFrame::from_samples(f, capture.height, capture.width))
                    .collect::<Result<Vec<_>>>()?;
                partition(frames, columns, Interlacing::NONE)
            }
        }
    }
}
