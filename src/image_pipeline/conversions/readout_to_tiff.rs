use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{ReadoutError, Result},
    deinterlace::ReconstructedFrame,
    raw::{CaptureReader, HexCaptureReader, RowWindow},
    sensor::Sensor,
    tiff::{ConversionConfig, StandardTiffWriter, TiffWriter},
};

/// Turns a board readout into TIFF images: decode, assemble frames,
/// reconstruct, encode.
pub struct ReadoutPipeline<R: CaptureReader, W: TiffWriter> {
    reader: R,
    writer: W,
    sensor: Sensor,
    config: ConversionConfig,
}

impl ReadoutPipeline<HexCaptureReader, StandardTiffWriter> {
    pub fn new(sensor: Sensor, config: ConversionConfig) -> Self {
        Self {
            reader: HexCaptureReader::default(),
            writer: StandardTiffWriter,
            sensor,
            config,
        }
    }
}

impl<R: CaptureReader, W: TiffWriter> ReadoutPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, sensor: Sensor, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            sensor,
            config,
        }
    }

    fn validate_dimensions(&self, frames: &[ReconstructedFrame]) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if frames.is_empty() {
            return Err(ReadoutError::InvalidDimensions(0, 0));
        }

        for frame in frames {
            if frame.width == 0 || frame.height == 0 {
                return Err(ReadoutError::InvalidDimensions(frame.width, frame.height));
            }
        }

        Ok(())
    }

    /// Decodes and reconstructs a readout without encoding it.
    #[instrument(
        skip(self, input_data),
        fields(sensor = %self.sensor.model(), input_size = input_data.len())
    )]
    pub fn reconstruct(&self, input_data: &[u8]) -> Result<Vec<ReconstructedFrame>> {
        let samples = {
            let _span = tracing::info_span!("decode_capture").entered();
            self.reader.read_capture(input_data)?
        };

        let capture = {
            let window = self
                .config
                .rows
                .unwrap_or_else(|| RowWindow::full(self.sensor.geometry().height));
            let _span = tracing::info_span!("assemble_frames",
                first_row = window.first,
                last_row = window.last
            ).entered();
            self.sensor.assemble(samples, window, self.config.pad_to_full)?
        };

        let frames = {
            let _span = tracing::info_span!("parse_readoff",
                nframes = capture.nframes,
                height = capture.height,
                width = capture.width
            ).entered();
            self.sensor.parse_readoff(&capture, self.config.columns)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions", images = frames.len()).entered();
            self.validate_dimensions(&frames)?;
        }

        Ok(frames)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting readout to TIFF conversion");

        let frames = self.reconstruct(input_data)?;

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_frames(&frames, output, &self.config)?;
        }

        info!(
            images = frames.len(),
            width = frames.first().map(|f| f.width).unwrap_or(0),
            height = frames.first().map(|f| f.height).unwrap_or(0),
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ReadoutError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ReadoutError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)?;

        Ok(())
    }

    pub fn sensor(&self) -> &Sensor {
        &self.sensor
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
