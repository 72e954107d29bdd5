use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::deinterlace::ReconstructedFrame;
use crate::image_pipeline::tiff::types::ConversionConfig;

pub trait TiffWriter {
    fn write_frames(
        &self,
        frames: &[ReconstructedFrame],
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
