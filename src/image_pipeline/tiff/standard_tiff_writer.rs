use std::io::Write;

use tiff::encoder::Compression;
use tiff::encoder::compression::DeflateLevel;
use tracing::debug;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::deinterlace::ReconstructedFrame;
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes every frame as one 16-bit grayscale page of a multi-page TIFF.
pub struct StandardTiffWriter;

fn to_gray16(frame: &ReconstructedFrame, page: usize) -> Result<Vec<u16>> {
    frame
        .data
        .iter()
        .map(|&v| {
            u16::try_from(v).map_err(|_| {
                ReadoutError::EncodeError(format!(
                    "sample {} on page {} does not fit 16 bits",
                    v, page
                ))
            })
        })
        .collect()
}

fn page_dimensions(frame: &ReconstructedFrame, page: usize) -> Result<(u32, u32)> {
    match (u32::try_from(frame.width), u32::try_from(frame.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(ReadoutError::EncodeError(format!(
            "page {} is {}x{}, beyond the TIFF dimension limit",
            page, frame.width, frame.height
        ))),
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_frames(
        &self,
        frames: &[ReconstructedFrame],
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding {} TIFF pages", frames.len());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ReadoutError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        for (page, frame) in frames.iter().enumerate() {
            debug!("Page {}: {}x{}", page, frame.width, frame.height);
            let (width, height) = page_dimensions(frame, page)?;
            let samples = to_gray16(frame, page)?;
            encoder
                .write_image::<tiff::encoder::colortype::Gray16>(width, height, &samples)
                .map_err(|e| ReadoutError::EncodeError(e.to_string()))?;
        }

        drop(encoder);
        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
