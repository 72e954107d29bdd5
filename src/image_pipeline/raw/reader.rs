use crate::image_pipeline::common::error::Result;

pub trait CaptureReader {
    fn read_capture(&self, data: &[u8]) -> Result<Vec<u16>>;
}
