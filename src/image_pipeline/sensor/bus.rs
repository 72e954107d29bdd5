use crate::image_pipeline::common::error::Result;

/// Register access provided by the camera assembly.
///
/// Values are plain integers; the transport decides how they are framed on
/// the wire.
pub trait RegisterBus {
    fn get_register(&mut self, name: &str) -> Result<u32>;

    /// Writes each `(register, value)` pair in order.
    fn submit_messages(&mut self, messages: &[(&str, u32)]) -> Result<()>;

    fn get_subregister(&mut self, name: &str) -> Result<u32>;

    fn set_subregister(&mut self, name: &str, value: u32) -> Result<()>;
}
