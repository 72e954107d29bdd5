//! Readout reconstruction for hCMOS Hyperion and S4 image sensors.

pub mod image_pipeline;
pub mod logger;
