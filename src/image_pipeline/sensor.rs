//! Sensor module
//!
//! Per-model geometry, register maps, status decoding and control commands for
//! the Hyperion and S4 sensors.

mod bus;
mod control;
mod device;
mod model;
pub mod registers;
pub mod status;

pub use bus::RegisterBus;
pub use control::TriggerLatch;
pub use device::Sensor;
pub use model::{Board, Capabilities, Feature, ReadoutTopology, SensorGeometry, SensorModel};
pub use registers::{RegisterDef, SubregisterDef};
