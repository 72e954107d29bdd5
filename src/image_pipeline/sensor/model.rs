//! Sensor models, geometry and capability flags

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::common::shape::sample_count;

/// Supported sensor variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorModel {
    /// Single-frame Icarus-family sensor; frames need no cross-frame reorder
    Hyperion,
    /// Four-frame sensor reading out paired, column-interleaved subframes
    S4,
}

/// Carrier board the sensor is mounted on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Board {
    LlnlV1,
    #[default]
    LlnlV4,
}

/// Physical order in which the sensor ships pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutTopology {
    /// Subframe pairs alternate column groups of `group_width` columns
    ColumnInterleave { group_width: usize },
    /// Frames are already spatially ordered and only need partitioning
    Partition,
}

/// Fixed per-model readout geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGeometry {
    /// Columns per frame
    pub width: usize,
    /// Rows per frame at full height
    pub height: usize,
    /// Frames captured per readout cycle
    pub nframes: usize,
    /// Bytes per sample on the wire
    pub bytes_per_pixel: usize,
    pub topology: ReadoutTopology,
}

impl SensorGeometry {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReadoutError::InvalidDimensions(self.width, self.height));
        }
        if let ReadoutTopology::ColumnInterleave { group_width } = self.topology {
            if group_width == 0 || self.width % group_width != 0 {
                return Err(ReadoutError::InvalidGeometry {
                    width: self.width,
                    group_width,
                });
            }
            if self.nframes == 0 || self.nframes % 2 != 0 {
                return Err(ReadoutError::InvalidFrameCount(self.nframes));
            }
        }
        let payload = sample_count(self.nframes, self.height, self.width)
            .and_then(|samples| samples.checked_mul(self.bytes_per_pixel));
        if payload.is_none() {
            return Err(ReadoutError::InvalidDimensions(self.width, self.height));
        }
        Ok(())
    }

    /// Size in bytes of a full-height readout payload.
    pub fn payload_size(&self) -> usize {
        self.width
            .saturating_mul(self.height)
            .saturating_mul(self.nframes)
            .saturating_mul(self.bytes_per_pixel)
    }
}

/// Optional sensor features a camera command may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Interlacing,
    HighFullWell,
    ZeroDeadTime,
    TriggerDelay,
    PhiDelay,
    ExternalClock,
    HsTiming,
    ManualShutters,
    OscillatorSelect,
    ColumnTest,
    TriggerLatch,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Interlacing => "Interlacing",
            Feature::HighFullWell => "HighFullWell mode",
            Feature::ZeroDeadTime => "ZeroDeadTime mode",
            Feature::TriggerDelay => "Trigger delay",
            Feature::PhiDelay => "Phi delay",
            Feature::ExternalClock => "External phi clock",
            Feature::HsTiming => "HS timing",
            Feature::ManualShutters => "Manual shutters",
            Feature::OscillatorSelect => "Oscillator selection",
            Feature::ColumnTest => "Column test mode",
            Feature::TriggerLatch => "Trigger latch",
        };
        f.write_str(name)
    }
}

/// Which optional features a model implements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub interlacing: bool,
    pub high_full_well: bool,
    pub zero_dead_time: bool,
    pub trigger_delay: bool,
    pub phi_delay: bool,
    pub external_clock: bool,
    pub hs_timing: bool,
    pub manual_shutters: bool,
    pub oscillator_select: bool,
    pub column_test: bool,
    pub trigger_latch: bool,
}

impl Capabilities {
    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::Interlacing => self.interlacing,
            Feature::HighFullWell => self.high_full_well,
            Feature::ZeroDeadTime => self.zero_dead_time,
            Feature::TriggerDelay => self.trigger_delay,
            Feature::PhiDelay => self.phi_delay,
            Feature::ExternalClock => self.external_clock,
            Feature::HsTiming => self.hs_timing,
            Feature::ManualShutters => self.manual_shutters,
            Feature::OscillatorSelect => self.oscillator_select,
            Feature::ColumnTest => self.column_test,
            Feature::TriggerLatch => self.trigger_latch,
        }
    }
}

const FULL_WIDTH: usize = 512;
const FULL_HEIGHT: usize = 1024;
const S4_GROUP_WIDTH: usize = 32;

impl SensorModel {
    pub fn geometry(&self) -> SensorGeometry {
        match self {
            SensorModel::Hyperion => SensorGeometry {
                width: FULL_WIDTH,
                height: FULL_HEIGHT,
                nframes: 2,
                bytes_per_pixel: 2,
                topology: ReadoutTopology::Partition,
            },
            SensorModel::S4 => SensorGeometry {
                width: FULL_WIDTH,
                height: FULL_HEIGHT,
                nframes: 4,
                bytes_per_pixel: 2,
                topology: ReadoutTopology::ColumnInterleave {
                    group_width: S4_GROUP_WIDTH,
                },
            },
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            SensorModel::Hyperion => Capabilities {
                column_test: true,
                trigger_latch: true,
                ..Capabilities::default()
            },
            SensorModel::S4 => Capabilities::default(),
        }
    }

    /// Board subregister reporting that the sensor-select jumpers match this model.
    pub fn detect_subregister(&self) -> &'static str {
        match self {
            SensorModel::Hyperion => "ICARUS_DET",
            SensorModel::S4 => "S4_DET",
        }
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorModel::Hyperion => f.write_str("Hyperion"),
            SensorModel::S4 => f.write_str("S4"),
        }
    }
}

impl FromStr for SensorModel {
    type Err = ReadoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hyperion" => Ok(SensorModel::Hyperion),
            "s4" => Ok(SensorModel::S4),
            other => Err(ReadoutError::InvalidParameter(format!(
                "unknown sensor model '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_geometries_are_valid() {
        for model in [SensorModel::Hyperion, SensorModel::S4] {
            model.geometry().validate().unwrap();
        }
    }

    #[test]
    fn test_payload_size() {
        assert_eq!(SensorModel::Hyperion.geometry().payload_size(), 512 * 1024 * 2 * 2);
        assert_eq!(SensorModel::S4.geometry().payload_size(), 512 * 1024 * 4 * 2);
    }

    #[test]
    fn test_invalid_geometry_caught_at_validation() {
        let geometry = SensorGeometry {
            topology: ReadoutTopology::ColumnInterleave { group_width: 48 },
            ..SensorModel::S4.geometry()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ReadoutError::InvalidGeometry {
                width: 512,
                group_width: 48
            })
        ));

        let geometry = SensorGeometry {
            nframes: 3,
            ..SensorModel::S4.geometry()
        };
        assert!(matches!(geometry.validate(), Err(ReadoutError::InvalidFrameCount(3))));

        // Partition readouts do not pair frames
        let geometry = SensorGeometry {
            nframes: 3,
            ..SensorModel::Hyperion.geometry()
        };
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_overflowing_payload_rejected() {
        let geometry = SensorGeometry {
            height: usize::MAX / 4,
            ..SensorModel::Hyperion.geometry()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ReadoutError::InvalidDimensions(512, _))
        ));
    }

    #[test]
    fn test_capabilities() {
        let hyperion = SensorModel::Hyperion.capabilities();
        assert!(hyperion.supports(Feature::ColumnTest));
        assert!(hyperion.supports(Feature::TriggerLatch));
        assert!(!hyperion.supports(Feature::HsTiming));

        let s4 = SensorModel::S4.capabilities();
        assert!(!s4.supports(Feature::ColumnTest));
        assert!(!s4.supports(Feature::Interlacing));
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("S4".parse::<SensorModel>().unwrap(), SensorModel::S4);
        assert_eq!(" hyperion ".parse::<SensorModel>().unwrap(), SensorModel::Hyperion);
        assert!("daedalus".parse::<SensorModel>().is_err());
    }
}
