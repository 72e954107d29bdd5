//! Camera commands translated into sensor register writes.

use std::str::FromStr;

use tracing::{error, info, warn};

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::raw::RowWindow;
use crate::image_pipeline::sensor::bus::RegisterBus;
use crate::image_pipeline::sensor::device::Sensor;
use crate::image_pipeline::sensor::model::{Feature, SensorModel};
use crate::image_pipeline::sensor::registers::sensor_defaults;
use crate::image_pipeline::sensor::status::{ICARUS_STATUS_FLAGS, decode_s4_edges, decode_status};

const COLUMN_TEST_REGISTER: &str = "FPA_DIVCLK_EN_ADDR";
const TRIGGER_LATCH_SUBREGISTER: &str = "OSC_SELECT";

/// Trigger latch selection. A latched trigger is held from its rising edge
/// until the camera is armed and the coarse trigger is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerLatch {
    #[default]
    None,
    Left,
    Right,
    Both,
}

impl TriggerLatch {
    /// Two-bit `OSC_SELECT` payload.
    pub fn code(&self) -> u32 {
        match self {
            TriggerLatch::None => 0b00,
            TriggerLatch::Left => 0b10,
            TriggerLatch::Right => 0b01,
            TriggerLatch::Both => 0b11,
        }
    }
}

impl FromStr for TriggerLatch {
    type Err = ReadoutError;

    /// Accepts `none`/`left`/`right`/`both` (any case, first three letters
    /// suffice) or the two-digit payload `00`/`10`/`01`/`11`.
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_uppercase();
        let prefix = value.get(..3).unwrap_or(value.as_str());
        match (prefix, value.as_str()) {
            ("NON", _) | (_, "00") => Ok(TriggerLatch::None),
            ("LEF", _) | (_, "10") => Ok(TriggerLatch::Left),
            ("RIG", _) | (_, "01") => Ok(TriggerLatch::Right),
            ("BOT", _) | (_, "11") => Ok(TriggerLatch::Both),
            _ => Err(ReadoutError::InvalidParameter(format!(
                "trigger latch '{}'; try 'none'|'left'|'right'|'both'",
                s
            ))),
        }
    }
}

impl Sensor {
    /// Fails with `Unsupported` when `requested` and the model lacks `feature`.
    ///
    /// A request that leaves the feature off is always accepted.
    pub fn check_feature(&self, feature: Feature, requested: bool) -> Result<()> {
        if !requested || self.capabilities().supports(feature) {
            return Ok(());
        }
        warn!(sensor = %self.model(), "{} is not supported", feature);
        Err(ReadoutError::Unsupported {
            sensor: self.model(),
            feature,
        })
    }

    /// Confirms the sensor-select jumpers match this model.
    pub fn check_sensor_detect<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        let detected = bus.get_subregister(self.model().detect_subregister())? != 0;
        if !detected {
            error!(sensor = %self.model(), "sensor not detected");
        }
        Ok(detected)
    }

    pub fn apply_defaults<B: RegisterBus>(&self, bus: &mut B) -> Result<()> {
        info!(sensor = %self.model(), "Writing sensor defaults");
        bus.submit_messages(sensor_defaults(self.model()))
    }

    /// Programs the rows the board reads off.
    pub fn program_rows<B: RegisterBus>(&self, bus: &mut B, window: RowWindow) -> Result<()> {
        let window = RowWindow::new(window.first, window.last, self.geometry().height)?;
        bus.submit_messages(&[
            ("FPA_ROW_INITIAL", window.first as u32),
            ("FPA_ROW_FINAL", window.last as u32),
        ])
    }

    pub fn column_test_enable<B: RegisterBus>(&self, bus: &mut B) -> Result<()> {
        self.check_feature(Feature::ColumnTest, true)?;
        bus.submit_messages(&[(COLUMN_TEST_REGISTER, 1)])
    }

    pub fn column_test_disable<B: RegisterBus>(&self, bus: &mut B) -> Result<()> {
        self.check_feature(Feature::ColumnTest, true)?;
        bus.submit_messages(&[(COLUMN_TEST_REGISTER, 0)])
    }

    pub fn select_trigger_latch<B: RegisterBus>(
        &self,
        bus: &mut B,
        latch: TriggerLatch,
    ) -> Result<()> {
        info!(sensor = %self.model(), ?latch, "selectTrigLatchEn");
        self.check_feature(Feature::TriggerLatch, true)?;
        bus.set_subregister(TRIGGER_LATCH_SUBREGISTER, latch.code())
    }

    /// Reads the status registers and logs every sensor-specific flag raised.
    ///
    /// Returns the labels of the raised flags.
    pub fn report_status<B: RegisterBus>(&self, bus: &mut B) -> Result<Vec<&'static str>> {
        let raised = match self.model() {
            SensorModel::Hyperion => {
                let stat = bus.get_register("STAT_REG")?;
                let stat2 = bus.get_register("STAT_REG2")?;
                decode_status(ICARUS_STATUS_FLAGS, stat, stat2, self.board())
            }
            SensorModel::S4 => {
                let edges = bus.get_register("STAT_EDGE_DETECTS")?;
                decode_s4_edges(edges)
                    .into_iter()
                    .filter(|(_, on)| *on)
                    .map(|(label, _)| label)
                    .collect()
            }
        };

        for label in &raised {
            info!(sensor = %self.model(), "{}", label);
        }
        Ok(raised)
    }
}
