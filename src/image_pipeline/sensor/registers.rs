//! Sensor register maps
//!
//! Addresses are FPGA register numbers. Subregister start bits follow the
//! interface control document: `start_bit` is the most significant bit of the
//! field, so a `[7..0]` field has `start_bit = 7`, `width = 8`.

use crate::image_pipeline::common::error::{ReadoutError, Result};
use crate::image_pipeline::sensor::model::{Board, SensorModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDef {
    pub name: &'static str,
    pub address: u16,
}

/// A bit field inside a 32-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubregisterDef {
    pub name: &'static str,
    /// Name of the parent register
    pub register: &'static str,
    /// Most significant bit of the field
    pub start_bit: u8,
    pub width: u8,
    pub writable: bool,
}

impl SubregisterDef {
    pub fn shift(&self) -> u32 {
        u32::from(self.start_bit) + 1 - u32::from(self.width)
    }

    /// Field mask in the field's own (unshifted) units.
    pub fn max_value(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    pub fn extract(&self, register_value: u32) -> u32 {
        (register_value >> self.shift()) & self.max_value()
    }

    /// Writes `value` into the field of `register_value`, leaving other bits alone.
    pub fn insert(&self, register_value: u32, value: u32) -> Result<u32> {
        if !self.writable {
            return Err(ReadoutError::RegisterError(format!(
                "subregister {} is read-only",
                self.name
            )));
        }
        if value > self.max_value() {
            return Err(ReadoutError::InvalidParameter(format!(
                "value {:#x} does not fit the {}-bit subregister {}",
                value, self.width, self.name
            )));
        }
        let mask = self.max_value() << self.shift();
        Ok((register_value & !mask) | (value << self.shift()))
    }
}

const fn reg(name: &'static str, address: u16) -> RegisterDef {
    RegisterDef { name, address }
}

const fn sub(
    name: &'static str,
    register: &'static str,
    start_bit: u8,
    width: u8,
    writable: bool,
) -> SubregisterDef {
    SubregisterDef {
        name,
        register,
        start_bit,
        width,
        writable,
    }
}

const HYPERION_REGISTERS: &[RegisterDef] = &[
    reg("VRESET_WAIT_TIME", 0x03E),
    reg("ICARUS_VER_SEL", 0x041),
    reg("MISC_SENSOR_CTL", 0x04C),
    reg("MANUAL_SHUTTERS_MODE", 0x050),
    reg("W0_INTEGRATION", 0x051),
    reg("W0_INTERFRAME", 0x052),
    reg("W1_INTEGRATION", 0x053),
    reg("W1_INTERFRAME", 0x054),
    reg("W2_INTEGRATION", 0x055),
    reg("W2_INTERFRAME", 0x056),
    reg("W3_INTEGRATION", 0x057),
    reg("W0_INTEGRATION_B", 0x058),
    reg("W0_INTERFRAME_B", 0x059),
    reg("W1_INTEGRATION_B", 0x05A),
    reg("W1_INTERFRAME_B", 0x05B),
    reg("W2_INTEGRATION_B", 0x05C),
    reg("W2_INTERFRAME_B", 0x05D),
    reg("W3_INTEGRATION_B", 0x05E),
    reg("TIME_ROW_DCD", 0x05F),
];

const HYPERION_V4_REGISTERS: &[RegisterDef] = &[reg("DELAY_ASSERTION_ROWDCD_EN", 0x04F)];

const S4_REGISTERS: &[RegisterDef] = &[
    reg("VRESET_WAIT_TIME", 0x03E),
    reg("S4_VER_SEL", 0x041),
    reg("MISC_SENSOR_CTL", 0x04C),
    reg("TIME_ROW_DCD", 0x05F),
    reg("NCOLTSTEN", 0x046),
];

const HYPERION_SUBREGISTERS: &[SubregisterDef] = &[
    sub("MANSHUT_MODE", "MANUAL_SHUTTERS_MODE", 0, 1, true),
    sub("REVREAD", "CTRL_REG", 4, 1, true),
    sub("PDBIAS_LOW", "CTRL_REG", 6, 1, true),
    sub("ROWDCD_CTL", "CTRL_REG", 7, 1, true),
    sub("ACCUMULATION_CTL", "MISC_SENSOR_CTL", 0, 1, true),
    sub("HST_TST_ANRST_EN", "MISC_SENSOR_CTL", 1, 1, true),
    sub("HST_TST_BNRST_EN", "MISC_SENSOR_CTL", 2, 1, true),
    sub("HST_TST_ANRST_IN", "MISC_SENSOR_CTL", 3, 1, true),
    sub("HST_TST_BNRST_IN", "MISC_SENSOR_CTL", 4, 1, true),
    sub("HST_PXL_RST_EN", "MISC_SENSOR_CTL", 5, 1, true),
    sub("HST_CONT_MODE", "MISC_SENSOR_CTL", 6, 1, true),
    sub("COL_DCD_EN", "MISC_SENSOR_CTL", 7, 1, true),
    sub("COL_READOUT_EN", "MISC_SENSOR_CTL", 8, 1, true),
    // Reading a status subregister may clear the whole register
    sub("STAT_W3TOPAEDGE1", "STAT_REG", 3, 1, false),
    sub("STAT_W3TOPBEDGE1", "STAT_REG", 4, 1, false),
    sub("POSID0", "STAT_EDGE_DETECTS", 26, 1, false),
    sub("POSID1", "STAT_EDGE_DETECTS", 24, 1, false),
    sub("STAT_HST_ALL_W_EN_DETECTED", "STAT_REG", 12, 1, false),
    sub("PDBIAS_UNREADY", "STAT_REG2", 5, 1, false),
];

const HYPERION_V4_SUBREGISTERS: &[SubregisterDef] =
    &[sub("READOFF_DELAY_EN", "TRIGGER_CTL", 4, 1, true)];

const S4_SUBREGISTERS: &[SubregisterDef] = &[
    sub("STAT_W3TOPLEDGE1", "STAT_REG", 3, 1, false),
    sub("STAT_W3TOPREDGE1", "STAT_REG", 4, 1, false),
    sub("REVREAD", "CTRL_REG", 4, 1, true),
    sub("PDBIAS_UNREADY", "STAT_REG2", 5, 1, false),
    sub("PDBIAS_LOW", "CTRL_REG", 6, 1, true),
    sub("ROWDCD_CTL", "CTRL_REG", 7, 1, true),
    sub("HST_PXL_RST_EN", "MISC_SENSOR_CTL", 5, 1, true),
    sub("COL_DCD_EN", "MISC_SENSOR_CTL", 7, 1, true),
    sub("BIASEN", "MISC_SENSOR_CTL", 8, 1, true),
    sub("RDCDEN", "FPA_OSCILLATOR_SEL_ADDR", 0, 1, true),
];

const HYPERION_DEFAULTS: &[(&str, u32)] = &[
    ("ICARUS_VER_SEL", 0x0000_0000),
    ("FPA_FRAME_INITIAL", 0x0000_0000),
    ("FPA_FRAME_FINAL", 0x0000_0001),
    ("FPA_ROW_INITIAL", 0x0000_0000),
    ("FPA_ROW_FINAL", 0x0000_03FF),
    ("HS_TIMING_DATA_BHI", 0x0000_0000),
    ("HS_TIMING_DATA_BLO", 0x0000_6666),
    ("HS_TIMING_DATA_AHI", 0x0000_0000),
    ("HS_TIMING_DATA_ALO", 0x0000_6666),
    // column test mode off
    ("FPA_DIVCLK_EN_ADDR", 0x0000_0000),
];

const S4_DEFAULTS: &[(&str, u32)] = &[
    ("S4_VER_SEL", 0x0000_5334),
    ("FPA_FRAME_INITIAL", 0x0000_0000),
    ("FPA_FRAME_FINAL", 0x0000_0003),
    ("FPA_ROW_INITIAL", 0x0000_0000),
    ("FPA_ROW_FINAL", 0x0000_03FF),
];

/// Sensor-specific registers available on `board`.
pub fn sensor_registers(model: SensorModel, board: Board) -> Vec<RegisterDef> {
    match (model, board) {
        (SensorModel::Hyperion, Board::LlnlV4) => {
            [HYPERION_REGISTERS, HYPERION_V4_REGISTERS].concat()
        }
        (SensorModel::Hyperion, Board::LlnlV1) => HYPERION_REGISTERS.to_vec(),
        (SensorModel::S4, _) => S4_REGISTERS.to_vec(),
    }
}

/// Sensor-specific subregisters available on `board`.
pub fn sensor_subregisters(model: SensorModel, board: Board) -> Vec<SubregisterDef> {
    match (model, board) {
        (SensorModel::Hyperion, Board::LlnlV4) => {
            [HYPERION_SUBREGISTERS, HYPERION_V4_SUBREGISTERS].concat()
        }
        (SensorModel::Hyperion, Board::LlnlV1) => HYPERION_SUBREGISTERS.to_vec(),
        (SensorModel::S4, _) => S4_SUBREGISTERS.to_vec(),
    }
}

/// Register settings written when the sensor is initialized.
pub fn sensor_defaults(model: SensorModel) -> &'static [(&'static str, u32)] {
    match model {
        SensorModel::Hyperion => HYPERION_DEFAULTS,
        SensorModel::S4 => S4_DEFAULTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_have_unique_names() {
        for model in [SensorModel::Hyperion, SensorModel::S4] {
            for board in [Board::LlnlV1, Board::LlnlV4] {
                let registers = sensor_registers(model, board);
                let names: HashSet<_> = registers.iter().map(|r| r.name).collect();
                assert_eq!(names.len(), registers.len());

                let subregisters = sensor_subregisters(model, board);
                let names: HashSet<_> = subregisters.iter().map(|s| s.name).collect();
                assert_eq!(names.len(), subregisters.len());
            }
        }
    }

    #[test]
    fn test_subregister_fields_fit_registers() {
        for model in [SensorModel::Hyperion, SensorModel::S4] {
            for def in sensor_subregisters(model, Board::LlnlV4) {
                assert!(def.width >= 1);
                assert!(def.start_bit < 32, "{} starts past bit 31", def.name);
                assert!(def.start_bit + 1 >= def.width, "{} underflows bit 0", def.name);
            }
        }
    }

    #[test]
    fn test_board_specific_entries() {
        let v1 = sensor_subregisters(SensorModel::Hyperion, Board::LlnlV1);
        let v4 = sensor_subregisters(SensorModel::Hyperion, Board::LlnlV4);
        assert!(!v1.iter().any(|s| s.name == "READOFF_DELAY_EN"));
        assert!(v4.iter().any(|s| s.name == "READOFF_DELAY_EN"));

        let v4 = sensor_registers(SensorModel::Hyperion, Board::LlnlV4);
        assert!(v4.iter().any(|r| r.name == "DELAY_ASSERTION_ROWDCD_EN" && r.address == 0x04F));
    }

    #[test]
    fn test_subregister_extract_insert() {
        let field = sub("OSC_SELECT", "FPA_OSCILLATOR_SEL_ADDR", 2, 2, true);
        assert_eq!(field.shift(), 1);
        assert_eq!(field.extract(0b0000_0110), 0b11);

        let updated = field.insert(0b1000_0001, 0b10).unwrap();
        assert_eq!(updated, 0b1000_0101);
        assert!(field.insert(0, 0b100).is_err());
    }

    #[test]
    fn test_read_only_subregister_rejects_writes() {
        let stat = sensor_subregisters(SensorModel::S4, Board::LlnlV4)
            .into_iter()
            .find(|s| s.name == "PDBIAS_UNREADY")
            .unwrap();
        assert_eq!(stat.extract(1 << 5), 1);
        assert!(matches!(stat.insert(0, 1), Err(ReadoutError::RegisterError(_))));
    }

    #[test]
    fn test_defaults_program_frame_range() {
        let frames_final = |model| {
            sensor_defaults(model)
                .iter()
                .find(|(name, _)| *name == "FPA_FRAME_FINAL")
                .map(|(_, value)| *value)
        };
        assert_eq!(frames_final(SensorModel::Hyperion), Some(1));
        assert_eq!(frames_final(SensorModel::S4), Some(3));
    }
}
