//! Status bit decoding
//!
//! Sensor status is reported through board registers. Icarus-family sensors
//! raise individual bits of `STAT_REG`/`STAT_REG2`; the S4 routes its test
//! signals through the edge-detect register instead.

use crate::image_pipeline::sensor::model::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRegister {
    Stat,
    Stat2,
}

impl StatusRegister {
    pub fn name(&self) -> &'static str {
        match self {
            StatusRegister::Stat => "STAT_REG",
            StatusRegister::Stat2 => "STAT_REG2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlag {
    pub register: StatusRegister,
    pub bit: u8,
    pub label: &'static str,
    /// Restricts the flag to one board revision
    pub board: Option<Board>,
}

pub const ICARUS_STATUS_FLAGS: &[StatusFlag] = &[
    StatusFlag {
        register: StatusRegister::Stat,
        bit: 3,
        label: "W3_Top_A_Edge1 detected",
        board: None,
    },
    StatusFlag {
        register: StatusRegister::Stat,
        bit: 4,
        label: "W3_Top_B_Edge1 detected",
        board: None,
    },
    StatusFlag {
        register: StatusRegister::Stat,
        bit: 12,
        label: "HST_All_W_En detected",
        board: None,
    },
    StatusFlag {
        register: StatusRegister::Stat2,
        bit: 5,
        label: "PDBIAS Unready",
        board: Some(Board::LlnlV4),
    },
];

/// Labels of the flags set in `stat` / `stat2`.
pub fn decode_status(
    flags: &[StatusFlag],
    stat: u32,
    stat2: u32,
    board: Board,
) -> Vec<&'static str> {
    flags
        .iter()
        .filter(|flag| flag.board.is_none_or(|b| b == board))
        .filter(|flag| {
            let value = match flag.register {
                StatusRegister::Stat => stat,
                StatusRegister::Stat2 => stat2,
            };
            (value >> flag.bit) & 1 == 1
        })
        .map(|flag| flag.label)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One edge detector of the edge-detect register, e.g. `W2_BOT_R_EDGE1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector {
    pub frame: u8,
    pub edge: Edge,
    pub side: Side,
    /// Detector number on that edge, 1 or 2
    pub number: u8,
}

const fn det(frame: u8, edge: Edge, side: Side, number: u8) -> EdgeDetector {
    EdgeDetector {
        frame,
        edge,
        side,
        number,
    }
}

impl EdgeDetector {
    /// Bit position in the edge-detect register once shifted left by one.
    pub fn index(&self) -> usize {
        let edge = match self.edge {
            Edge::Top => 0,
            Edge::Bottom => 1,
        };
        let side = match self.side {
            Side::Left => 0,
            Side::Right => 1,
        };
        self.frame as usize * 8 + edge * 4 + (self.number as usize - 1) * 2 + side
    }

    pub fn name(&self) -> String {
        let edge = match self.edge {
            Edge::Top => "TOP",
            Edge::Bottom => "BOT",
        };
        let side = match self.side {
            Side::Left => "L",
            Side::Right => "R",
        };
        format!("W{}_{}_{}_EDGE{}", self.frame, edge, side, self.number)
    }
}

use Edge::{Bottom, Top};
use Side::{Left, Right};

/// S4 test signals and the edge detector each one is wired to
pub const S4_EDGE_SIGNALS: &[(&str, EdgeDetector)] = &[
    ("TCACCESINBYPASS", det(0, Bottom, Left, 2)),
    ("BGTRIMA0", det(2, Bottom, Left, 2)),
    ("BGTRIMA1", det(2, Bottom, Left, 1)),
    ("BGTRIMA2", det(1, Bottom, Left, 2)),
    ("BGTRB0", det(1, Top, Left, 2)),
    ("BGTRB1", det(2, Top, Left, 1)),
    ("BGTRB2", det(2, Top, Left, 2)),
    ("BGTRB3", det(3, Top, Left, 1)),
    ("TC_SHIF_IN_UP", det(3, Bottom, Right, 1)),
    ("TC_GLB_CHARGE_EN", det(2, Bottom, Right, 1)),
    ("TC_DC_PXL_ACCESS_EN", det(2, Bottom, Right, 2)),
    ("TCnDCPXLACCOUT", det(0, Bottom, Right, 1)),
    ("TC_SR_PRGM_MODE", det(3, Bottom, Right, 2)),
    ("TCSRUPOUT", det(1, Bottom, Right, 1)),
    ("TCSRDNOUT", det(1, Bottom, Right, 2)),
    ("TC_SHIFT_IN_DN", det(3, Top, Right, 1)),
    ("TC_nRST_SR", det(3, Top, Right, 2)),
    ("TC_TEST_AMP_EN", det(2, Top, Right, 1)),
    ("TRGOUT", det(0, Top, Right, 1)),
    ("TRGIN", det(0, Top, Right, 2)),
    ("REPTREEOUT", det(0, Top, Left, 1)),
    ("TC_TEST_CLK_IN", det(2, Top, Right, 2)),
];

/// State of every S4 test signal given the raw edge-detect register.
///
/// The register lacks the first detector, so it is shifted left by one and
/// that detector always reads clear.
pub fn decode_s4_edges(edge_register: u32) -> Vec<(&'static str, bool)> {
    let bits = u64::from(edge_register) << 1;
    S4_EDGE_SIGNALS
        .iter()
        .map(|(label, detector)| (*label, (bits >> detector.index()) & 1 == 1))
        .collect()
}
