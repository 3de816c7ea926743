use super::crc::crc7;
use super::response::Shape;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SendInterfaceCondition {
    pub pcie_1_2v_support: bool, // PCIe 1.2V
    pub pcie_availability: bool,
    pub voltage_supplied: u8, // 4 bits, 0b0001 = 2.7-3.6V
    pub check_pattern: u8,
}

impl SendInterfaceCondition {
    pub const VOLTAGE_2V7_3V6: u8 = 0b0001;
    pub const CHECK_PATTERN: u8 = 0xAA;

    pub fn spi() -> Self {
        Self::with_pattern(Self::CHECK_PATTERN)
    }

    pub fn with_pattern(check_pattern: u8) -> Self {
        Self {
            pcie_1_2v_support: false,
            pcie_availability: false,
            voltage_supplied: Self::VOLTAGE_2V7_3V6,
            check_pattern,
        }
    }
}

impl From<SendInterfaceCondition> for u32 {
    fn from(cond: SendInterfaceCondition) -> u32 {
        (cond.pcie_1_2v_support as u32) << 13
            | (cond.pcie_availability as u32) << 12
            | ((cond.voltage_supplied & 0xF) as u32) << 8
            | cond.check_pattern as u32
    }
}

pub type RCA = u16;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AppCommand {
    SDSendOpCond(bool), // host-capacity-support
}

impl AppCommand {
    pub fn index(self) -> u8 {
        match self {
            Self::SDSendOpCond(_) => 41,
        }
    }

    pub fn argument(self) -> u32 {
        match self {
            Self::SDSendOpCond(hcs) => (hcs as u32) << 30,
        }
    }

    pub fn response_shape(self) -> Shape {
        match self {
            Self::SDSendOpCond(_) => Shape::R1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    GoIdleState,
    SendIfCond(SendInterfaceCondition),
    StopTransmission,
    SendStatus(RCA),
    AppCommand(RCA),
    ReadOCR,
    CRCOnOff(bool),
    App(AppCommand),
}

impl Command {
    pub fn index(self) -> u8 {
        match self {
            Self::GoIdleState => 0,
            Self::SendIfCond(_) => 8,
            Self::StopTransmission => 12,
            Self::SendStatus(_) => 13,
            Self::AppCommand(_) => 55,
            Self::ReadOCR => 58,
            Self::CRCOnOff(_) => 59,
            Self::App(command) => command.index(),
        }
    }

    pub fn argument(self) -> u32 {
        match self {
            Self::GoIdleState | Self::StopTransmission | Self::ReadOCR => 0,
            Self::SendIfCond(cond) => cond.into(),
            Self::SendStatus(rca) | Self::AppCommand(rca) => (rca as u32) << 16,
            Self::CRCOnOff(enable) => enable as u32,
            Self::App(command) => command.argument(),
        }
    }

    pub fn response_shape(self) -> Shape {
        match self {
            Self::SendIfCond(_) => Shape::R7,
            Self::StopTransmission => Shape::R1b,
            Self::SendStatus(_) => Shape::R2,
            Self::ReadOCR => Shape::R3,
            Self::App(command) => command.response_shape(),
            _ => Shape::R1,
        }
    }

    /// CRC bytes baked in for commands whose argument is fixed by the protocol.
    pub fn fixed_crc(self) -> Option<u8> {
        match (self.index(), self.argument()) {
            (0, 0) => Some(0x95),
            (8, 0x1AA) => Some(0x87),
            (55, 0) => Some(0x65),
            _ => None,
        }
    }
}

/// On-wire command frame
///
/// ```text
/// byte0: 0 1 c5 c4 c3 c2 c1 c0
/// byte1..4: argument, MSB first
/// byte5: g6 g5 g4 g3 g2 g1 g0 1
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame([u8; 6]);

impl Frame {
    pub const SIZE: usize = 6;

    pub fn with_crc(index: u8, argument: u32, crc: u8) -> Self {
        let bytes = u32::to_be_bytes(argument);
        Self([0x40 | (index & 0x3F), bytes[0], bytes[1], bytes[2], bytes[3], crc | 1])
    }

    pub fn build(index: u8, argument: u32) -> Self {
        let mut frame = Self::with_crc(index, argument, 0);
        frame.0[5] = crc7(&frame.0[..5]) << 1 | 1;
        frame
    }

    pub fn index(&self) -> u8 {
        self.0[0] & 0x3F
    }

    pub fn argument(&self) -> u32 {
        u32::from_be_bytes([self.0[1], self.0[2], self.0[3], self.0[4]])
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<Command> for Frame {
    fn from(cmd: Command) -> Self {
        match cmd.fixed_crc() {
            Some(crc) => Self::with_crc(cmd.index(), cmd.argument(), crc),
            None => Self::build(cmd.index(), cmd.argument()),
        }
    }
}

impl From<Frame> for [u8; 6] {
    fn from(frame: Frame) -> [u8; 6] {
        frame.0
    }
}
