use bitfield::{bitfield, Bit};

/// Wire value used both as filler and as "not answered yet".
/// A card answering a genuine 0xFF can't be told apart from silence.
pub const IDLE: u8 = 0xFF;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    R1,
    R1b, // R1 of busy-type commands
    R2,
    R3,
    R7,
}

impl Shape {
    pub fn len(self) -> usize {
        match self {
            Self::R1 | Self::R1b => 1,
            Self::R2 => 2,
            Self::R3 | Self::R7 => 5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct R1(pub u8);

impl Default for R1 {
    fn default() -> Self {
        Self(IDLE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum R1Status {
    InIdleState = 0,
    EraseReset,
    IllegalCommand,
    CommandCRCError,
    EraseSequenceError,
    AddressError,
    ParameterError,
}

impl R1 {
    /// All flags clear, card has left idle state
    pub const READY: R1 = R1(0x00);
    pub const IDLE: R1 = R1(0x01);

    pub fn valid(self) -> bool {
        !self.0.bit(7)
    }

    pub fn has(self, status: R1Status) -> bool {
        self.0.bit(status as usize)
    }

    pub fn error(self) -> Option<R1Status> {
        let value = (self.0 >> 2) & 0b11111;
        let error_bit = value ^ ((value.wrapping_sub(1)) & value);
        let error = match error_bit {
            0b00001 => R1Status::IllegalCommand,
            0b00010 => R1Status::CommandCRCError,
            0b00100 => R1Status::EraseSequenceError,
            0b01000 => R1Status::AddressError,
            0b10000 => R1Status::ParameterError,
            _ => return None,
        };
        Some(error)
    }
}

bitfield! {
    #[derive(Copy, Clone, PartialEq)]
    pub struct OCR(u32);
    impl Debug;
    pub power_up_complete, _: 31;
    pub card_capacity_status, _: 30;
    pub uhs2_card_status, _: 29;
    pub switching_to_1v8_accepted, _: 24;
    u16;
    pub voltage_window, _: 23, 15;
}

bitfield! {
    #[derive(Copy, Clone, PartialEq)]
    pub struct R7(u32);
    impl Debug;
    u8;
    pub command_version, _: 31, 28;
    pub echo_back_voltage, _: 15, 8;
    pub voltage_accepted, _: 11, 8;
    pub echo_back_check_pattern, _: 7, 0;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Response {
    R1(R1),
    R1b(R1),
    R2(R1, u8),
    R3(R1, OCR),
    R7(R1, R7),
}

impl Response {
    /// Assembles a response from the bytes read for `shape`, first byte being R1.
    pub fn from_bytes(shape: Shape, bytes: &[u8]) -> Self {
        let r1 = R1(bytes[0]);
        let ex = || u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        match shape {
            Shape::R1 => Self::R1(r1),
            Shape::R1b => Self::R1b(r1),
            Shape::R2 => Self::R2(r1, bytes[1]),
            Shape::R3 => Self::R3(r1, OCR(ex())),
            Shape::R7 => Self::R7(r1, R7(ex())),
        }
    }

    pub fn r1(self) -> R1 {
        match self {
            Self::R1(r1) | Self::R1b(r1) => r1,
            Self::R2(r1, _) | Self::R3(r1, _) | Self::R7(r1, _) => r1,
        }
    }
}

/// Scratch area holding the latest bytes read for every response shape.
#[derive(Clone, Debug)]
pub struct ResponseBuffer {
    r1: [u8; 1],
    r1b: [u8; 1],
    r2: [u8; 2],
    r3: [u8; 5],
    r7: [u8; 5],
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self { r1: [IDLE; 1], r1b: [IDLE; 1], r2: [IDLE; 2], r3: [IDLE; 5], r7: [IDLE; 5] }
    }
}

impl ResponseBuffer {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, shape: Shape) -> &[u8] {
        match shape {
            Shape::R1 => &self.r1,
            Shape::R1b => &self.r1b,
            Shape::R2 => &self.r2,
            Shape::R3 => &self.r3,
            Shape::R7 => &self.r7,
        }
    }

    pub(crate) fn get_mut(&mut self, shape: Shape) -> &mut [u8] {
        match shape {
            Shape::R1 => &mut self.r1,
            Shape::R1b => &mut self.r1b,
            Shape::R2 => &mut self.r2,
            Shape::R3 => &mut self.r3,
            Shape::R7 => &mut self.r7,
        }
    }

    pub fn response(&self, shape: Shape) -> Response {
        Response::from_bytes(shape, self.get(shape))
    }
}
