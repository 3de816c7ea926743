use crate::sd::response::Shape;

/// Protocol tuning knobs. Defaults work for every card we have seen,
/// slow cards may need larger poll bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Clock cycles supplied with CS deasserted before the first command,
    /// rounded up to whole bytes. The protocol requires at least 74.
    pub power_up_clocks: u16,
    /// GO_IDLE_STATE attempts before giving up on the card.
    pub reset_attempts: u8,
    /// APP_CMD + SD_SEND_OP_COND rounds before giving up on initialization.
    pub init_rounds: u8,
    /// Bytes polled for an R1 response.
    pub r1_poll_bytes: u8,
    /// Bytes polled for every other response shape.
    pub poll_bytes: u8,
    /// Pattern sent with SEND_IF_COND, echoed back by the card.
    pub check_pattern: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            power_up_clocks: 74,
            reset_attempts: 15,
            init_rounds: 10,
            r1_poll_bytes: 20,
            poll_bytes: 8,
            check_pattern: 0xAA,
        }
    }
}

impl Config {
    pub fn power_up_bytes(&self) -> usize {
        (self.power_up_clocks as usize + 7) / 8
    }

    pub fn poll_bound(&self, shape: Shape) -> usize {
        match shape {
            Shape::R1 => self.r1_poll_bytes as usize,
            _ => self.poll_bytes as usize,
        }
    }
}
