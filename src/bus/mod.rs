use crate::sd::response::{R1, R7};

#[derive(Debug)]
pub enum Error<BUS> {
    BUS(BUS),    // SPI or chip-select failure
    Timeout,     // No response within poll bound, probably no card
    Status(R1),  // Response not acceptable for the step
    Echo(R7),    // Interface condition not echoed back, unsupported card
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    PowerUp,
    GoIdle,
    InterfaceCondition,
    Initialization,
}

pub mod code {
    pub const SUCCESS: u8 = 0;
    pub const SEND_FAILED: u8 = 1;
    pub const NO_CARD: u8 = 2;
    pub const UNSUPPORTED_CARD: u8 = 3;
    pub const INIT_TIMEOUT: u8 = 4;
}

/// Bring-up failure, remembering which step gave up.
#[derive(Debug)]
pub struct InitError<BUS> {
    pub step: Step,
    pub cause: Error<BUS>,
}

impl<BUS> InitError<BUS> {
    pub fn code(&self) -> u8 {
        match (&self.cause, self.step) {
            (Error::BUS(_), _) | (_, Step::PowerUp) => code::SEND_FAILED,
            (_, Step::GoIdle) => code::NO_CARD,
            (_, Step::InterfaceCondition) => code::UNSUPPORTED_CARD,
            (_, Step::Initialization) => code::INIT_TIMEOUT,
        }
    }
}

pub fn status_code<BUS>(result: &Result<(), InitError<BUS>>) -> u8 {
    match result {
        Ok(_) => code::SUCCESS,
        Err(e) => e.code(),
    }
}

#[cfg(feature = "linux-spi")]
pub mod linux;
pub mod spi;
