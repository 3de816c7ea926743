pub mod bus;
pub mod hal;

use embedded_hal::digital::v2::OutputPin;

use crate::{
    bus::{InitError, Step},
    sd::{
        command::{AppCommand, Command, SendInterfaceCondition},
        response::{Response, IDLE, OCR, R1},
        Card,
    },
};
pub use bus::{BUSError, Bus, Error, Transfer};

/// GO_IDLE_STATE answers accepted as "in idle state": plain idle, and idle
/// with erase-reset or illegal-command flagged as some older cards report.
const GO_IDLE_ACCEPTED: [R1; 3] = [R1::IDLE, R1(0x03), R1(0x05)];

impl<E, F, SPI, CS> Bus<SPI, CS>
where
    SPI: Transfer<Error = E>,
    CS: OutputPin<Error = F>,
{
    /// Brings the card from power-on to ready for block transfer.
    ///
    /// Before init, set SPI clock rate between 100KHZ and 400KHZ.
    /// The card is left deselected whatever the outcome.
    pub fn init(&mut self) -> Result<(), InitError<Error<E, F>>> {
        let result = self.bring_up();
        match &result {
            Ok(_) => debug!("Card ready"),
            Err(e) => warn!("Card bring-up failed at {:?}, code {}", e.step, e.code()),
        }
        result
    }

    fn bring_up(&mut self) -> Result<(), InitError<Error<E, F>>> {
        self.power_up().map_err(|cause| InitError { step: Step::PowerUp, cause })?;
        self.go_idle().map_err(|cause| InitError { step: Step::GoIdle, cause })?;
        let step = Step::InterfaceCondition;
        self.check_interface().map_err(|cause| InitError { step, cause })?;
        let step = Step::Initialization;
        self.initialize().map_err(|cause| InitError { step, cause })
    }

    fn power_up(&mut self) -> Result<(), BUSError<E, F>> {
        // Supply minimum of 74 clock cycles without CS asserted.
        self.deselect()?;
        for _ in 0..self.config.power_up_bytes() {
            self.exchange(IDLE)?;
        }
        Ok(())
    }

    fn go_idle(&mut self) -> Result<(), BUSError<E, F>> {
        let mut error = BUSError::Timeout;
        for _ in 0..self.config.reset_attempts {
            match self.send_command(Command::GoIdleState) {
                Ok(r) if GO_IDLE_ACCEPTED.contains(&r.r1()) => return Ok(()),
                Ok(r) => error = BUSError::Status(r.r1()),
                Err(BUSError::Timeout) => error = BUSError::Timeout,
                Err(e) => return Err(e),
            }
        }
        Err(error)
    }

    fn check_interface(&mut self) -> Result<(), BUSError<E, F>> {
        let cond = SendInterfaceCondition::with_pattern(self.config.check_pattern);
        let (r1, r7) = match self.send_command(Command::SendIfCond(cond))? {
            Response::R7(r1, r7) => (r1, r7),
            r => return Err(BUSError::Status(r.r1())),
        };
        // Card must not have started initialization yet
        if r1 != R1::IDLE {
            return Err(BUSError::Status(r1));
        }
        // Both argument bytes must come back unchanged, reserved bits included
        let voltage = (u32::from(cond) >> 8) as u8;
        let pattern = cond.check_pattern;
        if r7.echo_back_voltage() != voltage || r7.echo_back_check_pattern() != pattern {
            return Err(BUSError::Echo(r7));
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), BUSError<E, F>> {
        let mut error = BUSError::Timeout;
        for round in 1..=self.config.init_rounds {
            match self.send_command(Command::AppCommand(0)) {
                Ok(r) if r.r1() == R1::IDLE => (),
                Ok(r) => {
                    error = BUSError::Status(r.r1());
                    continue;
                }
                Err(BUSError::Timeout) => {
                    error = BUSError::Timeout;
                    continue;
                }
                Err(e) => return Err(e),
            }
            match self.send_command(Command::App(AppCommand::SDSendOpCond(true))) {
                Ok(r) if r.r1() == R1::READY => {
                    debug!("Card left idle state after {} rounds", round);
                    return Ok(());
                }
                Ok(r) => error = BUSError::Status(r.r1()),
                Err(BUSError::Timeout) => error = BUSError::Timeout,
                Err(e) => return Err(e),
            }
        }
        Err(error)
    }

    pub fn read_ocr(&mut self) -> Result<OCR, BUSError<E, F>> {
        match self.send_command(Command::ReadOCR)? {
            Response::R3(r1, ocr) if r1.error().is_none() => Ok(ocr),
            r => Err(BUSError::Status(r.r1())),
        }
    }

    /// Card capacity class, only meaningful after `init`
    pub fn card(&mut self) -> Result<Card, BUSError<E, F>> {
        self.read_ocr().map(Card::from)
    }

    pub fn send_status(&mut self) -> Result<(R1, u8), BUSError<E, F>> {
        match self.send_command(Command::SendStatus(0))? {
            Response::R2(r1, status) => Ok((r1, status)),
            r => Err(BUSError::Status(r.r1())),
        }
    }

    /// In SPI mode only CMD0 and CMD8 are CRC checked by default
    pub fn set_crc(&mut self, enable: bool) -> Result<(), BUSError<E, F>> {
        let r1 = self.send_command(Command::CRCOnOff(enable))?.r1();
        match r1.error() {
            Some(_) => Err(BUSError::Status(r1)),
            None => Ok(()),
        }
    }
}
