use embedded_hal::digital::v2::OutputPin;

use crate::bus;
use crate::config::Config;
use crate::sd::command::{Command, Frame};
use crate::sd::response::{Response, ResponseBuffer, IDLE};

#[derive(Debug)]
pub enum Error<SPI, CS> {
    SPI(SPI),
    CS(CS),
}

pub type BUSError<SPI, CS> = bus::Error<Error<SPI, CS>>;

/// Full-duplex byte exchange with the card.
pub trait Transfer {
    type Error;

    fn exchange(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Sends `bytes` in one burst, must be bit-identical to exchanging them one by one.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes.iter() {
            self.exchange(byte)?;
        }
        Ok(())
    }

    /// Clocks out filler bytes, filling `buffer` with what the card sends back.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buffer.iter_mut() {
            *byte = self.exchange(IDLE)?;
        }
        Ok(())
    }
}

pub struct Bus<SPI, CS> {
    spi: SPI,
    cs: CS,
    pub(crate) config: Config,
    responses: ResponseBuffer,
}

impl<E, F, SPI, CS> Bus<SPI, CS>
where
    SPI: Transfer<Error = E>,
    CS: OutputPin<Error = F>,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self::with_config(spi, cs, Config::default())
    }

    pub fn with_config(spi: SPI, cs: CS, config: Config) -> Self {
        Self { spi, cs, config, responses: ResponseBuffer::default() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Latest bytes read back, per response shape
    pub fn responses(&self) -> &ResponseBuffer {
        &self.responses
    }

    pub fn spi<R>(&mut self, f: impl FnOnce(&mut SPI) -> R) -> R {
        f(&mut self.spi)
    }

    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    pub(crate) fn select(&mut self) -> Result<(), BUSError<E, F>> {
        self.cs.set_low().map_err(|e| BUSError::BUS(Error::CS(e)))
    }

    pub(crate) fn deselect(&mut self) -> Result<(), BUSError<E, F>> {
        self.cs.set_high().map_err(|e| BUSError::BUS(Error::CS(e)))
    }

    pub(crate) fn exchange(&mut self, byte: u8) -> Result<u8, BUSError<E, F>> {
        self.spi.exchange(byte).map_err(|e| BUSError::BUS(Error::SPI(e)))
    }

    pub(crate) fn tx(&mut self, bytes: &[u8]) -> Result<(), BUSError<E, F>> {
        self.spi.transmit(bytes).map_err(|e| BUSError::BUS(Error::SPI(e)))
    }

    pub(crate) fn rx(&mut self, buffer: &mut [u8]) -> Result<(), BUSError<E, F>> {
        self.spi.receive(buffer).map_err(|e| BUSError::BUS(Error::SPI(e)))
    }

    /// Trailing filler byte then CS high, deselect is attempted even if the byte fails.
    pub(crate) fn release(&mut self) -> Result<(), BUSError<E, F>> {
        let result = self.exchange(IDLE).map(|_| ());
        self.deselect().and(result)
    }

    fn transaction(&mut self, cmd: Command) -> Result<Response, BUSError<E, F>> {
        self.exchange(IDLE)?;

        let frame = Frame::from(cmd);
        trace!("CMD{} frame {:02X?}", cmd.index(), frame.as_bytes());
        self.tx(frame.as_bytes())?;

        if cmd == Command::StopTransmission {
            self.rx(&mut [0u8])?; // Skip stuff byte
        }

        let shape = cmd.response_shape();
        let mut byte = IDLE;
        for _ in 0..self.config.poll_bound(shape) {
            byte = self.exchange(IDLE)?;
            if byte != IDLE {
                break;
            }
        }
        if byte == IDLE {
            trace!("CMD{} no response", cmd.index());
            return Err(BUSError::Timeout);
        }

        let mut bytes = [IDLE; 5];
        bytes[0] = byte;
        self.rx(&mut bytes[1..shape.len()])?;
        self.responses.get_mut(shape).copy_from_slice(&bytes[..shape.len()]);
        trace!("CMD{} response {:02X?}", cmd.index(), &bytes[..shape.len()]);
        Ok(self.responses.response(shape))
    }

    /// Sends `cmd` and polls for its response, leaving the card deselected.
    pub fn send_command(&mut self, cmd: Command) -> Result<Response, BUSError<E, F>> {
        self.responses.reset();
        self.exchange(IDLE)?;
        let result = self.select().and_then(|_| self.transaction(cmd));
        self.release().and(result)
    }
}
