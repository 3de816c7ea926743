use std::io;

use gpio::{sysfs::SysFsGpioOutput, GpioOut};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};

use crate::bus::spi;

pub struct SPI(pub Spidev);

impl spi::Transfer for SPI {
    type Error = io::Error;

    fn exchange(&mut self, byte: u8) -> io::Result<u8> {
        let mut rx = [0u8];
        self.0.transfer(&mut SpidevTransfer::read_write(&[byte], &mut rx))?;
        Ok(rx[0])
    }

    fn transmit(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut buf = vec![0u8; bytes.len()];
        self.0.transfer(&mut SpidevTransfer::read_write(bytes, &mut buf))
    }

    fn receive(&mut self, buffer: &mut [u8]) -> io::Result<()> {
        let filler = vec![0xFFu8; buffer.len()];
        self.0.transfer(&mut SpidevTransfer::read_write(&filler, buffer))
    }
}

pub struct GPIO(SysFsGpioOutput);

impl embedded_hal::digital::v2::OutputPin for GPIO {
    type Error = io::Error;

    fn set_high(&mut self) -> io::Result<()> {
        self.0.set_value(true)
    }

    fn set_low(&mut self) -> io::Result<()> {
        self.0.set_value(false)
    }
}

impl SPI {
    /// Opens `spi` clocked at `speed_hz`, keep it within 100~400KHz until init is done
    pub fn new(spi: &str, speed_hz: u32) -> io::Result<Self> {
        let mut spi = Spidev::open(spi)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)?;
        Ok(Self(spi))
    }
}

pub fn spi(spi: &str, cs: u16, speed_hz: u32) -> io::Result<spi::Bus<SPI, GPIO>> {
    let spi = SPI::new(spi, speed_hz)?;
    let cs = SysFsGpioOutput::open(cs)?;
    Ok(spi::Bus::new(spi, GPIO(cs)))
}
