use embedded_hal::spi;

use super::bus::Transfer;

/// Drives any embedded-hal full-duplex SPI peripheral as a card transport
pub struct FullDuplex<S>(pub S);

impl<S: spi::FullDuplex<u8>> Transfer for FullDuplex<S> {
    type Error = S::Error;

    fn exchange(&mut self, byte: u8) -> Result<u8, S::Error> {
        nb::block!(self.0.send(byte))?;
        nb::block!(self.0.read())
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;

    use embedded_hal::spi;
    use hex_literal::hex;

    use super::FullDuplex;
    use crate::bus::spi::Transfer;

    #[derive(Default)]
    struct Loopback {
        sent: Vec<u8>,
        inbox: VecDeque<u8>,
        busy: bool,
    }

    impl spi::FullDuplex<u8> for Loopback {
        type Error = ();

        fn read(&mut self) -> nb::Result<u8, ()> {
            self.inbox.pop_front().ok_or(nb::Error::WouldBlock)
        }

        fn send(&mut self, byte: u8) -> nb::Result<(), ()> {
            // Report busy every other call
            self.busy = !self.busy;
            if self.busy {
                return Err(nb::Error::WouldBlock);
            }
            self.sent.push(byte);
            self.inbox.push_back(!byte);
            Ok(())
        }
    }

    #[test]
    fn test_exchange_blocks_until_done() {
        let mut spi = FullDuplex(Loopback::default());
        assert_eq!(spi.exchange(0x40).unwrap(), 0xBF);
        spi.transmit(&hex!("00 00 00 00 95")).unwrap();
        let mut buffer = [0u8; 2];
        spi.receive(&mut buffer).unwrap();
        assert_eq!(buffer, [0x00, 0x00]);
        assert_eq!(spi.0.sent, hex!("40 00 00 00 00 95 FF FF"));
    }
}
