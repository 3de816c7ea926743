//! # sdmmc
//!
//! > SD card bring-up over SPI, mainly focusing on embedded system with `no_std`
//!
//! Takes a card from power-on to ready for block transfer: power-up clocks,
//! GO_IDLE_STATE, SEND_IF_COND and the APP_CMD + SD_SEND_OP_COND handshake.
//!
//! ## Using this crate
//!
//! Assuming you already have `SPI` struct which implements `sdmmc::bus::spi::Transfer`
//! and a chip-select pin implementing `embedded_hal::digital::v2::OutputPin`
//!
//! ```ignore
//! let mut bus = sdmmc::bus::spi::Bus::new(spi, cs);
//! match bus.init() {
//!     Ok(()) => info!("Card: {:?}", bus.card()),
//!     Err(e) => error!("Init failed with code {}", e.code()),
//! }
//! ```
//!
//! With `linux-spi` feature, `sdmmc::bus::linux::spi(device, cs_gpio, speed_hz)`
//! builds the bus from spidev and a sysfs GPIO.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
extern crate log;
#[cfg(feature = "spidev")]
extern crate spidev;

pub mod bus;
pub mod config;
mod sd;

pub use config::Config;
pub use sd::command::{AppCommand, Command, Frame, SendInterfaceCondition};
pub use sd::crc::{crc16, crc7};
pub use sd::response::{Response, ResponseBuffer, Shape, OCR, R1, R1Status, R7};
pub use sd::Card;
