pub mod command;
pub mod crc;
pub mod response;

use response::OCR;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Card {
    SDSC,
    SDHC, // SDHC or SDXC, block addressed
}

impl Card {
    pub fn high_capacity(self) -> bool {
        match self {
            Self::SDSC => false,
            _ => true,
        }
    }
}

impl From<OCR> for Card {
    fn from(ocr: OCR) -> Self {
        match ocr.card_capacity_status() {
            true => Self::SDHC,
            false => Self::SDSC,
        }
    }
}
