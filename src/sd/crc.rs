pub const CRC7_POLYNOMIAL: u8 = 0x89; // x^7 + x^3 + 1
pub const CRC16_POLYNOMIAL: u16 = 0x1021; // x^16 + x^12 + x^5 + 1

/// CRC-7 used by command frames, bit-serial and MSB first.
/// Result occupies the low 7 bits.
pub fn crc7(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in data.iter() {
        for i in 0..8 {
            // Bit 6 is the top of the 7-bit register, compare before shifting
            let feedback = ((b << i) ^ (crc << 1)) & 0x80;
            crc <<= 1;
            if feedback != 0 {
                crc ^= CRC7_POLYNOMIAL & 0x7F;
            }
        }
    }
    crc & 0x7F
}

/// CRC-16 (CCITT, zero init) protecting data blocks.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &b in data.iter() {
        crc ^= (b as u16) << 8;
        for _ in 0..8 {
            crc = match crc & 0x8000 {
                0 => crc << 1,
                _ => (crc << 1) ^ CRC16_POLYNOMIAL,
            };
        }
    }
    crc
}
