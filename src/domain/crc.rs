//! CRC-16/CCITT-FALSE, the checksum the instant-payment network validates
//! at the end of every merchant payment code.

use crc::{CRC_16_IBM_3740, Crc};

/// CRC-16/IBM-3740 is the catalogue name of CRC-16/CCITT-FALSE.
const PIX_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Computes CRC-16/CCITT-FALSE: polynomial 0x1021, initial value 0xFFFF,
/// no input or output reflection, no final XOR.
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    PIX_CRC.checksum(data)
}

/// Renders the checksum of `text` as four uppercase, zero-padded hex digits.
pub fn checksum(text: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(text.as_bytes()))
}
