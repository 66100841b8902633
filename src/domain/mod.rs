//! Payment code domain: the TLV field codec, checksum, merchant identity and
//! the payload builder, plus the charge records and ports around them.

pub mod amount;
pub mod charge;
pub mod crc;
pub mod field;
pub mod merchant;
pub mod payload;
pub mod ports;
