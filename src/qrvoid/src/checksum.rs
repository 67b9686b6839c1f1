//! CRC-16/CCITT-FALSE checksum used to terminate Pix payloads.

/// Tag and length of the checksum field itself (`63`, length `04`).
///
/// The field header is part of the checksummed data, so it is appended before
/// the CRC runs.
pub const CHECKSUM_FIELD_PREFIX: &str = "6304";

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Computes the raw CRC-16/CCITT-FALSE register over `bytes`.
pub fn crc16_ccitt(bytes: &[u8]) -> u16 {
    let mut crc = INITIAL;
    for &byte in bytes {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Returns the four uppercase hex digits that close a payload.
///
/// `payload` is everything before the checksum field; the `6304` header is
/// appended here and the CRC runs over the UTF-8 bytes of the result.
pub fn checksum(payload: &str) -> String {
    let mut data = String::with_capacity(payload.len() + CHECKSUM_FIELD_PREFIX.len());
    data.push_str(payload);
    data.push_str(CHECKSUM_FIELD_PREFIX);
    format!("{:04X}", crc16_ccitt(data.as_bytes()))
}
