//! CRC-16 used to stamp and check blobs.
//!
//! MSB first, polynomial `0x1021`, register starting at zero, no final xor. This is the variant
//! usually called CRC-16/XMODEM.

use ::crc::{Crc, CRC_16_XMODEM};

use crate::CHECKSUM_SIZE;

/// Generator polynomial
pub const POLYNOMIAL: u16 = CRC_16_XMODEM.poly;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Compute the checksum of `data`. An empty slice gives 0.
pub fn checksum(data: &[u8]) -> u16 {
    XMODEM.checksum(data)
}

/// Read the checksum stored in the last two bytes of `data`, little endian.
/// Returns 0 if `data` is too short to hold one.
pub fn extract_checksum(data: &[u8]) -> u16 {
    match data.len().checked_sub(CHECKSUM_SIZE) {
        Some(at) => u16::from_le_bytes([data[at], data[at + 1]]),
        None => 0,
    }
}

/// Compute the checksum of everything but the last two bytes of `blob` and write it there.
/// Returns the checksum, or `None` if `blob` is too short to hold one.
pub fn stamp(blob: &mut [u8]) -> Option<u16> {
    let at = blob.len().checked_sub(CHECKSUM_SIZE)?;
    let (data, field) = blob.split_at_mut(at);
    let crc = checksum(data);
    field.copy_from_slice(&crc.to_le_bytes());
    Some(crc)
}

/// Outcome of a failed [`verify`]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub stored: u16,
    pub computed: u16,
}

/// Check that the last two bytes of `blob` hold the checksum of the rest.
///
/// A blob shorter than the checksum field is compared against the checksum of nothing.
pub fn verify(blob: &[u8]) -> Result<u16, Mismatch> {
    let data = &blob[..blob.len().saturating_sub(CHECKSUM_SIZE)];
    let stored = extract_checksum(blob);
    let computed = checksum(data);
    if stored != computed {
        return Err(Mismatch { stored, computed });
    }
    Ok(computed)
}
