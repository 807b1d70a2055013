#![no_std]
//! This is a platform agnostic library to persist configuration blobs in NOR flash using [embedded-storage](https://github.com/rust-embedded-community/embedded-storage).
//!
//! Each blob lives alone in one erase sector. A save reads the whole sector, overlays the blob at the
//! start, erases the sector and programs it back, all while interrupts are masked. The last two bytes of
//! every blob hold a CRC-16 of the preceding bytes, checked again on every read.
//!
//! Blobs are usually placed at fixed sectors counted down from the top of the device, see
//! [`address::Address::from_top`], so that program code growing from the bottom does not reach them.

#[macro_use]
mod fmt;

pub mod address;
pub mod blocking;
pub mod config;
pub mod crc;
pub mod error;
pub mod interrupt;

use crate::error::Error;

pub use crate::address::SECTOR_SIZE;

/// Size of the checksum field at the end of every blob.
pub const CHECKSUM_SIZE: usize = 2;

/// Fails if `offset` is not the start of a sector
pub fn check_offset<E>(offset: u32, sector_size: usize) -> Result<(), Error<E>> {
    if offset as usize % sector_size != 0 {
        return Err(Error::NotAligned);
    }
    Ok(())
}

/// Fails if `size` does not fit in a single sector
pub fn check_size<E>(size: usize, sector_size: usize) -> Result<(), Error<E>> {
    if size > sector_size {
        return Err(Error::TooLarge);
    }
    Ok(())
}

pub(crate) fn check_range<E>(capacity: usize, offset: u32, length: usize) -> Result<(), Error<E>> {
    let offset = offset as usize;
    if length > capacity || offset > capacity - length {
        return Err(Error::OutOfBounds);
    }
    Ok(())
}
