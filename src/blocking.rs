use crate::{
    address::{Address, Slot, SECTOR_SIZE},
    check_offset, check_range, check_size,
    config::{Config, Verbosity},
    crc,
    error::Error,
    interrupt::{InterruptControl, MaskGuard},
    CHECKSUM_SIZE,
};
use embedded_storage::nor_flash::{check_read, NorFlash};

/// Type alias for a store on 4kB sectors, which covers the RP2040, MX25R and W25Q families
pub type BlobStore4K<F, I> = BlobStore<F, I, { SECTOR_SIZE as usize }>;

/// Sector-atomic blob storage on top of a NOR flash.
///
/// `SECTOR` is the size of the unit that is read, merged, erased and programmed back on every save.
/// It must be a multiple of both the erase and the write size of the flash.
pub struct BlobStore<F, I, const SECTOR: usize>
where
    F: NorFlash,
    I: InterruptControl,
{
    flash: F,
    irq: I,
    config: Config,
}

impl<F, I, E, const SECTOR: usize> BlobStore<F, I, SECTOR>
where
    F: NorFlash<Error = E>,
    I: InterruptControl,
{
    /// Create a new instance, fails with [`Error::Value`] if `SECTOR` does not match the flash geometry
    pub fn new(flash: F, irq: I, config: Config) -> Result<Self, Error<E>> {
        if SECTOR == 0 || SECTOR % F::ERASE_SIZE != 0 || SECTOR % F::WRITE_SIZE != 0 {
            return Err(Error::Value);
        }
        Ok(Self { flash, irq, config })
    }

    /// Size of the storage region in bytes
    pub fn capacity(&self) -> usize {
        self.flash.capacity()
    }

    /// Offset of `slot`, counted down from the top of the flash in sectors of `SECTOR` bytes.
    /// Returns `None` if the slot does not fit.
    pub fn slot(&self, slot: Slot) -> Option<u32> {
        Address::from_top(self.capacity(), SECTOR, slot).map(u32::from)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.config.verbosity = verbosity;
    }

    /// Give back the flash and the interrupt controller
    pub fn release(self) -> (F, I) {
        (self.flash, self.irq)
    }

    /// Read `buff.len()` bytes at `offset` without looking at the checksum
    pub fn read_raw(&mut self, offset: u32, buff: &mut [u8]) -> Result<(), Error<E>> {
        check_read(&self.flash, offset, buff.len())?;
        self.flash.read(offset, buff).map_err(Error::Read)
    }

    /// Read a blob of `buff.len()` bytes at `offset` and check its trailing checksum.
    ///
    /// On [`Error::Checksum`] the raw bytes are still in `buff`.
    pub fn read(&mut self, offset: u32, buff: &mut [u8]) -> Result<(), Error<E>> {
        if buff.len() < CHECKSUM_SIZE {
            return Err(Error::Value);
        }
        self.read_raw(offset, buff)?;

        match crc::verify(buff) {
            Ok(crc) => {
                trace!(self.config, "read {=usize} bytes at {=u32:#x}, crc {=u16:#x}", buff.len(), offset, crc);
                Ok(())
            }
            Err(crc::Mismatch { stored, computed }) => {
                error!(
                    self.config,
                    "invalid blob at {=u32:#x}: stored crc {=u16:#x}, computed {=u16:#x}",
                    offset,
                    stored,
                    computed
                );
                Err(Error::Checksum { stored, computed })
            }
        }
    }

    /// Stamp `blob` with its checksum and write it at the start of the sector at `offset`.
    ///
    /// The last two bytes of `blob` are overwritten with the checksum of the rest before anything is written.
    /// The bytes of the sector past `blob.len()` keep their previous value.
    pub fn save(&mut self, offset: u32, blob: &mut [u8]) -> Result<(), Error<E>> {
        if let Err(e) = check_size(blob.len(), SECTOR) {
            error!(
                self.config,
                "blob of {=usize} bytes does not fit in a {=usize} bytes sector",
                blob.len(),
                SECTOR
            );
            return Err(e);
        }
        if blob.len() < CHECKSUM_SIZE {
            return Err(Error::Value);
        }
        self.check_sector(offset)?;

        let crc = crc::stamp(blob).ok_or(Error::Value)?;
        trace!(self.config, "blob crc {=u16:#x}", crc);

        self.commit(offset, blob)?;
        info!(self.config, "saved {=usize} bytes at {=u32:#x}", blob.len(), offset);
        Ok(())
    }

    /// Merge `data` at the start of the sector at `offset`, then erase and program the whole sector
    /// with interrupts masked. No checksum is added.
    pub fn commit(&mut self, offset: u32, data: &[u8]) -> Result<(), Error<E>> {
        check_size(data.len(), SECTOR)?;
        self.check_sector(offset)?;

        let mut merge = [0u8; SECTOR];
        self.flash.read(offset, &mut merge).map_err(Error::Read)?;
        merge[..data.len()].copy_from_slice(data);
        debug!(
            self.config,
            "merged {=usize} bytes into sector {=u32:#x}",
            data.len(),
            offset
        );

        {
            let _masked = MaskGuard::new(&mut self.irq);
            self.flash
                .erase(offset, offset + SECTOR as u32)
                .map_err(Error::Erase)?;
            self.flash.write(offset, &merge).map_err(Error::Program)?;
        }

        debug!(self.config, "programmed sector {=u32:#x}", offset);
        Ok(())
    }

    /// Erase the sector at `offset`, with interrupts masked
    pub fn erase(&mut self, offset: u32) -> Result<(), Error<E>> {
        if let Err(e) = self.check_sector(offset) {
            if matches!(e, Error::NotAligned) {
                error!(
                    self.config,
                    "{=u32:#x} is not a sector boundary, off by {=u32} bytes",
                    offset,
                    offset % SECTOR as u32
                );
            }
            return Err(e);
        }

        {
            let _masked = MaskGuard::new(&mut self.irq);
            self.flash
                .erase(offset, offset + SECTOR as u32)
                .map_err(Error::Erase)?;
        }

        info!(self.config, "erased sector {=u32:#x}", offset);
        Ok(())
    }

    fn check_sector(&self, offset: u32) -> Result<(), Error<E>> {
        check_offset(offset, SECTOR)?;
        check_range(self.capacity(), offset, SECTOR)
    }
}
