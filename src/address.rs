/// Default sector size, the erase granularity of most small NOR parts (RP2040, MX25R, W25Q...)
pub const SECTOR_SIZE: u32 = 0x1000;

/// A sector id, counted from the start of the device.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sector(pub u32);

/// A slot id, counted down from the top of the device. Slot 0 is the very last sector.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slot(pub u16);

/// A byte offset in the storage region
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub u32);

impl Address {
    /// Represents the start of a specific sector of [`SECTOR_SIZE`] bytes.
    /// Returns `None` if it lies past the 32 bit address space.
    pub fn from_sector(sector: Sector) -> Option<Self> {
        sector.0.checked_mul(SECTOR_SIZE).map(Address)
    }

    /// Represents the start of a slot, `slot + 1` sectors of `sector_size` bytes below the end of
    /// a device of `capacity` bytes. A partial sector at the top is skipped.
    ///
    /// With a 2MB device and 4kB sectors, slot 0 is `0x1FF000`, slot 1 `0x1FE000` and so on.
    /// Returns `None` if the slot does not fit in the device or `sector_size` is 0.
    pub fn from_top(capacity: usize, sector_size: usize, slot: Slot) -> Option<Self> {
        let sector_size = u32::try_from(sector_size).ok().filter(|&s| s != 0)?;
        let from_top = (slot.0 as u32 + 1).checked_mul(sector_size)?;
        let capacity = u32::try_from(capacity).ok()?;
        let top = capacity - capacity % sector_size;
        top.checked_sub(from_top).map(Address)
    }

    /// Check if the address is the start of a sector
    pub fn is_sector_aligned(self) -> bool {
        self.0 % SECTOR_SIZE == 0
    }

    /// Sector containing this address
    pub fn sector(self) -> Sector {
        Sector(self.0 / SECTOR_SIZE)
    }
}

impl From<u16> for Sector {
    fn from(sector_id: u16) -> Sector {
        Sector(sector_id as u32)
    }
}

impl From<u32> for Sector {
    fn from(sector_id: u32) -> Sector {
        Sector(sector_id)
    }
}

impl From<u16> for Slot {
    fn from(slot_id: u16) -> Slot {
        Slot(slot_id)
    }
}

impl From<u32> for Address {
    fn from(addr: u32) -> Address {
        Address(addr)
    }
}

impl From<Address> for u32 {
    fn from(addr: Address) -> u32 {
        addr.0
    }
}
