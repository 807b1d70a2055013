#![allow(dead_code)]

use std::{cell::Cell, rc::Rc};

use embedded_storage::nor_flash::{
    check_erase, check_read, check_write, ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
};
use sectorstore::{
    blocking::BlobStore4K,
    config::{Config, Verbosity},
    interrupt::InterruptControl,
};

pub const FLASH_2MB: usize = 2 * 1024 * 1024;
pub const ERASED: u8 = 0xFF;

/// State shared between the fake flash, the fake interrupt controller and the test
#[derive(Default)]
pub struct Monitor {
    pub masked: Cell<bool>,
    pub saves: Cell<u32>,
    pub restores: Cell<u32>,
    pub erases: Cell<u32>,
    pub programs: Cell<u32>,
    pub unmasked_ops: Cell<u32>,
    pub fail_erase: Cell<bool>,
    pub fail_program: Cell<bool>,
}

impl Monitor {
    fn touch(&self) {
        if !self.masked.get() {
            self.unmasked_ops.set(self.unmasked_ops.get() + 1);
        }
    }

    pub fn device_ops(&self) -> u32 {
        self.erases.get() + self.programs.get()
    }
}

/// RAM backed NOR flash: erase sets bytes to 0xFF, programming can only clear bits
pub struct RamFlash {
    pub data: Vec<u8>,
    monitor: Rc<Monitor>,
}

impl RamFlash {
    pub fn new(capacity: usize, monitor: Rc<Monitor>) -> Self {
        Self {
            data: vec![ERASED; capacity],
            monitor,
        }
    }
}

impl ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(self, offset, bytes.len())?;
        let start = offset as usize;
        bytes.copy_from_slice(&self.data[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 256;
    const ERASE_SIZE: usize = 4096;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(self, from, to)?;
        self.monitor.touch();
        if self.monitor.fail_erase.get() {
            return Err(NorFlashErrorKind::Other);
        }
        self.data[from as usize..to as usize].fill(ERASED);
        self.monitor.erases.set(self.monitor.erases.get() + 1);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(self, offset, bytes.len())?;
        self.monitor.touch();
        if self.monitor.fail_program.get() {
            return Err(NorFlashErrorKind::Other);
        }
        let start = offset as usize;
        for (cell, byte) in self.data[start..start + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        self.monitor.programs.set(self.monitor.programs.get() + 1);
        Ok(())
    }
}

/// Interrupt controller that only records what happens to it
pub struct FakeIrq {
    monitor: Rc<Monitor>,
}

impl FakeIrq {
    pub fn new(monitor: Rc<Monitor>) -> Self {
        Self { monitor }
    }
}

impl InterruptControl for FakeIrq {
    type State = bool;

    unsafe fn save_and_disable(&mut self) -> bool {
        self.monitor.saves.set(self.monitor.saves.get() + 1);
        self.monitor.masked.replace(true)
    }

    unsafe fn restore(&mut self, was_masked: bool) {
        self.monitor.restores.set(self.monitor.restores.get() + 1);
        self.monitor.masked.set(was_masked);
    }
}

pub type TestStore = BlobStore4K<RamFlash, FakeIrq>;

pub fn init_with(capacity: usize) -> (TestStore, Rc<Monitor>) {
    let monitor = Rc::new(Monitor::default());
    let flash = RamFlash::new(capacity, monitor.clone());
    let irq = FakeIrq::new(monitor.clone());
    let store = TestStore::new(flash, irq, Config::new(Verbosity::Trace)).unwrap();
    (store, monitor)
}

pub fn init() -> (TestStore, Rc<Monitor>) {
    init_with(FLASH_2MB)
}

/// Whole sector at `offset`, read without checksum validation
pub fn sector(store: &mut TestStore, offset: u32) -> Vec<u8> {
    let mut buf = vec![0u8; 4096];
    store.read_raw(offset, &mut buf).unwrap();
    buf
}

/// Deterministic, non trivial pattern
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}
