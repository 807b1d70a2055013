use embedded_storage::nor_flash::{NorFlashError, NorFlashErrorKind};

/// All possible errors emitted by the store
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<FlashError> {
    /// Offset is not the start of a sector
    NotAligned,

    /// Blob does not fit in a single sector
    TooLarge,

    /// Address range goes past the end of the device
    OutOfBounds,

    /// Invalid value passed, e.g. a buffer too short to hold the checksum
    Value,

    /// The checksum stored with the data does not match the data. The bytes read are still
    /// handed back to the caller.
    Checksum { stored: u16, computed: u16 },

    /// Internal flash error while reading
    Read(FlashError),

    /// Internal flash error while erasing the sector
    Erase(FlashError),

    /// Internal flash error while programming a sector that was already erased.
    /// The previous contents are gone and the new ones are not (fully) written.
    Program(FlashError),
}

impl<E> Error<E> {
    /// Numeric status of the error, `1` for every failure. `0` is reserved for success, see [`status`].
    pub fn code(&self) -> u8 {
        1
    }

    /// True if the error was detected before the device was touched
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NotAligned | Error::TooLarge | Error::OutOfBounds | Error::Value
        )
    }
}

/// Numeric status of an operation: `0` on success, [`Error::code`] otherwise.
pub fn status<T, E>(result: &Result<T, Error<E>>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

impl<E> From<NorFlashErrorKind> for Error<E> {
    fn from(e: NorFlashErrorKind) -> Self {
        match e {
            NorFlashErrorKind::NotAligned => Error::NotAligned,
            NorFlashErrorKind::OutOfBounds => Error::OutOfBounds,
            _ => Error::Value,
        }
    }
}

impl<E> NorFlashError for Error<E>
where
    E: NorFlashError,
{
    fn kind(&self) -> NorFlashErrorKind {
        match self {
            Error::NotAligned => NorFlashErrorKind::NotAligned,
            Error::OutOfBounds => NorFlashErrorKind::OutOfBounds,
            Error::Read(e) | Error::Erase(e) | Error::Program(e) => e.kind(),
            Error::TooLarge | Error::Value | Error::Checksum { .. } => NorFlashErrorKind::Other,
        }
    }
}
