//! Interrupt masking around erase and program.
//!
//! On parts executing in place from the same flash that is being written (RP2040 XIP, nRF NVMC, STM32...),
//! no code may be fetched from flash while the device is busy, so interrupts must stay masked for the
//! whole erase/program window. `MaskGuard` captures the interrupt state when created and restores it
//! when dropped, so every exit path (including errors) re-enables interrupts exactly once.

use critical_section::RestoreState;

/// Capture-and-disable / restore of the processor interrupt state.
///
/// # Safety
///
/// Both methods are `unsafe` to call. Every state returned by
/// [`save_and_disable`](Self::save_and_disable) must be passed to [`restore`](Self::restore) exactly
/// once, and nested pairs must be restored in the reverse order they were saved, on the same
/// controller. Restoring a state out of order can re-enable interrupts inside an outer masked
/// window. The store only drives a controller through a scoped guard that upholds this.
pub trait InterruptControl {
    /// Opaque interrupt state captured by [`save_and_disable`](Self::save_and_disable)
    type State;

    /// Capture the current interrupt state and disable interrupts
    ///
    /// # Safety
    ///
    /// The returned state must be handed back to [`restore`](Self::restore) exactly once, after
    /// every state saved later has been restored.
    unsafe fn save_and_disable(&mut self) -> Self::State;

    /// Restore a state previously returned by [`save_and_disable`](Self::save_and_disable)
    ///
    /// # Safety
    ///
    /// `state` must come from the most recent unrestored call to
    /// [`save_and_disable`](Self::save_and_disable) on this controller.
    unsafe fn restore(&mut self, state: Self::State);
}

impl<T: InterruptControl + ?Sized> InterruptControl for &mut T {
    type State = T::State;

    unsafe fn save_and_disable(&mut self) -> Self::State {
        unsafe { T::save_and_disable(self) }
    }

    unsafe fn restore(&mut self, state: Self::State) {
        unsafe { T::restore(self, state) }
    }
}

/// Masks interrupts through the [`critical_section`] implementation of the target
/// (`cortex-m` `critical-section-single-core`, `embassy-rp` `critical-section-impl`, ...).
#[derive(Debug, Default)]
pub struct CriticalSectionMask;

impl CriticalSectionMask {
    pub const fn new() -> Self {
        Self
    }
}

impl InterruptControl for CriticalSectionMask {
    type State = RestoreState;

    unsafe fn save_and_disable(&mut self) -> RestoreState {
        // SAFETY: the caller releases the state once, in nesting order.
        unsafe { critical_section::acquire() }
    }

    unsafe fn restore(&mut self, state: RestoreState) {
        // SAFETY: the caller passes the state of the innermost unreleased `acquire`.
        unsafe { critical_section::release(state) }
    }
}

/// Does not touch interrupts. For storage that is not code memory, like an external SPI NOR chip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMask;

impl InterruptControl for NoMask {
    type State = ();

    unsafe fn save_and_disable(&mut self) {}

    unsafe fn restore(&mut self, _state: ()) {}
}

/// Interrupts stay masked as long as the guard lives.
///
/// Only the store creates guards, one at a time, and drops each before returning, so the
/// save/restore pairs are always properly nested.
pub(crate) struct MaskGuard<'a, I: InterruptControl> {
    irq: &'a mut I,
    state: Option<I::State>,
}

impl<'a, I: InterruptControl> MaskGuard<'a, I> {
    /// Capture the interrupt state and disable interrupts
    pub(crate) fn new(irq: &'a mut I) -> Self {
        // SAFETY: the state is restored once, in `drop`. The guard holds `irq` mutably for its
        // whole life, so no other pair can be opened on this controller until it is released.
        let state = unsafe { irq.save_and_disable() };
        Self {
            irq,
            state: Some(state),
        }
    }
}

impl<I: InterruptControl> Drop for MaskGuard<'_, I> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            // SAFETY: `state` was saved by `new` on this controller and is taken only once.
            unsafe { self.irq.restore(state) }
        }
    }
}
