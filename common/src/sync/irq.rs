use core::fmt::Debug;

/// Architecture-specific interrupt masking interface.
///
/// Implemented by the architecture layer in [`crate::arch`].
pub trait IrqControl {
    /// Saved interrupt state
    type State: Copy + Debug;

    /// Disable interrupts and return the previous state.
    fn disable() -> Self::State;

    /// Restore interrupts to a previous state.
    fn restore(state: Self::State);
}

/// Interrupt control for contexts that never take asynchronous interrupts
/// (hosted builds, unit tests).
#[derive(Debug, Clone, Copy)]
pub struct NoIrq;

impl IrqControl for NoIrq {
    type State = ();

    #[inline(always)]
    fn disable() {}

    #[inline(always)]
    fn restore(_state: ()) {}
}
