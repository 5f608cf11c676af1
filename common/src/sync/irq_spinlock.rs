use core::{
    marker::PhantomData,
    mem::ManuallyDrop,
    ops::{Deref, DerefMut},
};

use super::irq::IrqControl;
use crate::arch::CurrentIrq;

/// IRQ-safe spinlock.
///
/// - Disables interrupts on lock
/// - Spins until acquired
/// - Restores interrupt state on drop
///
/// Safe to use from:
/// - trap context
/// - normal firmware context on any hart
///
/// Not fair. Not reentrant.
pub struct IrqSpinLock<T, I: IrqControl = CurrentIrq> {
    inner: spin::Mutex<T>,
    _irq: PhantomData<fn() -> I>,
}

impl<T, I: IrqControl> IrqSpinLock<T, I> {
    /// Create a new IRQ-safe spinlock.
    pub const fn new(data: T) -> Self {
        Self {
            inner: spin::Mutex::new(data),
            _irq: PhantomData,
        }
    }

    /// Acquire the lock with interrupts disabled.
    pub fn lock(&self) -> IrqSpinLockGuard<'_, T, I> {
        // Mask first so a trap on this hart cannot spin on a lock we hold
        let irq_state = I::disable();

        IrqSpinLockGuard {
            guard: ManuallyDrop::new(self.inner.lock()),
            irq_state,
        }
    }

    /// Consume the lock and return the protected data.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

/// Guard returned by `IrqSpinLock::lock`.
///
/// Restores interrupt state on drop.
pub struct IrqSpinLockGuard<'a, T, I: IrqControl> {
    guard: ManuallyDrop<spin::MutexGuard<'a, T>>,
    irq_state: I::State,
}

impl<T, I: IrqControl> Deref for IrqSpinLockGuard<'_, T, I> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T, I: IrqControl> DerefMut for IrqSpinLockGuard<'_, T, I> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<T, I: IrqControl> Drop for IrqSpinLockGuard<'_, T, I> {
    fn drop(&mut self) {
        // Release lock first
        // SAFETY: the guard is never touched again after this point.
        unsafe { ManuallyDrop::drop(&mut self.guard) };

        // Restore IRQ state
        I::restore(self.irq_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static DISABLED: AtomicUsize = AtomicUsize::new(0);
    static RESTORED: AtomicUsize = AtomicUsize::new(0);

    struct CountingIrq;

    impl IrqControl for CountingIrq {
        type State = usize;

        fn disable() -> usize {
            DISABLED.fetch_add(1, Ordering::SeqCst)
        }

        fn restore(_state: usize) {
            RESTORED.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn guard_masks_and_restores_once() {
        let lock: IrqSpinLock<u32, CountingIrq> = IrqSpinLock::new(5);
        {
            let mut guard = lock.lock();
            *guard += 1;
            assert_eq!(DISABLED.load(Ordering::SeqCst), 1);
            assert_eq!(RESTORED.load(Ordering::SeqCst), 0);
        }
        assert_eq!(RESTORED.load(Ordering::SeqCst), 1);
        assert_eq!(lock.into_inner(), 6);
    }
}
