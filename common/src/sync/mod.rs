pub mod irq;
pub mod irq_spinlock;
pub use irq::{IrqControl, NoIrq};
pub use irq_spinlock::{IrqSpinLock, IrqSpinLockGuard};
