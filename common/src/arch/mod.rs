//! Architecture glue.
//!
//! Only interrupt masking lives here; everything else in the mailbox stack is
//! architecture-neutral.

cfg_if::cfg_if! {
    if #[cfg(all(any(target_arch = "riscv64", target_arch = "riscv32"), not(test)))] {
        pub mod riscv;
        pub use riscv::irq::RiscvIrq as CurrentIrq;
    } else {
        pub use crate::sync::NoIrq as CurrentIrq;
    }
}
