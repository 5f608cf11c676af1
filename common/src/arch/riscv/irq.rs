use crate::sync::irq::IrqControl;

const MSTATUS_MIE: usize = 1 << 3;

pub struct RiscvIrq;

/// Implementation of interrupt control for RISC-V machine mode.
///
/// Masks machine interrupts through the MIE bit of `mstatus`.
///
/// # State Management
/// The `State` type is `bool`, representing whether MIE was set before
/// `disable()` cleared it.
///
/// # Assembly Details
///
/// - `csrrci {0}, mstatus, 8`: atomically read `mstatus` and clear MIE
/// - `csrsi mstatus, 8`: set MIE
impl IrqControl for RiscvIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        let mstatus: usize;
        unsafe {
            core::arch::asm!(
                "csrrci {0}, mstatus, 8",
                out(reg) mstatus,
                options(nomem, nostack)
            );
        }
        mstatus & MSTATUS_MIE != 0 // Return true if MIE was previously set
    }

    #[inline(always)]
    fn restore(prev_enabled: bool) {
        if prev_enabled {
            unsafe {
                core::arch::asm!("csrsi mstatus, 8", options(nomem, nostack));
            }
        }
    }
}
