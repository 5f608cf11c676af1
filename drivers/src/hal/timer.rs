//! Timer Hardware Abstraction Layer.
//!
//! This module defines the time source mailbox backends use to bound their
//! polling loops.

/// Interval between polls of a busy queue.
pub const POLL_INTERVAL_US: u32 = 10;

/// Free-running time source.
pub trait Clock: Send + Sync {
    /// Read the current counter value in microseconds.
    fn now_us(&self) -> u64;

    /// Busy-wait delay for the specified number of microseconds.
    ///
    /// This blocks the hart and should only be used for short delays.
    fn delay_us(&self, us: u32) {
        let start = self.now_us();
        let duration = us as u64;

        while self.now_us().wrapping_sub(start) < duration {
            core::hint::spin_loop();
        }
    }
}

/// Call `f` until it yields a value or `timeout_ms` milliseconds pass.
///
/// `f` runs at least once. Returns `Ok(None)` on timeout; errors from `f`
/// end the wait immediately.
pub fn poll_timeout<T, E>(
    clock: &dyn Clock,
    timeout_ms: u64,
    mut f: impl FnMut() -> Result<Option<T>, E>,
) -> Result<Option<T>, E> {
    let start = clock.now_us();
    let budget = timeout_ms.saturating_mul(1000);

    loop {
        if let Some(value) = f()? {
            return Ok(Some(value));
        }
        if clock.now_us().wrapping_sub(start) >= budget {
            return Ok(None);
        }
        clock.delay_us(POLL_INTERVAL_US);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU64, Ordering};

    struct StepClock(AtomicU64);

    impl Clock for StepClock {
        fn now_us(&self) -> u64 {
            self.0.fetch_add(100, Ordering::Relaxed)
        }
    }

    #[test]
    fn returns_first_value() {
        let clock = StepClock(AtomicU64::new(0));
        let mut calls = 0;
        let got: Result<_, ()> = poll_timeout(&clock, 5, || {
            calls += 1;
            Ok((calls == 3).then_some(calls))
        });
        assert_eq!(got, Ok(Some(3)));
    }

    #[test]
    fn gives_up_after_budget() {
        let clock = StepClock(AtomicU64::new(0));
        let got: Result<Option<()>, ()> = poll_timeout(&clock, 2, || Ok(None));
        assert_eq!(got, Ok(None));
        assert!(clock.0.load(Ordering::Relaxed) >= 2000);
    }

    #[test]
    fn errors_end_the_wait() {
        let clock = StepClock(AtomicU64::new(0));
        let got: Result<Option<()>, &str> = poll_timeout(&clock, 1000, || Err("boom"));
        assert_eq!(got, Err("boom"));
    }
}
