//! Reliability, availability and serviceability.
//!
//! Supervisor software reaches RAS through [`Ras`], which forwards each call
//! to the one registered [`RasAgent`].

pub mod rpmi;

use alloc::sync::Arc;

use bitflags::bitflags;

use crate::SbiError;
use crate::agent::AgentSlot;

pub use self::rpmi::RpmiRasAgent;

bitflags! {
    /// Operations an agent implements.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct RasCaps: u32 {
        const PROBE = 1 << 0;
        const SYNC_HART = 1 << 1;
        const SYNC_DEV = 1 << 2;
    }
}

/// A RAS provider.
///
/// Operations outside [`capabilities`](RasAgent::capabilities) are never
/// called.
pub trait RasAgent: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> RasCaps;

    fn probe(&self) -> Result<(), SbiError> {
        Err(SbiError::NotSupported)
    }

    /// Fetch pending error vectors of the calling hart into `pending`.
    ///
    /// Returns the number of vectors written.
    fn sync_hart_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
        let _ = pending;
        Err(SbiError::NotSupported)
    }

    /// Fetch pending device error vectors into `pending`.
    fn sync_dev_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
        let _ = pending;
        Err(SbiError::NotSupported)
    }
}

/// RAS entry points.
pub struct Ras {
    slot: AgentSlot<dyn RasAgent>,
}

impl Ras {
    pub const fn new() -> Self {
        Self {
            slot: AgentSlot::new(),
        }
    }

    /// Register the agent. Ignored if one is already registered.
    pub fn set_agent(&self, agent: Arc<dyn RasAgent>) {
        let name = agent.name();
        if self.slot.set(agent.clone()) {
            log::info!("ras: agent {} registered", name);
        } else {
            log::warn!("ras: agent {} ignored, slot taken", name);
        }
    }

    pub fn agent(&self) -> Option<Arc<dyn RasAgent>> {
        self.slot.get()
    }

    pub fn clear_agent(&self) -> Option<Arc<dyn RasAgent>> {
        self.slot.clear()
    }

    fn agent_with(&self, cap: RasCaps) -> Result<Option<Arc<dyn RasAgent>>, SbiError> {
        let agent = self.agent().ok_or(SbiError::Failed)?;
        Ok(agent.capabilities().contains(cap).then_some(agent))
    }

    pub fn probe(&self) -> Result<(), SbiError> {
        self.agent_with(RasCaps::PROBE)?
            .ok_or(SbiError::Failed)?
            .probe()
    }

    pub fn sync_hart_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
        self.agent_with(RasCaps::SYNC_HART)?
            .ok_or(SbiError::Failed)?
            .sync_hart_errs(pending)
    }

    /// An agent without device error sync has nothing pending.
    pub fn sync_dev_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
        match self.agent_with(RasCaps::SYNC_DEV)? {
            Some(agent) => agent.sync_dev_errs(pending),
            None => Ok(0),
        }
    }
}

impl Default for Ras {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HartOnly;

    impl RasAgent for HartOnly {
        fn name(&self) -> &str {
            "hart-only"
        }

        fn capabilities(&self) -> RasCaps {
            RasCaps::SYNC_HART
        }

        fn sync_hart_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
            pending[0] = 0x42;
            Ok(1)
        }
    }

    struct Full;

    impl RasAgent for Full {
        fn name(&self) -> &str {
            "full"
        }

        fn capabilities(&self) -> RasCaps {
            RasCaps::all()
        }

        fn probe(&self) -> Result<(), SbiError> {
            Ok(())
        }

        fn sync_hart_errs(&self, _pending: &mut [u32]) -> Result<usize, SbiError> {
            Err(SbiError::TimedOut)
        }

        fn sync_dev_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
            pending[..2].copy_from_slice(&[7, 8]);
            Ok(2)
        }
    }

    #[test]
    fn no_agent_fails() {
        let ras = Ras::new();
        let mut pending = [0u32; 4];

        assert_eq!(ras.probe(), Err(SbiError::Failed));
        assert_eq!(ras.sync_hart_errs(&mut pending), Err(SbiError::Failed));
        assert_eq!(ras.sync_dev_errs(&mut pending), Err(SbiError::Failed));
    }

    #[test]
    fn missing_capabilities() {
        let ras = Ras::new();
        ras.set_agent(Arc::new(HartOnly));
        let mut pending = [0u32; 4];

        assert_eq!(ras.probe(), Err(SbiError::Failed));
        assert_eq!(ras.sync_hart_errs(&mut pending), Ok(1));
        assert_eq!(pending[0], 0x42);
        assert_eq!(ras.sync_dev_errs(&mut pending), Ok(0));
    }

    #[test]
    fn calls_are_forwarded_verbatim() {
        let ras = Ras::new();
        ras.set_agent(Arc::new(Full));
        let mut pending = [0u32; 4];

        assert_eq!(ras.probe(), Ok(()));
        assert_eq!(ras.sync_hart_errs(&mut pending), Err(SbiError::TimedOut));
        assert_eq!(ras.sync_dev_errs(&mut pending), Ok(2));
        assert_eq!(pending[..2], [7, 8]);
    }

    #[test]
    fn second_agent_is_ignored() {
        let ras = Ras::new();
        ras.set_agent(Arc::new(HartOnly));
        ras.set_agent(Arc::new(Full));

        assert_eq!(ras.agent().unwrap().name(), "hart-only");
        assert_eq!(ras.probe(), Err(SbiError::Failed));

        ras.clear_agent();
        ras.set_agent(Arc::new(Full));
        assert_eq!(ras.agent().unwrap().name(), "full");
    }
}
