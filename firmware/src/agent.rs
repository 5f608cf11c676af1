//! Single-slot agent registration.
//!
//! A feature (RAS, ...) is served by at most one agent. The first agent to
//! register wins; later registrations are ignored until the slot is cleared.

use alloc::sync::Arc;

use spin::RwLock;

pub struct AgentSlot<A: ?Sized> {
    agent: RwLock<Option<Arc<A>>>,
}

impl<A: ?Sized> AgentSlot<A> {
    pub const fn new() -> Self {
        Self {
            agent: RwLock::new(None),
        }
    }

    /// Register `agent`. Returns `false` if another agent holds the slot.
    pub fn set(&self, agent: Arc<A>) -> bool {
        let mut slot = self.agent.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(agent);
        true
    }

    pub fn get(&self) -> Option<Arc<A>> {
        self.agent.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.agent.read().is_some()
    }

    /// Empty the slot, returning the agent that held it.
    pub fn clear(&self) -> Option<Arc<A>> {
        self.agent.write().take()
    }
}

impl<A: ?Sized> Default for AgentSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}
