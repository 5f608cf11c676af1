use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::RwLock;

use super::controller::Controller;
use super::MailboxError;
use crate::hal::mailbox::MailboxController;

/// Registered mailbox controllers, keyed by id.
///
/// Controllers are added during single-threaded init and removed during
/// teardown; lookups may happen from any hart in between.
pub struct Registry {
    controllers: RwLock<BTreeMap<u32, Arc<Controller>>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            controllers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a backend under `id`.
    ///
    /// The new controller starts with no channels and a zero sequence
    /// counter. Fails with [`MailboxError::AlreadyExists`] if `id` is taken,
    /// leaving the registry unchanged.
    pub fn add(
        &self,
        id: u32,
        ops: Arc<dyn MailboxController>,
    ) -> Result<Arc<Controller>, MailboxError> {
        let mut controllers = self.controllers.write();

        if controllers.contains_key(&id) {
            log::warn!("mbox{}: already registered", id);
            return Err(MailboxError::AlreadyExists);
        }

        let controller = Arc::new(Controller::new(id, ops));
        controllers.insert(id, controller.clone());
        log::info!("mbox{}: registered {}", id, controller.name());

        Ok(controller)
    }

    /// Look up a controller. Absence is a normal outcome, not an error.
    pub fn find(&self, id: u32) -> Option<Arc<Controller>> {
        self.controllers.read().get(&id).cloned()
    }

    /// Unregister a controller, first releasing each of its channels through
    /// the backend in creation order.
    ///
    /// Removing a controller that is not registered is a no-op.
    pub fn remove(&self, controller: &Arc<Controller>) {
        let mut controllers = self.controllers.write();

        match controllers.get(&controller.id()) {
            Some(registered) if Arc::ptr_eq(registered, controller) => {}
            _ => return,
        }

        controller.free_all_channels();
        controllers.remove(&controller.id());
        log::info!("mbox{}: removed", controller.id());
    }

    /// Remove every controller, in id order.
    pub fn clear(&self) {
        for controller in self.controllers() {
            self.remove(&controller);
        }
    }

    pub fn ids(&self) -> Vec<u32> {
        self.controllers.read().keys().copied().collect()
    }

    pub fn controllers(&self) -> Vec<Arc<Controller>> {
        self.controllers.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.controllers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
