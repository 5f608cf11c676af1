//! Doorbell Hardware Abstraction Layer.

/// Out-of-band signal asking the remote side to look at its queues.
///
/// How the signal is raised (MMIO write, IPI, MSI) is up to the platform.
pub trait Doorbell: Send + Sync {
    fn ring(&self);
}
