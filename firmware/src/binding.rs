//! Consumer to channel bindings.
//!
//! A consumer names itself and the index of the mailbox it wants; the
//! resolver answers with the controller id and the channel arguments to
//! request from it.

use alloc::sync::Arc;
use alloc::vec::Vec;

use drivers::mailbox::{ChanArgs, Channel, Registry};

use crate::SbiError;

/// Who is asking for a channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConsumerDesc<'a> {
    pub name: &'a str,
    /// Which of the consumer's mailboxes.
    pub index: usize,
}

impl<'a> ConsumerDesc<'a> {
    pub const fn new(name: &'a str, index: usize) -> Self {
        Self { name, index }
    }
}

pub trait BindingResolver {
    /// Look up `(controller id, channel args)` for a consumer.
    fn resolve(&self, desc: &ConsumerDesc<'_>) -> Result<(u32, ChanArgs), SbiError>;
}

/// One row of a [`StaticBindings`] table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Binding {
    pub consumer: &'static str,
    pub index: usize,
    pub controller: u32,
    pub args: ChanArgs,
}

/// Fixed binding table, typically built from board configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticBindings {
    entries: Vec<Binding>,
}

impl StaticBindings {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, binding: Binding) -> Self {
        self.entries.push(binding);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Binding> for StaticBindings {
    fn from_iter<T: IntoIterator<Item = Binding>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl BindingResolver for StaticBindings {
    fn resolve(&self, desc: &ConsumerDesc<'_>) -> Result<(u32, ChanArgs), SbiError> {
        self.entries
            .iter()
            .find(|b| b.consumer == desc.name && b.index == desc.index)
            .map(|b| (b.controller, b.args))
            .ok_or(SbiError::NotFound)
    }
}

/// Resolve a consumer's binding and request the channel from its controller.
pub fn request_channel(
    registry: &Registry,
    resolver: &dyn BindingResolver,
    desc: &ConsumerDesc<'_>,
) -> Result<Arc<Channel>, SbiError> {
    let (id, args) = resolver.resolve(desc)?;
    let controller = registry.find(id).ok_or(SbiError::NoDevice)?;
    Ok(controller.request_channel(&args)?)
}
