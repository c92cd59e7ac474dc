// Queue Registry - sole creation and lookup authority for queues

use crate::domain::queue::{Queue, QueueName};
use std::collections::BTreeMap;
use tracing::debug;

/// Name-keyed set of queues.
///
/// Queues are never removed once created. Iteration is ordered by name so
/// stats output is stable.
#[derive(Debug, Default)]
pub struct Registry {
    queues: BTreeMap<QueueName, Queue>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing queue for `name`, or a newly registered empty one
    pub fn get_or_create(&mut self, name: &str) -> &mut Queue {
        if !self.queues.contains_key(name) {
            debug!(queue = %name, "Creating queue");
        }
        self.queues
            .entry(name.to_owned())
            .or_insert_with_key(|key| Queue::new(key.clone()))
    }

    /// Existing queue for `name`. Never creates one.
    pub fn lookup(&self, name: &str) -> Option<&Queue> {
        self.queues.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Queue> {
        self.queues.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Queue> {
        self.queues.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Queue> {
        self.queues.values_mut()
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
