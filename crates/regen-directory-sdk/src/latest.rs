//! Latest-request-wins guard
//!
//! Each fetch takes a ticket before it starts. When the response arrives,
//! it is applied only if no newer fetch began in the meantime and the input
//! it was made for is still the current one.

/// Proof that a fetch was started for `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    generation: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct LatestRequest<K> {
    generation: u64,
    current: Option<K>,
}

impl<K: Clone + PartialEq> LatestRequest<K> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            current: None,
        }
    }

    /// Start a fetch for `key`, superseding any in flight
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        self.current = Some(key.clone());
        Ticket {
            generation: self.generation,
            key,
        }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation && self.current.as_ref() == Some(&ticket.key)
    }

    /// Consume a ticket; returns whether its result should be applied
    pub fn complete(&mut self, ticket: Ticket<K>) -> bool {
        self.is_current(&ticket)
    }

    /// Key of the most recent fetch
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }
}

impl<K: Clone + PartialEq> Default for LatestRequest<K> {
    fn default() -> Self {
        Self::new()
    }
}
