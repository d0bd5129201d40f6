use types::{Config, Error, Result};

/// Sizing of a [`VmRegistry`](crate::VmRegistry) slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    initial_capacity: usize,
    max_capacity: usize,
}

impl RegistryConfig {
    /// `1 <= initial_capacity <= max_capacity <= Config::MAX_VM_CAPACITY`.
    /// A zero capacity could never double, so it is refused here rather than
    /// on the first create.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(Error::InvalidConfig("initial capacity must be at least 1"));
        }
        if max_capacity > Config::MAX_VM_CAPACITY {
            return Err(Error::InvalidConfig("max capacity exceeds 0xffff slots"));
        }
        if initial_capacity > max_capacity {
            return Err(Error::InvalidConfig("initial capacity exceeds max capacity"));
        }
        Ok(Self {
            initial_capacity,
            max_capacity,
        })
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Config::DEFAULT_VM_CAPACITY,
            max_capacity: Config::MAX_VM_CAPACITY,
        }
    }
}
