//! Growable table of VM instances addressed by small integer handles.
//!
//! Slots are scanned first-fit, lowest index first. The table doubles when a create
//! would leave no spare slot and never shrinks; growth that would pass the
//! configured ceiling (at most 0xffff) fails with `RegistryFull`.
use alloc::sync::Arc;
use alloc::vec::Vec;

use tracing::{debug, error, trace, warn};
use types::{Error, Module, Result, VmHandle};
use vm::{ExecStatus, Executor, InitHook, NoopInit, VmInstance};

use crate::config::RegistryConfig;

pub struct VmRegistry<H: InitHook = NoopInit> {
    slots: Vec<Option<VmInstance>>,
    used: usize,
    /// Every slot below this index is occupied.
    first_free: usize,
    max_capacity: usize,
    hook: H,
}

impl VmRegistry<NoopInit> {
    pub fn new() -> Self {
        let config = RegistryConfig::default();
        let mut slots = Vec::new();
        slots.resize_with(config.initial_capacity(), || None);
        Self {
            slots,
            used: 0,
            first_free: 0,
            max_capacity: config.max_capacity(),
            hook: NoopInit,
        }
    }
}

impl Default for VmRegistry<NoopInit> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: InitHook> VmRegistry<H> {
    pub fn with_config(config: RegistryConfig, hook: H) -> Result<Self> {
        let mut slots = Vec::new();
        reserve_slots(&mut slots, config.initial_capacity())?;
        slots.resize_with(config.initial_capacity(), || None);
        Ok(Self {
            slots,
            used: 0,
            first_free: 0,
            max_capacity: config.max_capacity(),
            hook,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Bind `module` to a new zeroed VM instance and return its handle.
    pub fn create(&mut self, module: impl Into<Arc<Module>>) -> Result<VmHandle> {
        if self.used + 1 >= self.capacity() {
            self.grow()?;
        }

        let Some(index) = self.slots[self.first_free..]
            .iter()
            .position(Option::is_none)
            .map(|offset| self.first_free + offset)
        else {
            error!(
                capacity = self.capacity(),
                used = self.used,
                "no free vm slot after growth"
            );
            return Err(Error::RegistryFull {
                capacity: self.capacity(),
            });
        };
        let handle = VmHandle(u16::try_from(index).map_err(|_| Error::RegistryFull {
            capacity: self.capacity(),
        })?);

        let mut instance = VmInstance::new(handle, module.into());
        self.hook.init(handle, &mut instance);
        self.slots[index] = Some(instance);
        self.used += 1;
        self.first_free = index + 1;

        debug!(%handle, used = self.used, "vm created");
        Ok(handle)
    }

    /// Empty the slot behind `handle` and return its instance. The handle may
    /// be issued again by a later create.
    pub fn release(&mut self, handle: VmHandle) -> Result<VmInstance> {
        let instance = self
            .slots
            .get_mut(handle.index())
            .and_then(Option::take)
            .ok_or(Error::InvalidHandle(handle))?;
        self.used -= 1;
        self.first_free = self.first_free.min(handle.index());
        debug!(%handle, used = self.used, "vm released");
        Ok(instance)
    }

    pub fn get(&self, handle: VmHandle) -> Result<&VmInstance> {
        self.slots
            .get(handle.index())
            .and_then(Option::as_ref)
            .ok_or(Error::InvalidHandle(handle))
    }

    pub fn get_mut(&mut self, handle: VmHandle) -> Result<&mut VmInstance> {
        self.slots
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .ok_or(Error::InvalidHandle(handle))
    }

    pub fn contains(&self, handle: VmHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Live handles in increasing order.
    pub fn handles(&self) -> impl Iterator<Item = VmHandle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VmHandle, &VmInstance)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|vm| (vm.handle(), vm)))
    }

    /// Run up to `step_budget` operations on the instance behind `handle`.
    pub fn execute<E>(
        &mut self,
        handle: VmHandle,
        step_budget: u32,
        executor: &mut E,
    ) -> Result<ExecStatus>
    where
        E: Executor + ?Sized,
    {
        let instance = self.get_mut(handle)?;
        let status = executor.execute(instance, step_budget);
        trace!(%handle, step_budget, ?status, "vm executed");
        Ok(status)
    }

    /// Double the slot table. New slots start empty; existing handles keep
    /// their index and instance.
    fn grow(&mut self) -> Result<()> {
        let capacity = self.capacity();
        let new_capacity = capacity.saturating_mul(2);
        if new_capacity > self.max_capacity {
            warn!(capacity, max = self.max_capacity, "vm registry exhausted");
            return Err(Error::RegistryFull { capacity });
        }

        reserve_slots(&mut self.slots, new_capacity - capacity)?;
        self.slots.resize_with(new_capacity, || None);
        debug!(from = capacity, to = new_capacity, "vm registry grown");
        Ok(())
    }
}

fn reserve_slots(slots: &mut Vec<Option<VmInstance>>, additional: usize) -> Result<()> {
    slots
        .try_reserve_exact(additional)
        .map_err(|_| Error::OutOfMemory {
            requested: additional.saturating_mul(core::mem::size_of::<Option<VmInstance>>()),
        })
}
