use alloc::sync::Arc;
use alloc::vec::Vec;

use types::{Error, Module, Result, VmHandle};

/// Execution context owned by one registry slot: the module it runs and an
/// operand stack the executor works on.
#[derive(Debug, Clone)]
pub struct VmInstance {
    handle: VmHandle,
    module: Arc<Module>,
    stack: Vec<u32>,
    /// Step counter owned by the executor. The registry never touches it;
    /// `reset` is the only other writer.
    pub steps: u64,
}

impl VmInstance {
    /// Fresh instance with an empty operand stack.
    pub fn new(handle: VmHandle, module: Arc<Module>) -> Self {
        Self {
            handle,
            module,
            stack: Vec::new(),
            steps: 0,
        }
    }

    pub fn handle(&self) -> VmHandle {
        self.handle
    }

    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    /// Push a value, reporting allocator refusal instead of aborting.
    pub fn push(&mut self, value: u32) -> Result<()> {
        self.stack.try_reserve(1).map_err(|_| Error::OutOfMemory {
            requested: core::mem::size_of::<u32>(),
        })?;
        self.stack.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u32> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<u32> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[u32] {
        &self.stack
    }

    /// Drop all operands and step accounting, keeping the module binding.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.steps = 0;
    }
}
