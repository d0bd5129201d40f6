use types::VmHandle;

use crate::instance::VmInstance;

/// Per-instance setup run by the registry right after a slot is filled.
pub trait InitHook {
    fn init(&mut self, handle: VmHandle, vm: &mut VmInstance);
}

/// Leaves the zeroed instance as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInit;

impl InitHook for NoopInit {
    fn init(&mut self, _handle: VmHandle, _vm: &mut VmInstance) {}
}

impl<F> InitHook for F
where
    F: FnMut(VmHandle, &mut VmInstance),
{
    fn init(&mut self, handle: VmHandle, vm: &mut VmInstance) {
        self(handle, vm)
    }
}
