//! Seam for the bytecode interpreter. The instruction set lives outside this
//! workspace; the registry only resolves handles and hands the instance over.
use crate::instance::VmInstance;

/// Outcome of one bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The step budget ran out before the VM finished.
    Yielded,
    Halted,
    /// Executor-defined fault code.
    Fault(u8),
}

impl ExecStatus {
    pub fn is_runnable(self) -> bool {
        matches!(self, ExecStatus::Yielded)
    }
}

/// Runs up to `step_budget` operations of the module bound to `vm`. A
/// scheduler interleaves instances by calling this repeatedly with small
/// budgets.
pub trait Executor {
    fn execute(&mut self, vm: &mut VmInstance, step_budget: u32) -> ExecStatus;
}
