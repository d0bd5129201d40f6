use std::collections::HashSet;
use std::sync::Arc;

use kernel::{
    Config, Error, ExecStatus, Executor, Module, RegistryConfig, VmHandle, VmInstance, VmRegistry,
};

fn module(scope: &str) -> Arc<Module> {
    Arc::new(Module::new(scope))
}

/// Pushes one operand per step and yields until `halt_after` steps in total.
#[derive(Debug, Default)]
struct CountingExecutor {
    halt_after: u64,
    calls: Vec<(VmHandle, u32)>,
}

impl Executor for CountingExecutor {
    fn execute(&mut self, vm: &mut VmInstance, step_budget: u32) -> ExecStatus {
        self.calls.push((vm.handle(), step_budget));
        for _ in 0..step_budget {
            if vm.steps >= self.halt_after {
                return ExecStatus::Halted;
            }
            vm.push(vm.steps as u32).unwrap();
            vm.steps += 1;
        }
        ExecStatus::Yielded
    }
}

#[test]
fn sequential_creates_yield_distinct_handles() {
    let mut registry = VmRegistry::new();
    let shared = module("net");
    let mut seen = HashSet::new();

    for _ in 0..10 {
        let handle = registry.create(Arc::clone(&shared)).expect("create vm");
        assert!(handle.index() < registry.capacity());
        assert!(seen.insert(handle));
    }
    assert_eq!(registry.len(), 10);
    assert_eq!(registry.capacity(), Config::DEFAULT_VM_CAPACITY);
    assert_eq!(
        registry.handles().collect::<Vec<_>>(),
        (0..10).map(VmHandle).collect::<Vec<_>>()
    );
}

#[test]
fn growth_doubles_and_keeps_existing_instances() {
    let config = RegistryConfig::new(4, 64).unwrap();
    let mut registry = VmRegistry::with_config(config, kernel::NoopInit).unwrap();

    let mut handles = Vec::new();
    for i in 0..3 {
        let handle = registry.create(module("m")).unwrap();
        registry.get_mut(handle).unwrap().push(100 + i).unwrap();
        handles.push(handle);
    }
    assert_eq!(registry.capacity(), 4);

    // used + 1 reaches capacity: the next create doubles first.
    let fourth = registry.create(module("m")).unwrap();
    assert_eq!(registry.capacity(), 8);
    assert_eq!(fourth, VmHandle(3));

    for (i, handle) in handles.iter().enumerate() {
        let vm = registry.get(*handle).unwrap();
        assert_eq!(vm.handle(), *handle);
        assert_eq!(vm.stack(), &[100 + i as u32]);
    }
}

#[test]
fn exceeding_ceiling_is_rejected_without_changing_state() {
    let config = RegistryConfig::new(2, 8).unwrap();
    let mut registry = VmRegistry::with_config(config, kernel::NoopInit).unwrap();

    // Capacity goes 2 -> 4 -> 8; one slot always stays spare.
    for _ in 0..7 {
        registry.create(module("m")).unwrap();
    }
    assert_eq!(registry.capacity(), 8);
    assert_eq!(registry.len(), 7);

    for _ in 0..3 {
        assert_eq!(
            registry.create(module("m")),
            Err(Error::RegistryFull { capacity: 8 })
        );
    }
    assert_eq!(registry.capacity(), 8);
    assert_eq!(registry.len(), 7);
    assert_eq!(registry.handles().count(), 7);
}

#[test]
fn default_registry_stops_below_u16_ceiling() {
    let mut registry = VmRegistry::new();
    let shared = module("bulk");

    let mut last = VmHandle(0);
    loop {
        match registry.create(Arc::clone(&shared)) {
            Ok(handle) => last = handle,
            Err(err) => {
                assert_eq!(err, Error::RegistryFull { capacity: 32768 });
                break;
            }
        }
    }
    assert_eq!(registry.capacity(), 32768);
    assert!(registry.capacity() <= Config::MAX_VM_CAPACITY);
    assert_eq!(registry.len(), 32767);
    assert_eq!(last, VmHandle(32766));
    assert_eq!(Arc::strong_count(&shared), 32768);
}

#[test]
fn release_frees_lowest_slot_for_reuse() {
    let mut registry = VmRegistry::new();
    let a = registry.create(module("a")).unwrap();
    let b = registry.create(module("b")).unwrap();
    let c = registry.create(module("c")).unwrap();

    let released = registry.release(b).unwrap();
    assert_eq!(released.module().scope, "b");
    assert_eq!(registry.len(), 2);
    assert!(!registry.contains(b));
    assert_eq!(registry.get(b).unwrap_err(), Error::InvalidHandle(b));
    assert_eq!(registry.release(b).unwrap_err(), Error::InvalidHandle(b));

    let reused = registry.create(module("d")).unwrap();
    assert_eq!(reused, b);
    assert_eq!(registry.get(reused).unwrap().module().scope, "d");
    assert_eq!(registry.get(a).unwrap().module().scope, "a");
    assert_eq!(registry.get(c).unwrap().module().scope, "c");
}

#[test]
fn out_of_range_handles_are_invalid() {
    let mut registry = VmRegistry::new();
    let far = VmHandle(u16::MAX);
    assert_eq!(registry.get(far).unwrap_err(), Error::InvalidHandle(far));
    assert_eq!(registry.release(far).unwrap_err(), Error::InvalidHandle(far));
    assert!(registry.is_empty());
}

#[test]
fn new_instances_start_zeroed() {
    let mut registry = VmRegistry::new();
    let handle = registry.create(module("z")).unwrap();
    let vm = registry.get(handle).unwrap();
    assert_eq!(vm.depth(), 0);
    assert_eq!(vm.steps, 0);
}

#[test]
fn init_hook_runs_once_per_create() {
    let mut seen = Vec::new();
    {
        let hook = |handle: VmHandle, vm: &mut VmInstance| {
            seen.push(handle);
            vm.push(0xfeed).unwrap();
        };
        let mut registry = VmRegistry::with_config(RegistryConfig::default(), hook).unwrap();
        let first = registry.create(module("h")).unwrap();
        let second = registry.create(module("h")).unwrap();
        assert_eq!(registry.get(first).unwrap().stack(), &[0xfeed]);
        assert_eq!(registry.get(second).unwrap().stack(), &[0xfeed]);
    }
    assert_eq!(seen, vec![VmHandle(0), VmHandle(1)]);
}

#[test]
fn execute_dispatches_with_budget() {
    let mut registry = VmRegistry::new();
    let first = registry.create(module("x")).unwrap();
    let second = registry.create(module("y")).unwrap();
    let mut executor = CountingExecutor {
        halt_after: 5,
        ..Default::default()
    };

    // Interleave two instances with small budgets.
    assert_eq!(registry.execute(first, 3, &mut executor), Ok(ExecStatus::Yielded));
    assert_eq!(registry.execute(second, 3, &mut executor), Ok(ExecStatus::Yielded));
    assert_eq!(registry.execute(first, 3, &mut executor), Ok(ExecStatus::Halted));

    assert_eq!(executor.calls, vec![(first, 3), (second, 3), (first, 3)]);
    assert_eq!(registry.get(first).unwrap().steps, 5);
    assert_eq!(registry.get(first).unwrap().stack(), &[0, 1, 2, 3, 4]);
    assert_eq!(registry.get(second).unwrap().steps, 3);

    let missing = VmHandle(9);
    assert_eq!(
        registry.execute(missing, 1, &mut executor),
        Err(Error::InvalidHandle(missing))
    );
    assert_eq!(executor.calls.len(), 3);
}

struct HaltAtOnce;

impl Executor for HaltAtOnce {
    fn execute(&mut self, _vm: &mut VmInstance, _step_budget: u32) -> ExecStatus {
        ExecStatus::Halted
    }
}

#[test]
fn step_counter_belongs_to_the_executor() {
    let mut registry = VmRegistry::new();
    let handle = registry.create(module("idle")).unwrap();

    assert_eq!(registry.execute(handle, 64, &mut HaltAtOnce), Ok(ExecStatus::Halted));
    assert_eq!(registry.get(handle).unwrap().steps, 0);
}
