#![no_std]

extern crate alloc;

pub mod config;
pub use config::RegistryConfig;
pub mod launch;
pub use launch::load_extension;
pub mod registry;
pub use registry::VmRegistry;

pub use types::{Config, Error, Module, Result, VmHandle};
pub use vm::{ExecStatus, Executor, InitHook, NoopInit, VmInstance};
