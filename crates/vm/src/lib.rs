#![no_std]

extern crate alloc;

pub mod exec;
pub mod init;
pub mod instance;

pub use exec::{ExecStatus, Executor};
pub use init::{InitHook, NoopInit};
pub use instance::VmInstance;
