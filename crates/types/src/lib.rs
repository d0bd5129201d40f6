#![no_std]

extern crate alloc;

pub mod config;
pub use config::Config;

pub mod error;
pub use error::{Error, MalformedReason, Result};

pub mod handle;
pub use handle::VmHandle;

pub mod module;
pub use module::{Method, Module, TypePair};

pub mod string;
pub use string::TerminatedString;
