use thiserror::Error;

use crate::handle::VmHandle;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by module loading and the VM registry. None of these
/// abort; the caller decides whether to reject the request or escalate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed module at offset {offset}: {reason}")]
    MalformedModule {
        offset: usize,
        reason: MalformedReason,
    },

    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("vm registry exhausted at capacity {capacity}")]
    RegistryFull { capacity: usize },

    #[error("invalid vm handle {0}")]
    InvalidHandle(VmHandle),

    #[error("invalid registry configuration: {0}")]
    InvalidConfig(&'static str),
}

impl Error {
    pub fn malformed(offset: usize, reason: MalformedReason) -> Self {
        Error::MalformedModule { offset, reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("needed {needed} bytes but only {remaining} remain")]
    Truncated { needed: usize, remaining: usize },

    #[error("negative {what} ({value})")]
    Negative { what: &'static str, value: i32 },

    #[error("{what} of {value} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("unsupported image version {0}")]
    UnsupportedVersion(u32),

    #[error("{0} trailing bytes after the last method")]
    TrailingBytes(usize),
}
