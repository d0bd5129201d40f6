use alloc::vec::Vec;

use types::{Error, Result, TerminatedString};

/// Copies `source` into a freshly allocated buffer that is guaranteed to end
/// in a zero byte. An empty source yields a single zero byte; a source that is
/// already terminated is copied verbatim; anything else gets one zero appended.
pub fn extract_terminated(source: &[u8]) -> Result<TerminatedString> {
    let terminated = source.last() == Some(&0);
    let size = if terminated { source.len() } else { source.len() + 1 };

    let mut buf = try_alloc::<u8>(size)?;
    buf.extend_from_slice(source);
    // Capacity already covers the terminator, so this never reallocates.
    Ok(TerminatedString::terminate(buf))
}

/// Empty vector with room for exactly `count` elements, reported as
/// `OutOfMemory` instead of aborting when the allocator refuses.
pub(crate) fn try_alloc<T>(count: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(count).map_err(|_| Error::OutOfMemory {
        requested: count.saturating_mul(core::mem::size_of::<T>()),
    })?;
    Ok(out)
}
