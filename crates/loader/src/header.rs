//! Optional `SDNA` + version prefix in front of the legacy layout.
//!
//! Images without the magic decode as the raw layout. A raw image whose scope
//! length happens to read as the magic would claim a ~1 GiB scope name and is
//! rejected as truncated either way.
use types::{Config, Error, MalformedReason, Result};

use crate::reader::Reader;

pub fn has_header(image: &[u8]) -> bool {
    image.starts_with(&Config::IMAGE_MAGIC)
}

/// Consumes the header if present and returns its version.
pub fn read_header(reader: &mut Reader<'_>) -> Result<Option<u32>> {
    let magic_len = Config::IMAGE_MAGIC.len();
    if reader.remaining() < magic_len || reader.peek_bytes(magic_len)? != Config::IMAGE_MAGIC {
        return Ok(None);
    }
    reader.read_bytes(magic_len)?;

    let at = reader.offset();
    let version = reader.read_u32()?;
    if version != Config::IMAGE_VERSION {
        return Err(Error::malformed(
            at,
            MalformedReason::UnsupportedVersion(version),
        ));
    }
    Ok(Some(version))
}

pub fn write_header(out: &mut alloc::vec::Vec<u8>) {
    out.extend_from_slice(&Config::IMAGE_MAGIC);
    out.extend_from_slice(&Config::IMAGE_VERSION.to_ne_bytes());
}
