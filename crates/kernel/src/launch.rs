use loader::{LoaderLimits, parse_module_with};
use tracing::{debug, warn};
use types::{Result, VmHandle};
use vm::InitHook;

use crate::registry::VmRegistry;

/// Decode `image` and bind the resulting module to a new VM instance.
///
/// Nothing is registered when decoding fails; the registry is only touched
/// once a complete module exists.
pub fn load_extension<H: InitHook>(
    registry: &mut VmRegistry<H>,
    image: &[u8],
    limits: &LoaderLimits,
) -> Result<VmHandle> {
    let module = match parse_module_with(image, limits) {
        Ok(module) => module,
        Err(err) => {
            warn!(%err, len = image.len(), "rejecting extension image");
            return Err(err);
        }
    };
    debug!(scope = %module.scope, "extension decoded");
    registry.create(module)
}
