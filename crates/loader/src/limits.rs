use types::Config;

/// Caps applied while decoding an image, so a corrupted count cannot drive an
/// unbounded allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderLimits {
    pub max_entries: usize,
    pub max_string_len: usize,
    pub max_bytecode_len: usize,
    /// Accept bytes left over after the last method.
    pub allow_trailing: bool,
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            max_entries: Config::MAX_ENTRIES,
            max_string_len: Config::MAX_STRING_LEN,
            max_bytecode_len: Config::MAX_BYTECODE_LEN,
            allow_trailing: true,
        }
    }
}

impl LoaderLimits {
    pub fn strict() -> Self {
        Self {
            allow_trailing: false,
            ..Self::default()
        }
    }
}
