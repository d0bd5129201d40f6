/// Hard limits shared by the loader and the VM registry.
pub struct Config;

impl Config {
    /// Width of every integer field in a module image.
    pub const INT_SIZE: usize = 4;

    /// Optional image header: magic followed by a host-order `u32` version.
    pub const IMAGE_MAGIC: [u8; 4] = *b"SDNA";
    pub const IMAGE_VERSION: u32 = 1;
    pub const IMAGE_HEADER_LEN: usize = Self::IMAGE_MAGIC.len() + Self::INT_SIZE;

    /// Upper bound for any declared count (imports, types, methods, params).
    pub const MAX_ENTRIES: usize = 4096;
    pub const MAX_STRING_LEN: usize = 4096;
    pub const MAX_BYTECODE_LEN: usize = 1 << 20;

    /// The registry never holds more slots than a `u16` handle can address.
    pub const MAX_VM_CAPACITY: usize = 0xffff;
    pub const DEFAULT_VM_CAPACITY: usize = 16;
}
