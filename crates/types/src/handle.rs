use core::fmt;

/// Index of a live VM instance inside the registry's slot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VmHandle(pub u16);

impl VmHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for VmHandle {
    fn from(raw: u16) -> Self {
        VmHandle(raw)
    }
}

impl fmt::Display for VmHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
