use alloc::vec::Vec;

use crate::string::TerminatedString;

/// A parsed extension unit. Built in one piece by the loader and immutable
/// afterwards; VM instances share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub scope: TerminatedString,
    pub imports: Vec<TerminatedString>,
    pub types: Vec<TypePair>,
    pub methods: Vec<Method>,
}

/// A declared type and the type it derives from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePair {
    pub name: TerminatedString,
    pub base: TerminatedString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: TerminatedString,
    pub params: Vec<TerminatedString>,
    pub op_count: u32,
    /// Raw bytecode; its length is the declared bytecode size.
    pub bytecode: Vec<u8>,
}

impl Module {
    pub fn new(scope: impl Into<TerminatedString>) -> Self {
        Self {
            scope: scope.into(),
            imports: Vec::new(),
            types: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Base type declared for `name`, if the module declares `name`.
    pub fn base_of(&self, name: &str) -> Option<&TerminatedString> {
        self.types.iter().find(|t| t.name == name).map(|t| &t.base)
    }

    pub fn imports(&self, scope: &str) -> bool {
        self.imports.iter().any(|i| *i == scope)
    }
}

impl TypePair {
    pub fn new(name: impl Into<TerminatedString>, base: impl Into<TerminatedString>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
        }
    }
}

impl Method {
    pub fn new(name: impl Into<TerminatedString>, op_count: u32, bytecode: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            op_count,
            bytecode,
        }
    }

    pub fn bytecode_size(&self) -> usize {
        self.bytecode.len()
    }
}
