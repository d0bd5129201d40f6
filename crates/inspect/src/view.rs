use serde::Serialize;
use types::{Method, Module};

/// Bytes of bytecode shown in hex in text and JSON dumps.
pub const PREVIEW_BYTES: usize = 16;

/// Printable snapshot of a decoded module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleView {
    pub scope: String,
    pub imports: Vec<String>,
    pub types: Vec<TypeView>,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeView {
    pub name: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodView {
    pub name: String,
    pub params: Vec<String>,
    pub op_count: u32,
    pub bytecode_size: usize,
    pub bytecode_preview: String,
}

impl From<&Module> for ModuleView {
    fn from(module: &Module) -> Self {
        Self {
            scope: module.scope.to_string(),
            imports: module.imports.iter().map(ToString::to_string).collect(),
            types: module
                .types
                .iter()
                .map(|t| TypeView {
                    name: t.name.to_string(),
                    base: t.base.to_string(),
                })
                .collect(),
            methods: module.methods.iter().map(MethodView::from).collect(),
        }
    }
}

impl From<&Method> for MethodView {
    fn from(method: &Method) -> Self {
        let shown = method.bytecode.len().min(PREVIEW_BYTES);
        let mut preview = hex::encode(&method.bytecode[..shown]);
        if method.bytecode.len() > shown {
            preview.push_str("..");
        }
        Self {
            name: method.name.to_string(),
            params: method.params.iter().map(ToString::to_string).collect(),
            op_count: method.op_count,
            bytecode_size: method.bytecode.len(),
            bytecode_preview: preview,
        }
    }
}
