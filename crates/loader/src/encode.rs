//! Writes a [`Module`] back out in the image layout read by the parser.
use alloc::vec::Vec;

use types::{Method, Module, TerminatedString};

use crate::header::write_header;

/// Encodes `module` in the raw layout. Lengths and counts are written as
/// host-order `i32`, so every string, list and bytecode buffer must be
/// shorter than `i32::MAX`. Strings are written with their stored terminator,
/// so parsing the output yields the same bytes back.
pub fn encode_module(module: &Module) -> Vec<u8> {
    let mut out = Vec::new();
    write_module(module, &mut out);
    out
}

/// Same as [`encode_module`] with the `SDNA` magic and version in front.
pub fn encode_module_with_header(module: &Module) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out);
    write_module(module, &mut out);
    out
}

fn write_module(module: &Module, out: &mut Vec<u8>) {
    write_string(&module.scope, out);

    write_count(module.imports.len(), out);
    for import in &module.imports {
        write_string(import, out);
    }

    write_count(module.types.len(), out);
    for pair in &module.types {
        write_string(&pair.name, out);
        write_string(&pair.base, out);
    }

    write_count(module.methods.len(), out);
    for method in &module.methods {
        write_method(method, out);
    }
}

fn write_method(method: &Method, out: &mut Vec<u8>) {
    write_string(&method.name, out);
    write_count(method.params.len(), out);
    for param in &method.params {
        write_string(param, out);
    }
    write_count(method.bytecode.len(), out);
    out.extend_from_slice(&(method.op_count as i32).to_ne_bytes());
    out.extend_from_slice(&method.bytecode);
}

fn write_string(s: &TerminatedString, out: &mut Vec<u8>) {
    let bytes = s.as_bytes_with_nul();
    write_count(bytes.len(), out);
    out.extend_from_slice(bytes);
}

fn write_count(n: usize, out: &mut Vec<u8>) {
    out.extend_from_slice(&(n as i32).to_ne_bytes());
}
