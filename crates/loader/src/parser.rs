//! Sequential decoder for the module image layout:
//!
//! ```text
//! Module        := LPString(scope) Imports Types Methods
//! Imports       := Int32(count) LPString{count}
//! Types         := Int32(count) (LPString LPString){count}
//! Methods       := Int32(count) Method{count}
//! Method        := LPString(name) Params BytecodeBlock
//! Params        := Int32(count) LPString{count}
//! BytecodeBlock := Int32(bytecode_size) Int32(op_count) Byte{bytecode_size}
//! LPString      := Int32(length) Byte{length}
//! ```
//!
//! Integers are 4-byte signed values in host byte order.
use alloc::vec::Vec;

use tracing::{debug, trace};
use types::{Config, Error, MalformedReason, Method, Module, Result, TerminatedString, TypePair};

use crate::header::read_header;
use crate::limits::LoaderLimits;
use crate::reader::Reader;
use crate::strings::{extract_terminated, try_alloc};

const INT: usize = Config::INT_SIZE;
// Smallest encodings of each repeated record; used to reject counts that
// cannot possibly fit in the bytes that are left.
const MIN_STRING: usize = INT;
const MIN_TYPE_PAIR: usize = 2 * INT;
const MIN_METHOD: usize = MIN_STRING + INT + 2 * INT;

pub fn parse_module(image: &[u8]) -> Result<Module> {
    parse_module_with(image, &LoaderLimits::default())
}

/// Decodes a complete module or fails without exposing any partial result.
pub fn parse_module_with(image: &[u8], limits: &LoaderLimits) -> Result<Module> {
    let mut parser = ModuleParser {
        reader: Reader::new(image),
        limits,
    };
    let module = parser.module()?;

    let trailing = parser.reader.remaining();
    if trailing > 0 {
        if !limits.allow_trailing {
            return Err(Error::malformed(
                parser.reader.offset(),
                MalformedReason::TrailingBytes(trailing),
            ));
        }
        debug!(trailing, "ignoring bytes after module image");
    }
    Ok(module)
}

struct ModuleParser<'a, 'l> {
    reader: Reader<'a>,
    limits: &'l LoaderLimits,
}

impl<'a, 'l> ModuleParser<'a, 'l> {
    fn module(&mut self) -> Result<Module> {
        if let Some(version) = read_header(&mut self.reader)? {
            trace!(version, "image header");
        }

        let scope = self.string("scope length")?;
        trace!(%scope, "scope");

        let imports = self.string_list("import count")?;
        let types = self.type_pairs()?;
        let methods = self.methods()?;

        debug!(
            %scope,
            imports = imports.len(),
            types = types.len(),
            methods = methods.len(),
            "module loaded"
        );
        Ok(Module {
            scope,
            imports,
            types,
            methods,
        })
    }

    /// `LPString`
    fn string(&mut self, what: &'static str) -> Result<TerminatedString> {
        let len = self.reader.read_len(what, self.limits.max_string_len)?;
        let bytes = self.reader.read_bytes(len)?;
        extract_terminated(bytes)
    }

    /// Reads a count and checks it against the entry limit and against the
    /// bytes left, given the smallest possible size of one record.
    fn count(&mut self, what: &'static str, min_record: usize) -> Result<usize> {
        let at = self.reader.offset();
        let count = self.reader.read_len(what, self.limits.max_entries)?;
        let needed = count.saturating_mul(min_record);
        let remaining = self.reader.remaining();
        if needed > remaining {
            return Err(Error::malformed(
                at,
                MalformedReason::Truncated { needed, remaining },
            ));
        }
        Ok(count)
    }

    fn string_list(&mut self, what: &'static str) -> Result<Vec<TerminatedString>> {
        let count = self.count(what, MIN_STRING)?;
        let mut out = try_alloc(count)?;
        for _ in 0..count {
            let s = self.string("string length")?;
            trace!(%s, what, "entry");
            out.push(s);
        }
        Ok(out)
    }

    fn type_pairs(&mut self) -> Result<Vec<TypePair>> {
        let count = self.count("type count", MIN_TYPE_PAIR)?;
        let mut out = try_alloc(count)?;
        for _ in 0..count {
            let name = self.string("type name length")?;
            let base = self.string("base type length")?;
            trace!(%name, %base, "type");
            out.push(TypePair { name, base });
        }
        Ok(out)
    }

    fn methods(&mut self) -> Result<Vec<Method>> {
        let count = self.count("method count", MIN_METHOD)?;
        let mut out = try_alloc(count)?;
        for _ in 0..count {
            out.push(self.method()?);
        }
        Ok(out)
    }

    fn method(&mut self) -> Result<Method> {
        let name = self.string("method name length")?;
        let params = self.string_list("parameter count")?;

        let bytecode_size = self
            .reader
            .read_len("bytecode size", self.limits.max_bytecode_len)?;
        let op_count = self.reader.read_len("op count", u32::MAX as usize)? as u32;

        let code = self.reader.read_bytes(bytecode_size)?;
        let mut bytecode = try_alloc(bytecode_size)?;
        bytecode.extend_from_slice(code);

        trace!(%name, params = params.len(), op_count, bytecode_size, "method");
        Ok(Method {
            name,
            params,
            op_count,
            bytecode,
        })
    }
}
