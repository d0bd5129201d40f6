//! Decoding of Sedna module images into [`types::Module`] descriptors.
#![no_std]

extern crate alloc;

pub mod encode;
pub mod header;
pub mod limits;
pub mod parser;
pub mod reader;
pub mod strings;

pub use encode::{encode_module, encode_module_with_header};
pub use limits::LoaderLimits;
pub use parser::{parse_module, parse_module_with};
pub use reader::Reader;
pub use strings::extract_terminated;
