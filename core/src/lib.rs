#![no_std]

extern crate alloc;

pub mod config;
pub mod emit;
pub mod error;
pub mod transform;

pub use config::{Defaults, EmissionConfig, HexCase, OutputMode, SizeBytes, WordSize};
pub use emit::{TableName, convert, render, wrap, write_struct_definition, write_version};
pub use error::ConvertError;
pub use transform::{ByteStream, invert_mask, reflect, transform};

pub use embedded_bmp::{BmpError, FormatError, SourceImage, encode_header};

#[cfg(test)]
pub(crate) mod fixtures;
