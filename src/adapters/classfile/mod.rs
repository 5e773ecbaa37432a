//! JVM class-file adapter: binary decoding plus filesystem and jar class containers.

mod bytecode;
mod jar;
pub mod parser;
pub mod source;

pub use parser::{DecodeError, parse_class};
pub use source::FsClassSource;

#[cfg(test)]
pub(crate) mod testing;
