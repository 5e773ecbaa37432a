pub mod artifacts;
pub mod classfile;
pub mod output;
