pub mod artifact;
pub mod classfile;
pub mod edge;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod graph;
pub mod node;
pub mod ports;
