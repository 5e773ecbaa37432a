//! Document writers

mod writer;

pub use writer::{OutputFormat, output_path, remove_document, render, write_document};
