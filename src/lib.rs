//! calltrack: used-by reference graphs from compiled JVM classes.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
