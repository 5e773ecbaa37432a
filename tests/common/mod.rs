//! Shared test utilities for integration tests.
//! Included by test files; not a test binary of its own.
#![allow(dead_code)]

#[path = "../../src/adapters/classfile/testing.rs"]
pub mod class_bytes;
pub mod fixtures;
pub mod mock;
